//! CSV-to-canonical round trip through the readers and the engine.

use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fs;

use nepa::readers;
use nepa_reconcile::Reconciler;
use nepa_schema::{SchemaModel, SchemaValidator};

const SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "type": "object",
  "required": ["projects"],
  "properties": {
    "projects": {"type": "array", "items": {"$ref": "#/definitions/project"}},
    "public_comments": {"type": "array", "items": {"$ref": "#/definitions/public_comment"}}
  },
  "definitions": {
    "project": {
      "type": "object",
      "required": ["project_id", "project_title"],
      "properties": {
        "project_id": {"type": "string"},
        "project_title": {"type": "string"},
        "project_status": {"type": "string"},
        "project_description": {"type": "string"}
      }
    },
    "public_comment": {
      "type": "object",
      "required": ["public_comment_id", "commenter_name"],
      "properties": {
        "public_comment_id": {"type": "string"},
        "comment_text": {"type": "string"},
        "commenter_name": {"type": "string"},
        "public_access": {"type": "boolean"}
      }
    }
  }
}"#;

#[test]
fn test_csv_files_merge_into_one_valid_document() {
    let dir = tempfile::tempdir().unwrap();

    let schema_path = dir.path().join("nepa.schema.json");
    fs::write(&schema_path, SCHEMA).unwrap();

    let project_csv = dir.path().join("project.csv");
    fs::write(
        &project_csv,
        "id,title,status,description\n\
         p-1,Harbor Channel Deepening,In Progress,\n\
         p-2,Transmission Line Upgrade,Planned,Route follows existing corridor\n",
    )
    .unwrap();

    let comment_csv = dir.path().join("comment.csv");
    fs::write(
        &comment_csv,
        "id,commenter,text\nc-1,J. Alvarez,Concerned about turbidity.\n",
    )
    .unwrap();

    let model = SchemaModel::load(&schema_path).unwrap();
    let reconciler = Reconciler::new(&model);

    let mut tables: BTreeMap<String, Vec<Map<String, Value>>> = BTreeMap::new();
    for path in [&project_csv, &comment_csv] {
        assert!(readers::is_tabular(path));
        let (table, rows) = readers::read_csv_table(path).unwrap();
        tables.entry(table).or_default().extend(rows);
    }

    let outcome = reconciler.reconcile_tables(&tables);
    let doc = &outcome.document;

    let projects = doc["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0]["project_id"], json!("p-1"));
    assert_eq!(projects[0]["project_status"], json!("in-progress"));
    // The empty description cell was read as null and default-filled.
    assert_eq!(projects[0]["project_description"], json!(""));
    assert!(outcome
        .report
        .fixes
        .iter()
        .any(|f| f.field == "project_description"));

    assert_eq!(doc["public_comments"][0]["commenter_name"], json!("J. Alvarez"));

    let validator = SchemaValidator::new(&model).unwrap();
    let validation = validator.validate(doc);
    assert!(validation.valid, "{:?}", validation.issues);
    assert!(outcome.report.valid);
}

#[test]
fn test_yaml_schema_loads_like_json() {
    let dir = tempfile::tempdir().unwrap();

    let yaml = r#"
type: object
required: [projects]
properties:
  projects:
    type: array
    items:
      $ref: "#/definitions/project"
definitions:
  project:
    type: object
    required: [project_id]
    properties:
      project_id:
        type: string
"#;
    let schema_path = dir.path().join("nepa.schema.yaml");
    fs::write(&schema_path, yaml).unwrap();

    let model = SchemaModel::load(&schema_path).unwrap();
    assert!(model.entity("project").is_some());
}
