//! End-to-end reconciliation: legacy document in, canonical validated
//! document out.

use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use nepa_reconcile::Reconciler;
use nepa_schema::{EntityKind, SchemaModel, SchemaValidator};

fn schema() -> SchemaModel {
    let raw: Value = serde_json::from_str(include_str!("fixtures/nepa.schema.json"))
        .expect("fixture schema parses");
    SchemaModel::from_value(raw).expect("fixture schema builds")
}

fn legacy_document() -> Value {
    json!({
        "project": [
            {
                "id": 42,
                "title": "Harbor Channel Deepening",
                "description": null,
                "status": "In Progress",
                "sponsor": {"sponsor_name": "Port Authority", "sponsor_type": "municipal"},
                "location": {
                    "location_description": "Outer harbor",
                    "latitude": 41.5,
                    "longitude": -70.9,
                    "purpose": "navigation channel maintenance"
                },
                "lead_agency": "USACE",
                "created_at": "2019-04-01T00:00:00Z"
            }
        ],
        "process": [
            {"id": 7, "project_id": 42, "status": "Complete", "type": "EA review"}
        ],
        "document": [
            {
                "id": "doc-1",
                "process_id": "7",
                "title": "Draft EA",
                "type": "Environmental Assessment",
                "status": "Final",
                "container_inventory": [{"container_name": "Appendix box", "container_count": 3}]
            }
        ],
        "comment": [
            {"id": 301, "process_id": "7", "text": "Concerned about turbidity.", "commenter": "J. Alvarez", "date": "2020-02-11"}
        ],
        "engagement": [
            {"id": "ev-1", "process_id": "7", "type": "Public Meeting", "status": "Held", "name": "Scoping meeting"}
        ],
        "gis": [
            {"id": "g-1", "project_id": 42, "type": "polygon", "srid": "EPSG:4326", "purpose": "dredge footprint"}
        ]
    })
}

#[test]
fn test_full_legacy_migration_produces_valid_document() {
    let model = schema();
    let reconciler = Reconciler::new(&model);

    let outcome = reconciler.reconcile_document(&legacy_document()).unwrap();
    let doc = &outcome.document;

    // Every legacy key is gone; canonical collections exist.
    for table in ["project", "process", "document", "comment", "engagement", "gis"] {
        assert!(doc.get(table).is_none(), "legacy key '{}' not removed", table);
    }
    assert_eq!(doc["projects"].as_array().unwrap().len(), 1);
    assert_eq!(doc["public_comments"].as_array().unwrap().len(), 1);

    // Identifier coercion and enum rewrites landed.
    assert_eq!(doc["projects"][0]["project_id"], json!("42"));
    assert_eq!(doc["projects"][0]["project_status"], json!("in-progress"));
    assert_eq!(doc["processes"][0]["process_status"], json!("completed"));
    assert_eq!(doc["documents"][0]["document_type"], json!("EA"));
    assert_eq!(doc["public_engagement_events"][0]["event_status"], json!("completed"));

    // The srid column satisfies coverage but is not renamed; the missing
    // canonical coordinate_system is synthesized.
    let gis = &doc["gis_data"][0];
    assert_eq!(gis["gis_id"], json!("g-1"));
    assert_eq!(gis["data_type"], json!("polygon"));
    assert_eq!(gis["coordinate_system"], json!("WGS84"));

    // The repaired document passes schema validation; the free-form GIS
    // purpose field must not fail it.
    let validator = SchemaValidator::new(&model).unwrap();
    let validation = validator.validate(doc);
    assert!(validation.valid, "validation issues: {:?}", validation.issues);

    let mut report = outcome.report;
    report.attach_validation(validation);
    assert!(report.valid);
}

#[test]
fn test_identifier_invariant_across_all_collections() {
    let model = schema();
    let reconciler = Reconciler::new(&model);
    let outcome = reconciler.reconcile_document(&legacy_document()).unwrap();

    for kind in EntityKind::ALL {
        let Some(rows) = outcome.document.get(kind.collection_key()) else {
            continue;
        };
        for row in rows.as_array().unwrap() {
            let id = row
                .get(kind.id_field())
                .unwrap_or_else(|| panic!("{} record lacks {}", kind, kind.id_field()));
            assert!(id.is_string(), "{} identifier not a string: {:?}", kind, id);
        }
    }
}

#[test]
fn test_reconciliation_is_idempotent() {
    let model = schema();
    let reconciler = Reconciler::new(&model);

    let first = reconciler.reconcile_document(&legacy_document()).unwrap();
    let second = reconciler.reconcile_document(&first.document).unwrap();

    assert_eq!(first.document, second.document);
    assert!(
        second.report.fixes.is_empty(),
        "second pass applied fixes: {:?}",
        second.report.fixes
    );
}

#[test]
fn test_coverage_report_for_legacy_document() {
    let model = schema();
    let reconciler = Reconciler::new(&model);
    let outcome = reconciler.reconcile_document(&legacy_document()).unwrap();
    let report = &outcome.report;

    assert_eq!(report.coverage.len(), 6);
    for result in &report.coverage {
        assert!(result.found <= result.total, "{:?}", result);
        assert!(result.valid, "{:?}", result);
    }

    // The srid override satisfies coordinate_system for the gis table.
    let gis = report.coverage.iter().find(|c| c.table == "gis").unwrap();
    assert!(!gis.missing_required.contains(&"coordinate_system".to_string()));
    assert!(!gis.unmatched_source.contains(&"srid".to_string()));

    // Ignored metadata columns never surface as warnings.
    assert!(report.warnings.iter().all(|w| !w.contains("created_at")));
}

#[test]
fn test_bare_gis_record_repaired_but_reported() {
    let model = schema();
    let reconciler = Reconciler::new(&model);

    let outcome = reconciler
        .reconcile_document(&json!({"gis": [{"project_id": 42}]}))
        .unwrap();

    // Coverage flags the missing required columns as hard errors.
    assert!(!outcome.report.valid);
    assert!(outcome
        .report
        .hard_errors
        .iter()
        .any(|e| e.contains("gis_id") && e.contains("'gis'")));

    // The transformer still repairs the record, loudly.
    let gis = &outcome.document["gis_data"][0];
    assert!(gis["gis_id"].as_str().unwrap().starts_with("gis-"));
    assert_eq!(gis["data_type"], json!("point"));
    assert_eq!(gis["coordinate_system"], json!("WGS84"));
    let gis_fixes = outcome
        .report
        .fixes
        .iter()
        .filter(|f| f.table == "gis")
        .count();
    assert!(gis_fixes >= 3, "fixes: {:?}", outcome.report.fixes);
}

#[test]
fn test_tables_mode_round_trip() {
    let model = schema();
    let reconciler = Reconciler::new(&model);

    let row = |v: Value| -> Map<String, Value> { v.as_object().unwrap().clone() };
    let mut tables: BTreeMap<String, Vec<Map<String, Value>>> = BTreeMap::new();
    tables.insert(
        "project".to_string(),
        vec![row(json!({"id": "p-1", "title": "Transmission Line Upgrade", "status": "Planned"}))],
    );
    tables.insert(
        "comment".to_string(),
        vec![row(json!({
            "id": "c-1",
            "process_id": "pr-1",
            "text": "Route crosses wetland",
            "commenter": "R. Okafor",
            "public_acess": "true"
        }))],
    );

    let outcome = reconciler.reconcile_tables(&tables);

    assert_eq!(outcome.document["projects"][0]["project_status"], json!("planned"));
    assert_eq!(
        outcome.document["public_comments"][0]["public_comment_id"],
        json!("c-1")
    );

    // The misspelled column is a soft warning, never silently matched.
    let comment = outcome
        .report
        .coverage
        .iter()
        .find(|c| c.table == "comment")
        .unwrap();
    assert!(comment.unmatched_source.contains(&"public_acess".to_string()));
    assert!(outcome
        .report
        .warnings
        .iter()
        .any(|w| w.contains("public_acess")));
}

#[test]
fn test_empty_root_is_shape_complete_and_validated_downstream() {
    let model = schema();
    let reconciler = Reconciler::new(&model);

    let outcome = reconciler.reconcile_document(&json!({})).unwrap();
    assert_eq!(outcome.document, json!({"projects": []}));
    assert_eq!(outcome.report.fixes.len(), 1);

    // Whether an empty projects array satisfies schema minimums is the
    // validator's call, not the orchestrator's.
    let validator = SchemaValidator::new(&model).unwrap();
    let validation = validator.validate(&outcome.document);
    assert!(validation.valid);
}
