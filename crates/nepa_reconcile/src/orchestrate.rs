//! Reconciliation orchestration.
//!
//! Drives coverage analysis and transformation across an entire dataset -
//! either a root document containing legacy-shaped top-level collections, or
//! a set of named per-table row sets (CSV input) - and produces one canonical
//! document plus the aggregate report.
//!
//! The orchestrator owns the only accumulator in a run (coverage list + fix
//! log), so report ordering is deterministic for golden-output comparison.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use nepa_mapping::FieldMap;
use nepa_schema::{EntityDef, EntityKind, SchemaModel};

use crate::coverage::{analyze, CoverageResult};
use crate::fix::Fix;
use crate::report::Report;
use crate::transform::{ReconcileError, Transformer};

/// The product of one reconciliation run.
#[derive(Debug)]
pub struct RunOutcome {
    /// The canonical document, shape-complete and suitable for validation.
    pub document: Value,

    /// Aggregate coverage, fixes, and validity.
    pub report: Report,
}

/// Drives reconciliation across a whole dataset.
pub struct Reconciler<'a> {
    model: &'a SchemaModel,
    map: FieldMap,
    transformer: Transformer<'a>,
}

impl<'a> Reconciler<'a> {
    pub fn new(model: &'a SchemaModel) -> Self {
        Self {
            model,
            map: FieldMap::new(),
            transformer: Transformer::new(model),
        }
    }

    /// Reconcile a root document.
    ///
    /// Legacy-shaped top-level keys (named after a source table) are migrated
    /// record-by-record into their canonical collection and removed. Canonical
    /// collections already present receive null-to-default normalization only,
    /// so hand-authored canonical input gets the same default-filling as
    /// migrated legacy input. `projects` is synthesized as an empty array when
    /// absent - the canonical document is always shape-complete.
    pub fn reconcile_document(&self, root: &Value) -> Result<RunOutcome, ReconcileError> {
        let Value::Object(root_map) = root else {
            return Err(ReconcileError::RootNotAnObject);
        };

        let mut doc = root_map.clone();
        let mut coverage = Vec::new();
        let mut fixes = Vec::new();
        let mut warnings = Vec::new();

        // Legacy keys: bound to a source table, but not a canonical
        // collection key. Key order is sorted (serde_json map), so the
        // migration order is deterministic.
        let legacy_tables: Vec<String> = doc
            .keys()
            .filter(|k| EntityKind::from_collection_key(k).is_none())
            .filter(|k| self.map.binding(k).is_some())
            .cloned()
            .collect();

        for table in legacy_tables {
            self.migrate_table(&table, &mut doc, &mut coverage, &mut fixes, &mut warnings);
        }

        self.ensure_projects(&mut doc, &mut fixes);
        self.normalize_canonical_collections(&mut doc, &mut fixes);

        let report = Report::new(coverage, fixes, warnings);
        Ok(RunOutcome {
            document: Value::Object(doc),
            report,
        })
    }

    /// Reconcile named per-table row sets (tabular input) into one canonical
    /// document.
    pub fn reconcile_tables(
        &self,
        tables: &BTreeMap<String, Vec<Map<String, Value>>>,
    ) -> RunOutcome {
        let mut doc = Map::new();
        let mut coverage = Vec::new();
        let mut fixes = Vec::new();
        let mut warnings = Vec::new();

        for (table, rows) in tables {
            let Some((kind, def)) = self.definition_for(table, &mut warnings) else {
                continue;
            };

            let fields = field_union(rows.iter());
            coverage.push(analyze(table, &fields, def, &self.map));

            debug!(table = %table, rows = rows.len(), "transforming table");
            let mut transformed = Vec::with_capacity(rows.len());
            for (index, row) in rows.iter().enumerate() {
                let record = Value::Object(row.clone());
                match self.transformer.transform(&record, table, def) {
                    Ok((canonical, mut applied)) => {
                        fixes.append(&mut applied);
                        transformed.push(Value::Object(canonical));
                    }
                    Err(err) => {
                        warnings.push(format!("Skipped record {} in '{}': {}", index, table, err));
                    }
                }
            }

            append_records(&mut doc, kind.collection_key(), transformed);
        }

        self.ensure_projects(&mut doc, &mut fixes);

        let report = Report::new(coverage, fixes, warnings);
        RunOutcome {
            document: Value::Object(doc),
            report,
        }
    }

    /// Analyze the schema definitions of an OpenAPI/Swagger contract
    /// document against the canonical schema.
    ///
    /// Contracts carry property declarations, not records, so this is
    /// coverage-only: each definition under `components.schemas` (or the
    /// Swagger 2 `definitions`) is matched to a source table by its
    /// snake-cased name and its property names are analyzed. Nothing is
    /// transformed.
    pub fn analyze_contract(&self, api: &Value) -> Result<Report, ReconcileError> {
        let Value::Object(root) = api else {
            return Err(ReconcileError::RootNotAnObject);
        };

        let mut coverage = Vec::new();
        let mut warnings = Vec::new();

        let definitions = root
            .get("components")
            .and_then(|c| c.get("schemas"))
            .or_else(|| root.get("definitions"))
            .and_then(Value::as_object);

        let Some(definitions) = definitions else {
            warnings.push("Contract document has no schema definitions".to_string());
            return Ok(Report::new(coverage, Vec::new(), warnings));
        };

        for (name, schema) in definitions {
            let table = snake_case(name);
            let Some((_, def)) = self.definition_for(&table, &mut warnings) else {
                continue;
            };

            let fields: Vec<String> = schema
                .get("properties")
                .and_then(Value::as_object)
                .map(|props| props.keys().cloned().collect())
                .unwrap_or_default();

            debug!(definition = %name, table = %table, fields = fields.len(), "analyzing contract definition");
            coverage.push(analyze(&table, &fields, def, &self.map));
        }

        Ok(Report::new(coverage, Vec::new(), warnings))
    }

    /// Migrate one legacy top-level collection into its canonical array.
    fn migrate_table(
        &self,
        table: &str,
        doc: &mut Map<String, Value>,
        coverage: &mut Vec<CoverageResult>,
        fixes: &mut Vec<Fix>,
        warnings: &mut Vec<String>,
    ) {
        let Some((kind, def)) = self.definition_for(table, warnings) else {
            return;
        };

        let Some(value) = doc.get(table) else {
            return;
        };
        let Some(rows) = value.as_array().cloned() else {
            warnings.push(format!(
                "Legacy key '{}' is not an array of records; left unchanged",
                table
            ));
            return;
        };

        let fields = field_union(rows.iter().filter_map(Value::as_object));
        coverage.push(analyze(table, &fields, def, &self.map));

        debug!(table = %table, rows = rows.len(), collection = kind.collection_key(), "migrating legacy collection");
        let mut transformed = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            match self.transformer.transform(row, table, def) {
                Ok((canonical, mut applied)) => {
                    fixes.append(&mut applied);
                    transformed.push(Value::Object(canonical));
                }
                Err(err) => {
                    warnings.push(format!("Skipped record {} in '{}': {}", index, table, err));
                }
            }
        }

        append_records(doc, kind.collection_key(), transformed);
        doc.remove(table);
    }

    /// Resolve a table to its entity kind and definition, warning when
    /// either the binding or the definition is missing.
    fn definition_for(
        &self,
        table: &str,
        warnings: &mut Vec<String>,
    ) -> Option<(EntityKind, &EntityDef)> {
        let Some(binding) = self.map.binding(table) else {
            warnings.push(format!("No canonical binding for table '{}'; skipped", table));
            return None;
        };

        match self.model.entity_for(binding.entity) {
            Some(def) => Some((binding.entity, def)),
            None => {
                warnings.push(format!(
                    "Schema has no definition for entity '{}' (table '{}'); skipped",
                    binding.entity, table
                ));
                None
            }
        }
    }

    /// The canonical document always carries the required `projects` array.
    fn ensure_projects(&self, doc: &mut Map<String, Value>, fixes: &mut Vec<Fix>) {
        if !doc.contains_key("projects") {
            doc.insert("projects".to_string(), Value::Array(Vec::new()));
            fixes.push(Fix::new("root", "", "synthesized empty 'projects' array"));
        }
    }

    /// Idempotent second pass: null-to-default normalization over every
    /// canonical collection.
    fn normalize_canonical_collections(&self, doc: &mut Map<String, Value>, fixes: &mut Vec<Fix>) {
        for kind in EntityKind::ALL {
            let key = kind.collection_key();
            let Some(def) = self.model.entity_for(kind) else {
                continue;
            };
            let Some(Value::Array(rows)) = doc.get_mut(key) else {
                continue;
            };
            for row in rows {
                if let Value::Object(record) = row {
                    self.transformer.normalize_defaults(record, key, def, fixes);
                }
            }
        }
    }
}

/// `PublicComment` / `publicComment` -> `public_comment`.
fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Union of field names across a table's records, sorted.
fn field_union<'r>(rows: impl Iterator<Item = &'r Map<String, Value>>) -> Vec<String> {
    let mut fields = BTreeSet::new();
    for row in rows {
        fields.extend(row.keys().cloned());
    }
    fields.into_iter().collect()
}

/// Append transformed records to a canonical collection, creating it if
/// needed.
fn append_records(doc: &mut Map<String, Value>, key: &str, records: Vec<Value>) {
    let entry = doc
        .entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if let Value::Array(existing) = entry {
        existing.extend(records);
    }
}
