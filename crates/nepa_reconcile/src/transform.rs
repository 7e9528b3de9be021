//! Entity transformation.
//!
//! Projects a single source record onto canonical shape: renames fields,
//! rewrites enumerated values, replaces null values with type-appropriate
//! defaults, coerces identifier fields to strings, and recurses into nested
//! objects and arrays when the sub-schema is known.
//!
//! The source record is never mutated - the transformer produces a new
//! canonical record plus the ordered list of repairs it applied. Missing or
//! malformed data degrades to defaults; only a structurally invalid input
//! (a non-object record) is an error.

use chrono::Utc;
use serde_json::{Map, Value};

use nepa_mapping::{enums, FieldMap};
use nepa_schema::{EntityDef, EntityKind, PropertyType, SchemaModel};

use crate::fix::Fix;

/// Structural errors. Data problems are repaired and logged instead.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Record for table '{table}' is not an object")]
    NotAnObject { table: String },

    #[error("Root document is not an object")]
    RootNotAnObject,
}

/// Projects source records onto canonical entities.
pub struct Transformer<'a> {
    model: &'a SchemaModel,
    map: FieldMap,
}

impl<'a> Transformer<'a> {
    pub fn new(model: &'a SchemaModel) -> Self {
        Self {
            model,
            map: FieldMap::new(),
        }
    }

    /// Transform one source record into a canonical record for `def`.
    ///
    /// Returns the canonical record and the fixes applied, in application
    /// order. The canonical record is guaranteed to carry its identifier
    /// property, synthesized if necessary.
    pub fn transform(
        &self,
        record: &Value,
        table: &str,
        def: &EntityDef,
    ) -> Result<(Map<String, Value>, Vec<Fix>), ReconcileError> {
        let Value::Object(fields) = record else {
            return Err(ReconcileError::NotAnObject {
                table: table.to_string(),
            });
        };

        let mut fixes = Vec::new();
        let mut out = self.transform_fields(fields, table, def, &mut fixes);

        self.repair_entity(&mut out, table, def, &mut fixes);

        // Identifier guarantee: a canonical record always carries its id
        // property, even if empty.
        if !out.contains_key(&def.id_field) {
            out.insert(def.id_field.clone(), Value::String(String::new()));
            fixes.push(Fix::new(
                table,
                def.id_field.clone(),
                "synthesized missing identifier (empty string)",
            ));
        }

        Ok((out, fixes))
    }

    /// Null-to-default normalization only (the orchestrator's idempotent
    /// second pass). Declared properties whose value is null are replaced
    /// with their type default; everything else is untouched.
    pub fn normalize_defaults(
        &self,
        record: &mut Map<String, Value>,
        table: &str,
        def: &EntityDef,
        fixes: &mut Vec<Fix>,
    ) {
        for (key, value) in record.iter_mut() {
            let Some(prop) = def.property(key) else {
                continue;
            };

            if value.is_null() && prop.prop_type != PropertyType::Unknown {
                *value = prop.prop_type.default_value();
                fixes.push(Fix::new(
                    table,
                    key.clone(),
                    format!("replaced null with {} default", type_name(prop.prop_type)),
                ));
                continue;
            }

            // Recurse into known nested shapes.
            let Some(nested_key) = prop.nested.as_deref() else {
                continue;
            };
            let Some(nested_def) = self.model.entity(nested_key) else {
                continue;
            };
            match value {
                Value::Object(inner) => {
                    self.normalize_defaults(inner, table, nested_def, fixes);
                }
                Value::Array(items) => {
                    for item in items {
                        if let Value::Object(inner) = item {
                            self.normalize_defaults(inner, table, nested_def, fixes);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// The per-field pipeline: rename, enum rewrite, default fill, id
    /// coercion, nested recursion.
    fn transform_fields(
        &self,
        fields: &Map<String, Value>,
        table: &str,
        def: &EntityDef,
        fixes: &mut Vec<Fix>,
    ) -> Map<String, Value> {
        let mut out = Map::new();

        for (field, source_value) in fields {
            let canonical = self.map.resolve(table, field);
            let prop = def.property(&canonical);
            let mut value = source_value.clone();

            // Enumerated value rewrite.
            if let Some(translate) = enums::translator_for(&canonical) {
                if let Value::String(s) = &value {
                    let translated = translate(s);
                    if translated != *s {
                        fixes.push(Fix::new(
                            table,
                            canonical.clone(),
                            format!("translated enum value '{}' to '{}'", s, translated),
                        ));
                        value = Value::String(translated);
                    }
                }
            }

            // Null to type-appropriate default.
            if value.is_null() {
                if let Some(prop) = prop {
                    if prop.prop_type != PropertyType::Unknown {
                        value = prop.prop_type.default_value();
                        fixes.push(Fix::new(
                            table,
                            canonical.clone(),
                            format!("replaced null with {} default", type_name(prop.prop_type)),
                        ));
                    }
                }
            }

            // Identifier fields are always strings.
            if canonical.ends_with("_id") {
                if let Value::Number(n) = &value {
                    let coerced = n.to_string();
                    fixes.push(Fix::new(
                        table,
                        canonical.clone(),
                        format!("coerced numeric identifier {} to \"{}\"", n, coerced),
                    ));
                    value = Value::String(coerced);
                }
            }

            // Recurse into nested objects / arrays of objects.
            if let Some(nested_def) = prop
                .and_then(|p| p.nested.as_deref())
                .and_then(|key| self.model.entity(key))
            {
                value = match value {
                    Value::Object(inner) => {
                        Value::Object(self.transform_fields(&inner, table, nested_def, fixes))
                    }
                    Value::Array(items) => Value::Array(
                        items
                            .into_iter()
                            .map(|item| match item {
                                Value::Object(inner) => Value::Object(self.transform_fields(
                                    &inner, table, nested_def, fixes,
                                )),
                                other => other,
                            })
                            .collect(),
                    ),
                    other => other,
                };
            }

            // Structural repair: container_inventory is an object; exports
            // sometimes wrap it in an array.
            if canonical == "container_inventory" {
                if let Value::Array(items) = &value {
                    let (collapsed, action) = match items.first() {
                        Some(first) => (first.clone(), "collapsed array to its first element"),
                        None => (Value::Object(Map::new()), "replaced empty array with empty object"),
                    };
                    fixes.push(Fix::new(table, canonical.clone(), action));
                    value = collapsed;
                }
            }

            out.insert(canonical, value);
        }

        out
    }

    /// Entity-specific repairs applied after the field pass.
    fn repair_entity(
        &self,
        record: &mut Map<String, Value>,
        table: &str,
        def: &EntityDef,
        fixes: &mut Vec<Fix>,
    ) {
        if def.name != EntityKind::GisData.as_str() {
            return;
        }

        if !has_value(record, "gis_id") {
            let synthesized = format!("gis-{}", Utc::now().timestamp_millis());
            record.insert("gis_id".to_string(), Value::String(synthesized.clone()));
            fixes.push(Fix::new(
                table,
                "gis_id",
                format!("synthesized identifier '{}'", synthesized),
            ));
        }

        if !has_value(record, "data_type") {
            record.insert("data_type".to_string(), Value::String("point".to_string()));
            fixes.push(Fix::new(table, "data_type", "defaulted to 'point'"));
        }

        if !has_value(record, "coordinate_system") {
            record.insert(
                "coordinate_system".to_string(),
                Value::String("WGS84".to_string()),
            );
            fixes.push(Fix::new(table, "coordinate_system", "defaulted to 'WGS84'"));
        }
    }
}

/// Present with a non-null, non-empty value.
fn has_value(record: &Map<String, Value>, key: &str) -> bool {
    match record.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn type_name(prop_type: PropertyType) -> &'static str {
    match prop_type {
        PropertyType::String => "string",
        PropertyType::Integer => "integer",
        PropertyType::Number => "number",
        PropertyType::Boolean => "boolean",
        PropertyType::Object => "object",
        PropertyType::Array => "array",
        PropertyType::Unknown => "unknown",
    }
}
