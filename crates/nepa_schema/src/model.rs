//! Schema document model.
//!
//! Parses the authoritative JSON Schema document (JSON or YAML) into a
//! read-only registry of entity definitions. The registry is built once per
//! run and never mutated afterwards.
//!
//! Only the structural subset the reconciliation engine needs is modeled:
//! property names, property types, required sets, and nested sub-schema
//! links. Everything else (enums, formats, minimums) stays in the raw
//! document and is enforced by the [`crate::validator`] wrapper.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::entity::EntityKind;

/// Errors raised while loading or interpreting the schema document.
///
/// Schema failures are fatal: without the authoritative schema there is
/// nothing to reconcile against.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse schema YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid schema document: {0}")]
    Invalid(String),
}

/// Closed set of JSON value shapes a canonical property can take.
///
/// Derived from the schema's `type` keyword. Union types and missing `type`
/// collapse to `Unknown`, which the transformer treats as pass-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
    Unknown,
}

impl PropertyType {
    /// Map a JSON Schema `type` keyword value to a property type.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "string" => PropertyType::String,
            "integer" => PropertyType::Integer,
            "number" => PropertyType::Number,
            "boolean" => PropertyType::Boolean,
            "object" => PropertyType::Object,
            "array" => PropertyType::Array,
            _ => PropertyType::Unknown,
        }
    }

    /// The type-appropriate replacement for a null/missing value.
    pub fn default_value(&self) -> Value {
        match self {
            PropertyType::String => Value::String(String::new()),
            PropertyType::Integer => Value::from(0),
            PropertyType::Number => Value::from(0.0),
            PropertyType::Boolean => Value::Bool(false),
            PropertyType::Object => Value::Object(serde_json::Map::new()),
            PropertyType::Array => Value::Array(Vec::new()),
            PropertyType::Unknown => Value::Null,
        }
    }
}

/// One canonical property of an entity.
#[derive(Debug, Clone)]
pub struct PropertyDef {
    /// Canonical property name.
    pub name: String,

    /// Declared JSON shape.
    pub prop_type: PropertyType,

    /// Registry key of the nested definition, when this property is an
    /// object (or an array of objects) with a known sub-schema.
    pub nested: Option<String>,
}

/// A canonical entity definition: required/optional properties plus nested
/// sub-schema links.
#[derive(Debug, Clone)]
pub struct EntityDef {
    /// Definition name (entity name, or a dotted path for inline sub-schemas).
    pub name: String,

    /// Canonical identifier property.
    pub id_field: String,

    /// Property names that MUST be present on a conforming record.
    pub required: BTreeSet<String>,

    /// All declared properties, by canonical name.
    pub properties: BTreeMap<String, PropertyDef>,
}

impl EntityDef {
    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }
}

/// The parsed, read-only schema registry.
#[derive(Debug, Clone)]
pub struct SchemaModel {
    /// The raw schema document, kept for the validation wrapper.
    pub raw: Value,

    entities: BTreeMap<String, EntityDef>,
}

impl SchemaModel {
    /// Load a schema document from disk. `.yaml`/`.yml` files parse as YAML,
    /// everything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
            .unwrap_or(false);

        let raw: Value = if is_yaml {
            serde_yaml::from_str(&contents)?
        } else {
            serde_json::from_str(&contents)?
        };

        Self::from_value(raw)
    }

    /// Build the registry from an in-memory schema document.
    pub fn from_value(raw: Value) -> Result<Self, SchemaError> {
        let defs = raw
            .get("definitions")
            .or_else(|| raw.get("$defs"))
            .and_then(Value::as_object)
            .ok_or_else(|| {
                SchemaError::Invalid("schema has no definitions/$defs section".to_string())
            })?;

        let mut entities = BTreeMap::new();
        for (name, schema) in defs {
            collect_definition(name, schema, &mut entities);
        }

        if entities.is_empty() {
            return Err(SchemaError::Invalid(
                "definitions section contains no object schemas".to_string(),
            ));
        }

        Ok(Self { raw, entities })
    }

    /// Look up a definition by registry key.
    pub fn entity(&self, name: &str) -> Option<&EntityDef> {
        self.entities.get(name)
    }

    /// Look up a canonical entity's definition.
    pub fn entity_for(&self, kind: EntityKind) -> Option<&EntityDef> {
        self.entities.get(kind.as_str())
    }

    /// All registry keys (canonical entities plus inline sub-schemas).
    pub fn definition_names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }
}

/// Strip a local `$ref` down to its definition name.
fn local_ref_name(reference: &str) -> Option<&str> {
    reference
        .strip_prefix("#/definitions/")
        .or_else(|| reference.strip_prefix("#/$defs/"))
}

/// Recursively register `schema` (and its inline sub-schemas) under `name`.
///
/// Inline object properties and object-array items get dotted registry keys
/// (`project.project_sponsor`) so the transformer can recurse into them
/// without re-walking the raw document.
fn collect_definition(name: &str, schema: &Value, entities: &mut BTreeMap<String, EntityDef>) {
    let Some(props) = schema.get("properties").and_then(Value::as_object) else {
        return;
    };

    let required: BTreeSet<String> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| {
            names
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let mut properties = BTreeMap::new();
    for (prop_name, prop_schema) in props {
        let def = property_def(name, prop_name, prop_schema, entities);
        properties.insert(prop_name.clone(), def);
    }

    let id_field = EntityKind::from_str(name)
        .map(|k| k.id_field().to_string())
        .unwrap_or_else(|_| format!("{}_id", name));

    entities.insert(
        name.to_string(),
        EntityDef {
            name: name.to_string(),
            id_field,
            required,
            properties,
        },
    );
}

/// Build a single property definition, registering inline sub-schemas.
fn property_def(
    parent: &str,
    prop_name: &str,
    prop_schema: &Value,
    entities: &mut BTreeMap<String, EntityDef>,
) -> PropertyDef {
    // $ref-only property: an object link to a named definition.
    if let Some(reference) = prop_schema.get("$ref").and_then(Value::as_str) {
        return PropertyDef {
            name: prop_name.to_string(),
            prop_type: PropertyType::Object,
            nested: local_ref_name(reference).map(str::to_string),
        };
    }

    let prop_type = prop_schema
        .get("type")
        .and_then(Value::as_str)
        .map(PropertyType::from_keyword)
        .unwrap_or(PropertyType::Unknown);

    let nested = match prop_type {
        PropertyType::Object => {
            if prop_schema.get("properties").is_some() {
                let key = format!("{}.{}", parent, prop_name);
                collect_definition(&key, prop_schema, entities);
                Some(key)
            } else {
                None
            }
        }
        PropertyType::Array => nested_item_schema(parent, prop_name, prop_schema, entities),
        _ => None,
    };

    PropertyDef {
        name: prop_name.to_string(),
        prop_type,
        nested,
    }
}

/// Resolve the item schema of an array property, if it describes objects.
fn nested_item_schema(
    parent: &str,
    prop_name: &str,
    prop_schema: &Value,
    entities: &mut BTreeMap<String, EntityDef>,
) -> Option<String> {
    let items = prop_schema.get("items")?;

    if let Some(reference) = items.get("$ref").and_then(Value::as_str) {
        return local_ref_name(reference).map(str::to_string);
    }

    if items.get("properties").is_some() {
        let key = format!("{}.{}", parent, prop_name);
        collect_definition(&key, items, entities);
        return Some(key);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_schema() -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "definitions": {
                "project": {
                    "type": "object",
                    "required": ["project_id", "project_title"],
                    "properties": {
                        "project_id": {"type": "string"},
                        "project_title": {"type": "string"},
                        "project_description": {"type": "string"},
                        "project_sponsor": {
                            "type": "object",
                            "properties": {
                                "sponsor_name": {"type": "string"},
                                "sponsor_type": {"type": "string"}
                            }
                        },
                        "processes": {
                            "type": "array",
                            "items": {"$ref": "#/definitions/process"}
                        }
                    }
                },
                "process": {
                    "type": "object",
                    "required": ["process_id"],
                    "properties": {
                        "process_id": {"type": "string"},
                        "process_status": {"type": "string"},
                        "project_id": {"type": "string"}
                    }
                }
            },
            "properties": {
                "projects": {
                    "type": "array",
                    "items": {"$ref": "#/definitions/project"}
                }
            }
        })
    }

    #[test]
    fn test_parse_entities() {
        let model = SchemaModel::from_value(sample_schema()).unwrap();
        let project = model.entity("project").unwrap();
        assert_eq!(project.id_field, "project_id");
        assert!(project.is_required("project_id"));
        assert!(project.is_required("project_title"));
        assert!(!project.is_required("project_description"));
    }

    #[test]
    fn test_inline_object_registered_with_dotted_key() {
        let model = SchemaModel::from_value(sample_schema()).unwrap();
        let project = model.entity("project").unwrap();
        let sponsor = project.property("project_sponsor").unwrap();
        assert_eq!(sponsor.prop_type, PropertyType::Object);
        assert_eq!(sponsor.nested.as_deref(), Some("project.project_sponsor"));
        assert!(model.entity("project.project_sponsor").is_some());
    }

    #[test]
    fn test_array_ref_items_link_to_definition() {
        let model = SchemaModel::from_value(sample_schema()).unwrap();
        let project = model.entity("project").unwrap();
        let processes = project.property("processes").unwrap();
        assert_eq!(processes.prop_type, PropertyType::Array);
        assert_eq!(processes.nested.as_deref(), Some("process"));
    }

    #[test]
    fn test_missing_definitions_is_fatal() {
        let err = SchemaModel::from_value(json!({"type": "object"})).unwrap_err();
        assert!(matches!(err, SchemaError::Invalid(_)));
    }

    #[test]
    fn test_type_defaults() {
        assert_eq!(PropertyType::String.default_value(), json!(""));
        assert_eq!(PropertyType::Integer.default_value(), json!(0));
        assert_eq!(PropertyType::Boolean.default_value(), json!(false));
        assert_eq!(PropertyType::Object.default_value(), json!({}));
        assert_eq!(PropertyType::Array.default_value(), json!([]));
    }
}
