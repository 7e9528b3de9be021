//! Canonical NEPA Schema Model
//!
//! # Philosophy: One Schema, Many Representations
//!
//! Environmental-review data arrives in three independent shapes:
//!
//! 1. **Relational**: legacy database table exports
//! 2. **Contract**: REST/OpenAPI definition dumps
//! 3. **Tabular**: CSV/YAML/JSON field exports
//!
//! All three are reconciled against ONE authoritative JSON Schema document.
//! This crate owns the read-only model of that document: the closed set of
//! canonical entities, their required/optional properties, and their nested
//! sub-schemas. It does NOT own mapping or transformation - those live in
//! `nepa_mapping` and `nepa_reconcile`.
//!
//! Draft compliance is delegated to the `jsonschema` crate; the
//! [`validator`] module wraps it and interprets its structured errors.
//!
//! # Modules
//!
//! - [`entity`]: The closed `EntityKind` enum (identifier fields, collection keys)
//! - [`model`]: `SchemaModel` / `EntityDef` / `PropertyDef` parsed from the schema document
//! - [`validator`]: `SchemaValidator` wrapper with false-positive filtering

pub mod entity;
pub mod model;
pub mod validator;

pub use entity::EntityKind;
pub use model::{EntityDef, PropertyDef, PropertyType, SchemaError, SchemaModel};
pub use validator::{SchemaValidator, ValidationIssue, ValidationOutcome};
