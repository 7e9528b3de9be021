//! Field Mapping Table
//!
//! Static lookup data for the reconciliation engine: per-table field renames,
//! global fallback renames, source-table-to-entity bindings, enumerated value
//! translators, ignore rules, and the curated coverage-override list.
//!
//! All tables are read-only configuration. They are compiled in, immutable,
//! and consulted through [`FieldMap`]:
//!
//! - Rename resolution order: table-specific map, then global map, then
//!   identity (the source name unchanged).
//! - A source field literally named `id` always resolves to the bound
//!   entity's canonical identifier field, never to a property named `id`.
//!
//! # Modules
//!
//! - [`tables`]: rename maps, table bindings, coverage overrides
//! - [`enums`]: enumerated value translators (status, document type, ...)
//! - [`ignore`]: metadata/ignore-list membership

pub mod enums;
pub mod ignore;
pub mod tables;

pub use ignore::is_ignored;
pub use tables::{coverage_override, table_binding, TableBinding};

/// Read-only facade over the static mapping tables.
///
/// The analyzer and transformer take this by reference so tests can exercise
/// resolution without touching file I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldMap;

impl FieldMap {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a source field name to its canonical property name.
    pub fn resolve(&self, table: &str, field: &str) -> String {
        // `id` is table-specific: it names the bound entity's identifier.
        if field == "id" {
            if let Some(binding) = tables::table_binding(table) {
                return binding.entity.id_field().to_string();
            }
        }

        if let Some(renamed) = tables::table_rename(table, field) {
            return renamed.to_string();
        }

        if let Some(renamed) = tables::global_rename(field) {
            return renamed.to_string();
        }

        field.to_string()
    }

    /// The canonical entity a source table maps onto, if the table is known.
    pub fn binding(&self, table: &str) -> Option<TableBinding> {
        tables::table_binding(table)
    }

    /// Curated special-case equivalence for coverage analysis.
    pub fn coverage_override(&self, table: &str, source_field: &str) -> Option<&'static str> {
        tables::coverage_override(table, source_field)
    }

    /// Whether a field is invisible to reconciliation.
    pub fn is_ignored(&self, field: &str) -> bool {
        ignore::is_ignored(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_order_table_beats_global() {
        let map = FieldMap::new();
        // `lead_agency` is in the global map; the `user_role` table pins it
        // to the user's own agency instead.
        assert_eq!(map.resolve("user_role", "lead_agency"), "agency_name");
        assert_eq!(map.resolve("document", "lead_agency"), "lead_agency_name");
    }

    #[test]
    fn test_identity_fallback() {
        let map = FieldMap::new();
        assert_eq!(map.resolve("project", "project_title"), "project_title");
        assert_eq!(map.resolve("unknown_table", "anything"), "anything");
    }

    #[test]
    fn test_id_resolves_to_entity_identifier() {
        let map = FieldMap::new();
        assert_eq!(map.resolve("project", "id"), "project_id");
        assert_eq!(map.resolve("comment", "id"), "public_comment_id");
        assert_eq!(map.resolve("gis", "id"), "gis_id");
        // Unknown table: no binding, `id` falls through to identity.
        assert_eq!(map.resolve("mystery", "id"), "id");
    }
}
