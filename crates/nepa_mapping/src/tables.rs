//! Rename maps, table bindings, and coverage overrides.
//!
//! These tables encode what the legacy exports actually look like. Entries
//! are `(source_field, canonical_field)` pairs per source table; anything not
//! listed resolves through the global map and then falls back to identity.

use nepa_schema::EntityKind;

/// A source table bound to its canonical entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableBinding {
    /// Source table / definition name.
    pub table: &'static str,

    /// Canonical entity this table's records become.
    pub entity: EntityKind,
}

impl TableBinding {
    /// Canonical identifier property for records of this table.
    pub fn id_field(&self) -> &'static str {
        self.entity.id_field()
    }
}

/// Per-table rename maps. Table-specific entries take precedence over
/// [`GLOBAL_RENAMES`].
const TABLE_RENAMES: &[(&str, &[(&str, &str)])] = &[
    (
        "project",
        &[
            ("title", "project_title"),
            ("description", "project_description"),
            ("sponsor", "project_sponsor"),
            ("status", "project_status"),
            ("sector", "project_sector"),
        ],
    ),
    (
        "process",
        &[
            ("status", "process_status"),
            ("type", "process_type"),
            ("start_date", "process_start_date"),
            ("end_date", "process_end_date"),
        ],
    ),
    (
        "document",
        &[
            ("title", "document_title"),
            ("type", "document_type"),
            ("status", "document_status"),
            ("url", "document_url"),
        ],
    ),
    (
        "comment",
        &[
            ("text", "comment_text"),
            ("commenter", "commenter_name"),
            ("date", "comment_date"),
        ],
    ),
    (
        "engagement",
        &[
            ("type", "engagement_type"),
            ("status", "event_status"),
            ("name", "event_name"),
            ("date", "event_date"),
        ],
    ),
    (
        "case_event",
        &[
            ("type", "event_type"),
            ("status", "event_status"),
            ("date", "event_date"),
        ],
    ),
    ("gis", &[("type", "data_type")]),
    ("gis_element", &[("type", "element_type")]),
    (
        "decision_element",
        &[("type", "element_type"), ("date", "decision_date")],
    ),
    (
        "process_model",
        &[("name", "model_name"), ("version", "model_version")],
    ),
    ("decision_payload", &[("type", "payload_type")]),
    (
        "user_role",
        &[
            ("user", "user_name"),
            ("role", "role_name"),
            // In the user table the lead_agency column holds the user's own
            // agency, not the review's lead agency.
            ("lead_agency", "agency_name"),
        ],
    ),
];

/// Fallback renames applied to every table.
const GLOBAL_RENAMES: &[(&str, &str)] = &[
    ("lead_agency", "lead_agency_name"),
    ("cooperating_agencies", "cooperating_agency_names"),
];

/// Source table to canonical entity bindings. Canonical entity names bind to
/// themselves so canonical-shaped input reconciles cleanly.
const TABLE_BINDINGS: &[TableBinding] = &[
    TableBinding { table: "project", entity: EntityKind::Project },
    TableBinding { table: "process", entity: EntityKind::Process },
    TableBinding { table: "document", entity: EntityKind::Document },
    TableBinding { table: "comment", entity: EntityKind::PublicComment },
    TableBinding { table: "public_comment", entity: EntityKind::PublicComment },
    TableBinding { table: "engagement", entity: EntityKind::PublicEngagementEvent },
    TableBinding { table: "public_engagement_event", entity: EntityKind::PublicEngagementEvent },
    TableBinding { table: "case_event", entity: EntityKind::CaseEvent },
    TableBinding { table: "gis", entity: EntityKind::GisData },
    TableBinding { table: "gis_data", entity: EntityKind::GisData },
    TableBinding { table: "gis_element", entity: EntityKind::GisDataElement },
    TableBinding { table: "gis_data_element", entity: EntityKind::GisDataElement },
    TableBinding { table: "legal_structure", entity: EntityKind::LegalStructure },
    TableBinding { table: "decision_element", entity: EntityKind::DecisionElement },
    TableBinding { table: "process_model", entity: EntityKind::ProcessModel },
    TableBinding { table: "decision_payload", entity: EntityKind::DecisionPayload },
    TableBinding { table: "user_role", entity: EntityKind::UserRole },
];

/// Curated special-case equivalences for coverage analysis.
///
/// Each entry is (table, source_field, canonical_field): the source field
/// satisfies the canonical property for that one table, even though no
/// rename applies. Kept as data so the exception set stays auditable.
const COVERAGE_OVERRIDES: &[(&str, &str, &str)] = &[
    ("comment", "commenter_entity", "commenter_name"),
    ("document", "parent_document_id", "related_document_id"),
    ("process", "parent_process_id", "related_process_id"),
    ("gis", "srid", "coordinate_system"),
];

/// Table-specific rename lookup.
pub fn table_rename(table: &str, field: &str) -> Option<&'static str> {
    TABLE_RENAMES
        .iter()
        .find(|(t, _)| *t == table)
        .and_then(|(_, renames)| {
            renames
                .iter()
                .find(|(source, _)| *source == field)
                .map(|(_, canonical)| *canonical)
        })
}

/// Global fallback rename lookup.
pub fn global_rename(field: &str) -> Option<&'static str> {
    GLOBAL_RENAMES
        .iter()
        .find(|(source, _)| *source == field)
        .map(|(_, canonical)| *canonical)
}

/// Binding for a source table, if the table is known.
pub fn table_binding(table: &str) -> Option<TableBinding> {
    TABLE_BINDINGS.iter().copied().find(|b| b.table == table)
}

/// Special-case coverage equivalence for (table, source_field).
pub fn coverage_override(table: &str, source_field: &str) -> Option<&'static str> {
    COVERAGE_OVERRIDES
        .iter()
        .find(|(t, s, _)| *t == table && *s == source_field)
        .map(|(_, _, canonical)| *canonical)
}

/// All known source tables.
pub fn known_tables() -> impl Iterator<Item = &'static str> {
    TABLE_BINDINGS.iter().map(|b| b.table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_rename_hits() {
        assert_eq!(table_rename("project", "title"), Some("project_title"));
        assert_eq!(table_rename("comment", "commenter"), Some("commenter_name"));
        assert_eq!(table_rename("project", "missing"), None);
        assert_eq!(table_rename("missing", "title"), None);
    }

    #[test]
    fn test_bindings_cover_all_entities() {
        for kind in EntityKind::ALL {
            assert!(
                TABLE_BINDINGS.iter().any(|b| b.entity == kind),
                "no table binds to {}",
                kind
            );
        }
    }

    #[test]
    fn test_coverage_override_is_table_scoped() {
        assert_eq!(
            coverage_override("comment", "commenter_entity"),
            Some("commenter_name")
        );
        // The same source field on another table is NOT equivalent.
        assert_eq!(coverage_override("document", "commenter_entity"), None);
        assert_eq!(
            coverage_override("process", "parent_process_id"),
            Some("related_process_id")
        );
    }

    #[test]
    fn test_binding_id_fields() {
        assert_eq!(table_binding("comment").unwrap().id_field(), "public_comment_id");
        assert_eq!(table_binding("gis").unwrap().id_field(), "gis_id");
        assert!(table_binding("nonexistent").is_none());
    }
}
