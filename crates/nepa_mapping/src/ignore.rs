//! Ignore-list membership.
//!
//! A field on the ignore-list is invisible to reconciliation: excluded from
//! coverage totals, from missing-required errors, and from unmatched-field
//! warnings.

/// `parent_*_id` fields that carry required parentage relationships.
///
/// Checked BEFORE the general `parent_` pattern rule.
const PARENT_ID_ALLOWLIST: &[&str] = &[
    "parent_project_id",
    "parent_process_id",
    "parent_document_id",
];

/// Metadata fields present on every legacy table that have no canonical
/// counterpart.
const IGNORED_FIELDS: &[&str] = &[
    "created_at",
    "updated_at",
    "created_by",
    "updated_by",
    "notes",
    "internal_notes",
    "extra",
    "extensions",
    "metadata",
];

/// Whether a field is invisible to reconciliation.
pub fn is_ignored(field: &str) -> bool {
    if PARENT_ID_ALLOWLIST.contains(&field) {
        return false;
    }

    if IGNORED_FIELDS.contains(&field) {
        return true;
    }

    field.ends_with("_json") || field.starts_with('_') || field.starts_with("parent_")
}
