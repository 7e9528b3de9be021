//! Coverage & compatibility analysis.
//!
//! A read-only diagnostic pass: given the field names observed in a source
//! table and the canonical entity it maps onto, report which canonical
//! properties are satisfied, which required ones are missing (hard error),
//! and which source fields have no canonical counterpart (soft warning).
//! Nothing here mutates source data.

use serde::Serialize;
use std::collections::BTreeSet;

use nepa_mapping::FieldMap;
use nepa_schema::EntityDef;

/// Coverage of one source table against its canonical entity.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageResult {
    /// Source table name.
    pub table: String,

    /// Canonical entity name.
    pub entity: String,

    /// Canonical properties satisfied by the source.
    pub found: usize,

    /// Non-ignored canonical properties considered.
    pub total: usize,

    /// Required canonical properties with no source counterpart. Hard
    /// errors: any entry here marks the table invalid.
    pub missing_required: Vec<String>,

    /// Optional canonical properties with no source counterpart.
    pub unmatched_canonical: Vec<String>,

    /// Non-ignored source fields whose mapped name matches no canonical
    /// property.
    pub unmatched_source: Vec<String>,

    /// False when any required property is missing.
    pub valid: bool,
}

/// Analyze one source table against a canonical entity definition.
///
/// Presence is determined per canonical property by trying, in order:
/// direct name match, the curated override table, and reverse-mapping every
/// source field through the rename resolver. Satisfied properties are
/// collected in a set, so a property matched by several rules is still
/// counted once and `found <= total` holds structurally.
pub fn analyze(
    table: &str,
    source_fields: &[String],
    def: &EntityDef,
    map: &FieldMap,
) -> CoverageResult {
    // Resolve every non-ignored source field once.
    let resolved: Vec<(&str, String)> = source_fields
        .iter()
        .filter(|f| !map.is_ignored(f))
        .map(|f| (f.as_str(), map.resolve(table, f)))
        .collect();

    let mut satisfied: BTreeSet<&str> = BTreeSet::new();
    let mut missing_required = Vec::new();
    let mut unmatched_canonical = Vec::new();

    let considered: Vec<&str> = def
        .properties
        .keys()
        .map(String::as_str)
        .filter(|name| !map.is_ignored(name))
        .collect();

    for &name in &considered {
        let direct = resolved.iter().any(|(source, _)| *source == name);
        let via_override = resolved
            .iter()
            .any(|(source, _)| map.coverage_override(table, source) == Some(name));
        let via_mapping = resolved.iter().any(|(_, canonical)| canonical == name);

        if direct || via_override || via_mapping {
            satisfied.insert(name);
        } else if def.is_required(name) {
            missing_required.push(name.to_string());
        } else {
            unmatched_canonical.push(name.to_string());
        }
    }

    // Source fields that land nowhere: neither their mapped name nor an
    // override corresponds to a canonical property.
    let unmatched_source: Vec<String> = resolved
        .iter()
        .filter(|(source, canonical)| {
            !def.properties.contains_key(canonical.as_str())
                && map.coverage_override(table, source).is_none()
        })
        .map(|(source, _)| (*source).to_string())
        .collect();

    let valid = missing_required.is_empty();

    CoverageResult {
        table: table.to_string(),
        entity: def.name.clone(),
        found: satisfied.len(),
        total: considered.len(),
        missing_required,
        unmatched_canonical,
        unmatched_source,
        valid,
    }
}
