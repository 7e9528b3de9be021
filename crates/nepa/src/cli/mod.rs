//! CLI command modules.

pub mod check;
pub mod migrate;
pub mod output;
pub mod validate;

use anyhow::{bail, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::warn;

use nepa::readers;
use nepa_reconcile::{Reconciler, RunOutcome};
use nepa_schema::SchemaModel;

/// Load the inputs and run reconciliation.
///
/// Inputs are either one root document (JSON/YAML) or any number of CSV
/// tables. A malformed CSV is reported as a warning and excluded; the run
/// continues with the remaining files. An unreadable root document halts,
/// since there is nothing left to reconcile.
pub fn reconcile_inputs(model: &SchemaModel, inputs: &[PathBuf]) -> Result<RunOutcome> {
    let reconciler = Reconciler::new(model);

    let (tabular, documents): (Vec<_>, Vec<_>) =
        inputs.iter().partition(|p| readers::is_tabular(p));

    if !tabular.is_empty() && !documents.is_empty() {
        bail!("Cannot mix CSV tables and document inputs in one run");
    }

    if !tabular.is_empty() {
        let mut tables: BTreeMap<String, Vec<Map<String, Value>>> = BTreeMap::new();
        let mut file_warnings = Vec::new();

        for path in tabular {
            match readers::read_csv_table(path) {
                Ok((table, rows)) => tables.entry(table).or_default().extend(rows),
                Err(err) => {
                    warn!(path = %path.display(), "skipping unreadable table: {err}");
                    file_warnings.push(format!("Skipped unreadable file: {}", err));
                }
            }
        }

        if tables.is_empty() {
            bail!("No readable CSV inputs");
        }

        let mut outcome = reconciler.reconcile_tables(&tables);
        outcome.report.warnings.extend(file_warnings);
        return Ok(outcome);
    }

    let [document] = documents.as_slice() else {
        bail!("Expected exactly one root document, got {}", documents.len());
    };

    let root = readers::read_document(document)?;
    Ok(reconciler.reconcile_document(&root)?)
}
