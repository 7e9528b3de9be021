//! Aggregate run report.
//!
//! One report per reconciliation run: per-table coverage, the ordered fix
//! log, hard errors, soft warnings, and (when validation ran) the schema
//! validator's verdict. The aggregate found/total ratio is a reporting
//! statistic only - validity is gated by hard errors and the validator,
//! never by coverage alone.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use nepa_schema::ValidationOutcome;

use crate::coverage::CoverageResult;
use crate::fix::Fix;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Unique identifier for this run.
    pub run_id: Uuid,

    /// When the report was produced.
    pub generated_at: DateTime<Utc>,

    /// Per-table coverage, in processing order.
    pub coverage: Vec<CoverageResult>,

    /// Every applied repair, in application order.
    pub fixes: Vec<Fix>,

    /// Missing-required-property errors. Any entry invalidates the run.
    pub hard_errors: Vec<String>,

    /// Soft warnings: unmatched properties, unmatched source fields,
    /// skipped records and tables.
    pub warnings: Vec<String>,

    /// Canonical properties satisfied, summed across tables.
    pub found: usize,

    /// Canonical properties considered, summed across tables.
    pub total: usize,

    /// Schema validator verdict, when validation ran.
    pub validation: Option<ValidationOutcome>,

    /// True when there are no hard errors and validation (if run) passed.
    pub valid: bool,
}

impl Report {
    /// Aggregate per-table results into a run report.
    pub fn new(coverage: Vec<CoverageResult>, fixes: Vec<Fix>, extra_warnings: Vec<String>) -> Self {
        let mut hard_errors = Vec::new();
        let mut warnings = Vec::new();
        let mut found = 0usize;
        let mut total = 0usize;

        for result in &coverage {
            found += result.found;
            total += result.total;

            for missing in &result.missing_required {
                hard_errors.push(format!(
                    "Required property '{}' missing in '{}'",
                    missing, result.table
                ));
            }
            for unmatched in &result.unmatched_canonical {
                warnings.push(format!(
                    "Optional property '{}' unmatched in '{}'",
                    unmatched, result.table
                ));
            }
            for source in &result.unmatched_source {
                warnings.push(format!(
                    "Unmatched source field '{}' in '{}'",
                    source, result.table
                ));
            }
        }

        warnings.extend(extra_warnings);
        let valid = hard_errors.is_empty();

        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            coverage,
            fixes,
            hard_errors,
            warnings,
            found,
            total,
            validation: None,
            valid,
        }
    }

    /// Fold the schema validator's verdict into the report.
    pub fn attach_validation(&mut self, outcome: ValidationOutcome) {
        self.valid = self.valid && outcome.valid;
        self.validation = Some(outcome);
    }

    /// found/total across all tables, as a fraction. 1.0 when nothing was
    /// considered.
    pub fn coverage_ratio(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.found as f64 / self.total as f64
        }
    }
}
