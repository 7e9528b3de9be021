//! Output formatting for CLI commands.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use nepa_reconcile::{CoverageResult, Report};
use nepa_schema::ValidationOutcome;

/// Per-table coverage summary.
pub fn print_coverage_table(coverage: &[CoverageResult]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Table",
            "Entity",
            "Coverage",
            "Missing required",
            "Unmatched source",
        ]);

    for result in coverage {
        table.add_row(vec![
            Cell::new(&result.table),
            Cell::new(&result.entity),
            Cell::new(format!("{}/{}", result.found, result.total)),
            Cell::new(result.missing_required.join(", ")),
            Cell::new(result.unmatched_source.join(", ")),
        ]);
    }

    println!("{table}");
}

/// Fix log, hard errors, warnings, and the final verdict.
pub fn print_summary(report: &Report) {
    if !report.fixes.is_empty() {
        println!("Applied {} fix(es):", report.fixes.len());
        for fix in &report.fixes {
            println!("  fix: {}", fix);
        }
    }

    for error in &report.hard_errors {
        println!("  error: {}", error);
    }
    for warning in &report.warnings {
        println!("  warning: {}", warning);
    }

    println!(
        "Coverage {}/{} ({:.0}%) - {}",
        report.found,
        report.total,
        report.coverage_ratio() * 100.0,
        if report.valid { "VALID" } else { "INVALID" }
    );
}

/// Validator issues with their instance paths.
pub fn print_validation(outcome: &ValidationOutcome) {
    for issue in &outcome.issues {
        println!("  error [{}] at '{}': {}", issue.keyword, issue.path, issue.message);
    }
    for issue in &outcome.warnings {
        println!("  warning [{}] at '{}': {}", issue.keyword, issue.path, issue.message);
    }
    if outcome.suppressed > 0 {
        println!("  ({} known false positive(s) suppressed)", outcome.suppressed);
    }
    println!(
        "Validation: {}",
        if outcome.valid { "PASS" } else { "FAIL" }
    );
}
