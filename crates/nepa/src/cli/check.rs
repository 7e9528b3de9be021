//! Check command - coverage analysis without producing output data.
//!
//! Accepts any of the three source representations: a legacy/canonical root
//! document, CSV tables, or an OpenAPI contract (detected by its `openapi` /
//! `swagger` root key, analyzed coverage-only).

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;

use nepa::readers;
use nepa_reconcile::{Reconciler, Report};
use nepa_schema::SchemaModel;

use crate::cli::output::{print_coverage_table, print_summary};
use crate::cli::reconcile_inputs;

/// Arguments for the `check` command
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Authoritative schema document (JSON or YAML)
    #[arg(long)]
    pub schema: PathBuf,

    /// Source inputs: one root document (.json/.yaml), an OpenAPI contract,
    /// or CSV tables
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output the machine-readable report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CheckArgs) -> Result<ExitCode> {
    let model = SchemaModel::load(&args.schema)
        .with_context(|| format!("Failed to load schema: {}", args.schema.display()))?;

    // A single non-CSV input may be an API contract.
    if let [input] = args.inputs.as_slice() {
        if !readers::is_tabular(input) {
            let root = readers::read_document(input)?;
            let reconciler = Reconciler::new(&model);
            let report = if root.get("openapi").is_some() || root.get("swagger").is_some() {
                reconciler.analyze_contract(&root)?
            } else {
                reconciler.reconcile_document(&root)?.report
            };
            return finish(&args, &report);
        }
    }

    let outcome = reconcile_inputs(&model, &args.inputs)?;
    finish(&args, &outcome.report)
}

fn finish(args: &CheckArgs, report: &Report) -> Result<ExitCode> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_coverage_table(&report.coverage);
        print_summary(report);
    }

    Ok(if report.hard_errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
