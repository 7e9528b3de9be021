//! Migrate command - transform source data into a canonical document.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use nepa_schema::{SchemaModel, SchemaValidator};

use crate::cli::output::{print_coverage_table, print_summary};
use crate::cli::reconcile_inputs;

/// Arguments for the `migrate` command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Authoritative schema document (JSON or YAML)
    #[arg(long)]
    pub schema: PathBuf,

    /// Source inputs: one root document (.json/.yaml) or CSV tables
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Write the canonical document here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Run the canonical document through the schema validator
    #[arg(long)]
    pub validate: bool,

    /// Output {document, report} as one JSON object
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: MigrateArgs) -> Result<ExitCode> {
    let model = SchemaModel::load(&args.schema)
        .with_context(|| format!("Failed to load schema: {}", args.schema.display()))?;

    let mut outcome = reconcile_inputs(&model, &args.inputs)?;

    if args.validate {
        let validator = SchemaValidator::new(&model)?;
        let validation = validator.validate(&outcome.document);
        outcome.report.attach_validation(validation);
    }

    let document = serde_json::to_string_pretty(&outcome.document)?;

    if let Some(path) = &args.output {
        std::fs::write(path, document)
            .with_context(|| format!("Failed to write output: {}", path.display()))?;
        info!(path = %path.display(), "wrote canonical document");
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "document": outcome.document,
                "report": outcome.report,
            }))?
        );
    } else if args.output.is_some() {
        print_coverage_table(&outcome.report.coverage);
        print_summary(&outcome.report);
    } else {
        // Document on stdout; report lines stay on stderr so the output
        // pipes cleanly.
        println!("{}", serde_json::to_string_pretty(&outcome.document)?);
        for fix in &outcome.report.fixes {
            eprintln!("  fix: {}", fix);
        }
        for error in &outcome.report.hard_errors {
            eprintln!("  error: {}", error);
        }
    }

    Ok(if outcome.report.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
