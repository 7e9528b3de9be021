//! Validate command - run a canonical document through the schema validator.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;

use nepa::readers;
use nepa_schema::{SchemaModel, SchemaValidator};

use crate::cli::output::print_validation;

/// Arguments for the `validate` command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Authoritative schema document (JSON or YAML)
    #[arg(long)]
    pub schema: PathBuf,

    /// Canonical document to validate (.json/.yaml)
    pub document: PathBuf,

    /// Output the validation outcome as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ValidateArgs) -> Result<ExitCode> {
    let model = SchemaModel::load(&args.schema)
        .with_context(|| format!("Failed to load schema: {}", args.schema.display()))?;
    let validator = SchemaValidator::new(&model)?;

    let document = readers::read_document(&args.document)
        .with_context(|| format!("Failed to read document: {}", args.document.display()))?;

    let outcome = validator.validate(&document);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_validation(&outcome);
    }

    Ok(if outcome.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
