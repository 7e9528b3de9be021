//! NEPA Reconcile command-line interface.
//!
//! Three commands around the reconciliation engine:
//! - `check`: coverage analysis of source data against the canonical schema
//! - `migrate`: transform source data into a canonical document
//! - `validate`: run a canonical document through the schema validator

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use nepa_logging::LogConfig;

mod cli;

#[derive(Parser, Debug)]
#[command(
    name = "nepa",
    version,
    about = "Reconcile environmental-review data against the canonical NEPA schema"
)]
struct Cli {
    /// Verbose console logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze coverage of source tables against the canonical schema
    Check(cli::check::CheckArgs),

    /// Transform source data into a canonical document
    Migrate(cli::migrate::MigrateArgs),

    /// Validate a canonical document against the schema
    Validate(cli::validate::ValidateArgs),
}

fn main() -> ExitCode {
    let args = Cli::parse();

    if let Err(err) = nepa_logging::init_logging(LogConfig {
        app_name: "nepa",
        verbose: args.verbose,
    }) {
        eprintln!("warning: failed to initialize logging: {:#}", err);
    }

    let result = match args.command {
        Command::Check(args) => cli::check::run(args),
        Command::Migrate(args) => cli::migrate::run(args),
        Command::Validate(args) => cli::validate::run(args),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
