//! Shared logging utilities for NEPA Reconcile binaries.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str =
    "nepa=info,nepa_reconcile=info,nepa_schema=info,nepa_mapping=info";

/// Logging configuration shared by NEPA Reconcile binaries.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    pub verbose: bool,
}

/// Initialize tracing with a log file and stderr output.
///
/// The file layer writes everything the env filter allows; the console
/// stays at the same level, or drops to `debug` with `verbose`. When no
/// home directory can be determined the file layer is skipped.
pub fn init_logging(config: LogConfig<'_>) -> Result<()> {
    let file_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let console_filter = if config.verbose {
        EnvFilter::new("debug")
    } else {
        file_filter.clone()
    };

    let file_layer = match ensure_logs_dir() {
        Ok(log_dir) => {
            let log_path = log_dir.join(format!("{}.log", config.app_name));
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_filter(file_filter),
            )
        }
        Err(_) => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .init();

    Ok(())
}

/// Get the tool home directory: ~/.nepa_reconcile
pub fn nepa_home() -> PathBuf {
    if let Ok(override_path) = std::env::var("NEPA_HOME") {
        return PathBuf::from(override_path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".nepa_reconcile")
}

/// Get the logs directory: ~/.nepa_reconcile/logs
pub fn logs_dir() -> PathBuf {
    nepa_home().join("logs")
}

/// Ensure the logs directory exists.
pub fn ensure_logs_dir() -> Result<PathBuf> {
    let logs = logs_dir();
    fs::create_dir_all(&logs)
        .with_context(|| format!("Failed to create logs directory: {}", logs.display()))?;
    Ok(logs)
}
