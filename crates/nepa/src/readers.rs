//! Source file readers.
//!
//! Supports the three source representations:
//! - CSV: one table per file, file stem = table name, rows as string maps
//! - JSON: a root document (or a per-definition dump)
//! - YAML: same shapes as JSON
//!
//! A malformed file is an error for THAT file; callers report it and
//! continue with the remaining inputs.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Per-file read errors.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to parse JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse YAML {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Unsupported file extension: {path}")]
    UnsupportedExtension { path: PathBuf },

    #[error("Cannot derive a table name from {path}")]
    MissingStem { path: PathBuf },
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

/// True for inputs that read as per-table CSV rather than a document.
pub fn is_tabular(path: &Path) -> bool {
    extension_of(path) == "csv"
}

/// Read a JSON or YAML document into a value tree.
pub fn read_document(path: &Path) -> Result<Value, ReadError> {
    let contents = fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match extension_of(path).as_str() {
        "json" => serde_json::from_str(&contents).map_err(|source| ReadError::Json {
            path: path.to_path_buf(),
            source,
        }),
        "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|source| ReadError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
        _ => Err(ReadError::UnsupportedExtension {
            path: path.to_path_buf(),
        }),
    }
}

/// Read a CSV file as (table name, rows).
///
/// The table name is the file stem. Empty cells become nulls so the
/// transformer's default-filling is observable; everything else stays a
/// string - identifier coercion and enum translation handle the rest.
pub fn read_csv_table(path: &Path) -> Result<(String, Vec<Map<String, Value>>), ReadError> {
    let table = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .ok_or_else(|| ReadError::MissingStem {
            path: path.to_path_buf(),
        })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| ReadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let headers = reader
        .headers()
        .map_err(|source| ReadError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| ReadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        let mut row = Map::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            let value = if cell.is_empty() {
                Value::Null
            } else {
                Value::String(cell.to_string())
            };
            row.insert(header.to_string(), value);
        }
        rows.push(row);
    }

    Ok((table, rows))
}
