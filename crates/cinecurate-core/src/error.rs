//! Error types for curation operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for curation operations.
pub type Result<T> = std::result::Result<T, CurateError>;

/// Errors that abort a curation run.
#[derive(Debug, Error)]
pub enum CurateError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed table {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Missing column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Invalid value '{value}' for column '{column}' in {path} (line {line})")]
    InvalidField {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CurateError {
    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        CurateError::Csv {
            path: path.into(),
            source,
        }
    }
}
