//! # Store Errors
//!
//! Failures while loading the dataset or answering a query.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Data store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Dataset file could not be read
    #[error("Failed to read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Dataset is not valid JSON or does not match the model
    #[error("Malformed dataset: {0}")]
    Json(#[from] serde_json::Error),

    /// Two rows share an identifier that must be unique
    #[error("Duplicate {column} '{value}' in dataset")]
    Duplicate { column: &'static str, value: String },

    /// Backend failed while executing a query
    #[error("Query failed: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
