//! FILENAME: core/grid-engine/src/error.rs

use thiserror::Error;

/// Failures reported by the strict and validating helpers.
/// The pipeline itself never fails; it degrades silently instead.
#[derive(Error, Debug)]
pub enum GridError {
    #[error("Record has no field '{field}' (column '{column}')")]
    MissingField { column: String, field: String },

    #[error("Duplicate column key: {0}")]
    DuplicateColumnKey(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Invalid grid options: {0}")]
    Options(#[from] serde_json::Error),
}
