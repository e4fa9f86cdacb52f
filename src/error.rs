//! Error types for hrv-insight

use thiserror::Error;

/// Errors that can occur during analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid sample value at index {index}: {value} is not a finite number")]
    InvalidValue { index: usize, value: f64 },

    #[error("Unparseable sample date: {0}")]
    DateParse(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse sample records: {0}")]
    ParseError(String),

    #[error("Unsupported schema version: expected {expected}, got {actual}")]
    SchemaVersion { expected: String, actual: String },

    #[error("Empty sample series")]
    EmptySeries,
}
