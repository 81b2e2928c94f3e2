//! Custom error types for empenho-report
//!
//! This module defines the error hierarchy for the report pipeline using
//! thiserror. Only schema problems and I/O are fatal; per-field parse
//! failures never surface here, they become `None` on the record.

use thiserror::Error;

/// The main error type for empenho-report operations
#[derive(Error, Debug)]
pub enum EmpenhoError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Invalid user input (dates, ranges, options)
    #[error("Validation error: {0}")]
    Validation(String),

    /// One or more required columns are absent from the input header
    #[error("Missing required column(s): {}", missing.join(", "))]
    MissingColumn { missing: Vec<String> },

    /// Unreadable input (malformed CSV, encoding problems)
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl EmpenhoError {
    /// Create a missing-column error from a list of header names
    pub fn missing_columns<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingColumn {
            missing: headers.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if this is a missing-column (schema) error
    pub fn is_missing_column(&self) -> bool {
        matches!(self, Self::MissingColumn { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for EmpenhoError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for EmpenhoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for EmpenhoError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for EmpenhoError {
    fn from(err: csv::Error) -> Self {
        match err.position() {
            Some(pos) => Self::Import(format!("line {}: {}", pos.line(), err)),
            None => Self::Import(err.to_string()),
        }
    }
}

/// Result type alias for empenho-report operations
pub type EmpenhoResult<T> = Result<T, EmpenhoError>;
