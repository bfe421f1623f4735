//! Error types for modview

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for modview
#[derive(Debug, Error)]
pub enum ModviewError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// CSV reader error
    #[error("CSV error: {0}")]
    Csv(String),

    /// Dataset file not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// A required column is absent from a dataset header
    #[error("{dataset}: missing required column '{column}'")]
    MissingColumn { dataset: String, column: String },

    /// A field could not be converted to its declared type
    #[error("{dataset}: row {row}, column '{column}': cannot parse {value:?} as {expected}")]
    MalformedField {
        dataset: String,
        row: usize,
        column: String,
        value: String,
        expected: &'static str,
    },

    /// The same comment id appears twice in one dataset
    #[error("{dataset}: duplicate comment_id {comment_id}")]
    DuplicateCommentId { dataset: String, comment_id: i64 },

    /// The unmoderated and moderated datasets disagree in structure
    #[error("Datasets are structurally different: {0}")]
    ParityMismatch(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for ModviewError {
    fn from(err: toml::de::Error) -> Self {
        ModviewError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for ModviewError {
    fn from(err: toml::ser::Error) -> Self {
        ModviewError::Toml(err.to_string())
    }
}

/// Result type alias for modview
pub type Result<T> = std::result::Result<T, ModviewError>;
