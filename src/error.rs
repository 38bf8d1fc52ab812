//! Error types for the kepler-architectures library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum KeplerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column '{0}' in catalog")]
    MissingColumn(String),

    #[error("Invalid value '{value}' at row {row}, column '{column}': expected {expected}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid KOI designation '{value}' at row {row}")]
    InvalidDesignation { row: usize, value: String },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid status pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("No catalog CSV found in {0:?}")]
    NoCatalogFound(PathBuf),

    #[error("Columns clean to the same name '{0}'")]
    DuplicateColumn(String),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, KeplerError>;
