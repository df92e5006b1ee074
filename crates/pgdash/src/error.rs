//! Error types for the pgdash library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pgdash operations.
///
/// Every variant is fatal for the load that produced it. Cell-level coercion
/// problems never surface here; they resolve to documented defaults.
#[derive(Debug, Error)]
pub enum PgDashError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error fetching a remote source.
    #[error("HTTP error for '{url}': {message}")]
    Http { url: String, message: String },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty source or no data rows.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A column the pipeline cannot do without is absent.
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// The source string could not be interpreted.
    #[error("Invalid source: {0}")]
    InvalidSource(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for pgdash operations.
pub type Result<T> = std::result::Result<T, PgDashError>;
