//! Error types for the plotsense library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for plotsense operations.
#[derive(Debug, Error)]
pub enum PlotsenseError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error opening or reading a spreadsheet workbook.
    #[error("Spreadsheet error for '{path}': {message}")]
    Spreadsheet { path: PathBuf, message: String },

    /// Empty file or no data to load.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for plotsense operations.
pub type Result<T> = std::result::Result<T, PlotsenseError>;
