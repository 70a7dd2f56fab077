//! Error types for the sheetguard library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sheetguard operations.
///
/// Validation itself never fails with one of these; data-quality problems are
/// reported as [`ValidationIssue`](crate::ValidationIssue)s. Errors come from
/// setup work such as loading a template catalog or reading input.
#[derive(Debug, Error)]
pub enum SheetguardError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited text.
    #[error("Expected {expected} fields in line {line}, saw {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Error from the CSV library.
    #[error("{0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no header to read.
    #[error("{0}")]
    EmptyData(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field pattern failed to compile.
    #[error("Invalid pattern for field '{field}' in template '{template}': {source}")]
    InvalidPattern {
        template: String,
        field: String,
        #[source]
        source: regex::Error,
    },

    /// A template definition is internally inconsistent.
    #[error("Invalid template '{template}': {message}")]
    InvalidTemplate { template: String, message: String },

    /// Two templates share an id.
    #[error("Duplicate template id: {0}")]
    DuplicateTemplate(String),
}

/// Result type alias for sheetguard operations.
pub type Result<T> = std::result::Result<T, SheetguardError>;
