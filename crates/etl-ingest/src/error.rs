//! Error types for source extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting a source file.
///
/// Any of these aborts the current file only; the batch carries on.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Source file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extension is neither CSV nor a workbook format.
    #[error("unsupported file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    // === Parsing Errors ===
    /// Malformed CSV content.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Workbook could not be opened or its first sheet read.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// File has no header row.
    #[error("file is empty: {path}")]
    EmptyFile { path: PathBuf },

    /// Column name list does not match the header width.
    #[error("expected {expected} column names, got {actual}")]
    ColumnCount { expected: usize, actual: usize },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, IngestError>;
