//! Error types for report writing.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Reports directory could not be created.
    #[error("failed to create reports directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write a plain-text report.
    #[error("failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write a CSV extract.
    #[error("failed to write CSV report {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
