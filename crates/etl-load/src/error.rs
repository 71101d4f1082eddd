//! Error types for loading.

use std::io;
use std::path::PathBuf;

use etl_ingest::IngestError;
use etl_validate::ValidateError;
use thiserror::Error;

/// Errors raised by sinks, queues and the dimension source.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Layer or queue directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write CSV table {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Item store or queue file is not valid JSON.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Dimension source could not be extracted.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Dimension source could not be validated.
    #[error(transparent)]
    Validate(#[from] ValidateError),

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for LoadError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl From<etl_transform::TransformError> for LoadError {
    fn from(err: etl_transform::TransformError) -> Self {
        Self::Validate(ValidateError::Transform(err))
    }
}

/// Result type for load operations.
pub type Result<T> = std::result::Result<T, LoadError>;
