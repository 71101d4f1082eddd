//! Error types for validation and quality analysis.

use etl_transform::TransformError;
use thiserror::Error;

/// Errors raised while validating or analyzing a table.
///
/// Row-level violations are not errors; they are reported as
/// [`etl_model::RowError`] values inside a validation result.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// Pre-clean and cleaned tables differ in shape.
    #[error("table shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Pre-clean and cleaned tables differ in column names or order.
    #[error("column mismatch: expected {expected:?}, got {actual:?}")]
    ColumnMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    /// Cleaning pass failed.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for ValidateError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidateError>;
