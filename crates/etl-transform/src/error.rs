//! Error types for table transformations.

use thiserror::Error;

/// Errors raised while transforming a table.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_polars_column_maps_to_dataframe_error() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("cantidad".into());
        let err: TransformError = polars_err.into();
        assert!(matches!(err, TransformError::DataFrame { .. }));
        assert!(err.to_string().contains("cantidad"));
    }
}
