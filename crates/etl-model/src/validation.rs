//! Per-row validation outcomes.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A rejected row.
///
/// `row_number` is 1-based over data rows (the header is not counted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowError {
    pub row_number: usize,
    pub field_name: Option<String>,
    pub message: String,
    /// Raw cell values of the rejected row, in column order.
    pub raw_row: Vec<(String, Option<String>)>,
    pub detected_at: NaiveDateTime,
}

impl RowError {
    /// Raw value of the offending field, when one is identifiable.
    pub fn raw_value(&self) -> Option<&str> {
        let field = self.field_name.as_deref()?;
        self.raw_row
            .iter()
            .find(|(name, _)| name == field)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Zero-based table row index.
    pub fn row_index(&self) -> usize {
        self.row_number.saturating_sub(1)
    }
}

/// Result of validating a single row.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome<R> {
    Valid(R),
    Invalid(RowError),
}

impl<R> ValidationOutcome<R> {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid(_))
    }

    pub fn valid(self) -> Option<R> {
        match self {
            ValidationOutcome::Valid(record) => Some(record),
            ValidationOutcome::Invalid(_) => None,
        }
    }

    pub fn error(&self) -> Option<&RowError> {
        match self {
            ValidationOutcome::Valid(_) => None,
            ValidationOutcome::Invalid(error) => Some(error),
        }
    }
}

/// Counts from one validation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

impl ValidationSummary {
    /// Fraction of valid rows in `[0, 1]`; an empty pass counts as fully valid.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.valid as f64 / self.total as f64
        }
    }
}
