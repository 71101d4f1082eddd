//! Row validation over whole tables.

use chrono::{Local, NaiveDateTime};
use etl_common::row_values;
use etl_model::{
    CategoryRecord, RecordKind, RowError, SalesRecord, StockRecord, ValidationOutcome,
    ValidationSummary,
};
use polars::prelude::*;
use tracing::{info, info_span, warn};

use crate::coerce::{CoercedRow, coerce_row};
use crate::error::{Result, ValidateError};
use crate::record::Record;
use crate::schema::Schema;

/// Clock used for date plausibility checks and error timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    pub now: NaiveDateTime,
}

impl ValidationContext {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Context pinned to the local wall clock.
    pub fn current() -> Self {
        Self::new(Local::now().naive_local())
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::current()
    }
}

/// One outcome per table row, in row order.
#[derive(Debug, Clone)]
pub struct ValidationResult<R> {
    pub kind: RecordKind,
    pub outcomes: Vec<ValidationOutcome<R>>,
}

impl<R> ValidationResult<R> {
    pub fn summary(&self) -> ValidationSummary {
        let valid = self.outcomes.iter().filter(|o| o.is_valid()).count();
        ValidationSummary {
            total: self.outcomes.len(),
            valid,
            invalid: self.outcomes.len() - valid,
        }
    }

    /// Rejected rows, in row order.
    pub fn errors(&self) -> Vec<&RowError> {
        self.outcomes
            .iter()
            .filter_map(ValidationOutcome::error)
            .collect()
    }

    /// Mask with `true` for every valid row.
    pub fn valid_mask(&self) -> BooleanChunked {
        let keep: Vec<bool> = self.outcomes.iter().map(|o| o.is_valid()).collect();
        BooleanChunked::from_slice("valid".into(), &keep)
    }

    /// Keeps the valid rows of `df`, which must be the validated table or a
    /// row-aligned derivative of it.
    pub fn filter(&self, df: &DataFrame) -> Result<DataFrame> {
        if df.height() != self.outcomes.len() {
            return Err(ValidateError::ShapeMismatch {
                expected: (self.outcomes.len(), df.width()),
                actual: df.shape(),
            });
        }
        Ok(df.filter(&self.valid_mask())?)
    }

    pub fn into_records(self) -> Vec<R> {
        self.outcomes
            .into_iter()
            .filter_map(ValidationOutcome::valid)
            .collect()
    }

    /// Drops the typed records, keeping outcomes and errors.
    pub fn discard_records(self) -> ValidationResult<()> {
        ValidationResult {
            kind: self.kind,
            outcomes: self
                .outcomes
                .into_iter()
                .map(|outcome| match outcome {
                    ValidationOutcome::Valid(_) => ValidationOutcome::Valid(()),
                    ValidationOutcome::Invalid(error) => ValidationOutcome::Invalid(error),
                })
                .collect(),
        }
    }
}

/// Checks every row of `df` against a schema.
pub fn validate_with_schema(
    df: &DataFrame,
    schema: &Schema,
    ctx: &ValidationContext,
) -> Result<ValidationResult<CoercedRow>> {
    let span = info_span!("validate", kind = %schema.kind, rows = df.height());
    let _guard = span.enter();

    let mut outcomes = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let raw_row = row_values(df, idx)?;
        let outcome = match coerce_row(schema, &raw_row, ctx.now) {
            Ok(row) => ValidationOutcome::Valid(row),
            Err(violation) => ValidationOutcome::Invalid(RowError {
                row_number: idx + 1,
                field_name: violation.field,
                message: violation.message,
                raw_row,
                detected_at: ctx.now,
            }),
        };
        outcomes.push(outcome);
    }

    let result = ValidationResult {
        kind: schema.kind,
        outcomes,
    };
    log_summary(&result);
    Ok(result)
}

/// Validates `df` into typed records of `R`.
pub fn validate<R: Record>(
    df: &DataFrame,
    ctx: &ValidationContext,
) -> Result<ValidationResult<R>> {
    let checked = validate_with_schema(df, &R::schema(), ctx)?;

    let mut outcomes = Vec::with_capacity(checked.outcomes.len());
    for (idx, outcome) in checked.outcomes.into_iter().enumerate() {
        outcomes.push(match outcome {
            ValidationOutcome::Valid(row) => match R::from_row(&row) {
                Some(record) => ValidationOutcome::Valid(record),
                None => ValidationOutcome::Invalid(RowError {
                    row_number: idx + 1,
                    field_name: None,
                    message: format!("row does not match the {} record shape", R::KIND),
                    raw_row: row_values(df, idx)?,
                    detected_at: ctx.now,
                }),
            },
            ValidationOutcome::Invalid(error) => ValidationOutcome::Invalid(error),
        });
    }

    Ok(ValidationResult {
        kind: R::KIND,
        outcomes,
    })
}

/// Validates `df` as the given record kind, without keeping records.
pub fn validate_kind(
    df: &DataFrame,
    kind: RecordKind,
    ctx: &ValidationContext,
) -> Result<ValidationResult<()>> {
    Ok(match kind {
        RecordKind::Category => validate::<CategoryRecord>(df, ctx)?.discard_records(),
        RecordKind::Sales => validate::<SalesRecord>(df, ctx)?.discard_records(),
        RecordKind::Stock => validate::<StockRecord>(df, ctx)?.discard_records(),
    })
}

fn log_summary<R>(result: &ValidationResult<R>) {
    let summary = result.summary();
    let success_rate = format!("{:.1}%", summary.success_rate() * 100.0);
    if summary.invalid > 0 {
        warn!(
            total = summary.total,
            valid = summary.valid,
            invalid = summary.invalid,
            success_rate = %success_rate,
            "Validation rejected rows"
        );
    } else {
        info!(
            total = summary.total,
            valid = summary.valid,
            success_rate = %success_rate,
            "Validation passed"
        );
    }
}
