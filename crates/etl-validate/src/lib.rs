//! Record validation and data-quality analysis.
//!
//! Validation is schema driven: each [`Schema`] lists field rules and
//! cross-field rules, and every table row yields exactly one
//! [`ValidationOutcome`](etl_model::ValidationOutcome). Rows that pass become
//! typed records through the [`Record`] trait.
//!
//! Quality analysis compares a table before and after the default fill and
//! reports every problematic cell of the pre-fill version.
//!
//! # Example
//!
//! ```ignore
//! use etl_model::SalesRecord;
//! use etl_validate::{CleaningOutcome, ValidationContext, clean_table, validate};
//!
//! let result = validate::<SalesRecord>(&df, &ValidationContext::current())?;
//! let CleaningOutcome { cleaned, report } = clean_table(&df, &kinds)?;
//! let silver = result.filter(&cleaned)?;
//! ```

mod coerce;
mod error;
mod quality;
mod record;
mod schema;
mod validator;

// Error type
pub use error::{Result, ValidateError};

// Schemas
pub use schema::{
    CrossFieldRule, DateBounds, FieldRule, FieldType, Limit, MAX_SALE_TOTAL, MAX_UNIT_PRICE,
    MIN_DATE_YEAR, NumericBounds, Schema,
};

// Validation
pub use coerce::{CoercedRow, FieldValue};
pub use record::Record;
pub use validator::{
    ValidationContext, ValidationResult, validate, validate_kind, validate_with_schema,
};

// Data quality
pub use quality::{CleaningOutcome, NULL_DISPLAY, analyze, analyze_with_kinds, clean_table};
