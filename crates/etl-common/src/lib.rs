//! Shared utilities for the ETL crates.
//!
//! Polars value helpers, missing-value predicates, date parsing and accent
//! folding.

mod dates;
mod frame;
mod missing;
mod text;

pub use dates::{FILL_DATE_FORMATS, RECORD_DATE_FORMATS, parse_datetime};
pub use frame::{
    any_to_string, column_values, format_numeric, parse_f64, parse_finite,
    row_values, string_column,
};
pub use missing::{MISSING_MARKERS, is_missing_text, is_problematic};
pub use text::{fold_upper, strip_accents};
