//! Product key standardization.

use std::sync::LazyLock;

use etl_common::{column_values, string_column};
use etl_model::CANONICAL_KEY;
use polars::prelude::DataFrame;
use regex::Regex;
use tracing::debug;

use crate::error::Result;

/// Storage box prefix such as `A04-`.
static BOX_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]\d{2}-").expect("Invalid box prefix regex"));

/// Normalizes a single product key.
///
/// ```
/// use etl_transform::standardize_key_value;
///
/// assert_eq!(standardize_key_value(" a04-mx200 "), "MX200");
/// assert_eq!(standardize_key_value("AB1-X"), "AB1-X");
/// ```
pub fn standardize_key_value(value: &str) -> String {
    let upper = value.trim().to_uppercase();
    BOX_PREFIX.replace(&upper, "").trim().to_string()
}

/// Normalizes every non-null value of `codigo_producto`.
///
/// Tables without the key column are returned unchanged.
pub fn standardize_key(df: &DataFrame) -> Result<DataFrame> {
    if df.column(CANONICAL_KEY).is_err() {
        debug!("No product key column, skipping key standardization");
        return Ok(df.clone());
    }

    let standardized: Vec<Option<String>> = column_values(df, CANONICAL_KEY)?
        .into_iter()
        .map(|value| value.map(|v| standardize_key_value(&v)))
        .collect();

    let mut out = df.clone();
    out.with_column(string_column(CANONICAL_KEY, standardized))?;
    Ok(out)
}
