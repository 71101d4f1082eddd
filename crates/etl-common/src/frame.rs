//! Polars AnyValue utility functions.
//!
//! Every ingested column is a nullable string column; these helpers move
//! values in and out of frames without caring about the physical dtype.

use polars::prelude::*;

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null` and formats floats without trailing
/// zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use etl_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int64(42)), "42");
/// assert_eq!(any_to_string(AnyValue::Float64(2.50)), "2.5");
/// assert_eq!(any_to_string(AnyValue::String("P001")), "P001");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => {
            let s = other.to_string();
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                s[1..s.len() - 1].to_string()
            } else {
                s
            }
        }
    }
}

/// Formats a float without trailing zeros after the decimal point.
///
/// ```
/// use etl_common::format_numeric;
///
/// assert_eq!(format_numeric(40.0), "40");
/// assert_eq!(format_numeric(12.50), "12.5");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

/// Parses a string as `f64`, returning `None` for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Like [`parse_f64`] but rejects `NaN` and infinities.
pub fn parse_finite(value: &str) -> Option<f64> {
    parse_f64(value).filter(|v| v.is_finite())
}

/// Reads a column as optional strings, one entry per row.
pub fn column_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        values.push(match column.get(idx)? {
            AnyValue::Null => None,
            other => Some(any_to_string(other)),
        });
    }
    Ok(values)
}

/// Reads one row as `(column, value)` pairs in column order.
pub fn row_values(df: &DataFrame, idx: usize) -> PolarsResult<Vec<(String, Option<String>)>> {
    let mut row = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let value = match column.get(idx)? {
            AnyValue::Null => None,
            other => Some(any_to_string(other)),
        };
        row.push((column.name().to_string(), value));
    }
    Ok(row)
}

/// Builds a nullable string column.
pub fn string_column(name: &str, values: Vec<Option<String>>) -> Column {
    Series::new(name.into(), values).into_column()
}
