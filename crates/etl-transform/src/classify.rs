//! Heuristic column type detection.

use std::sync::LazyLock;

use etl_common::{column_values, parse_finite, strip_accents};
use etl_model::{ColumnKind, ColumnKinds};
use polars::prelude::DataFrame;
use regex::Regex;
use tracing::debug;

use crate::error::Result;

/// Share of non-null values that must look like dates.
pub const DATE_PATTERN_THRESHOLD: f64 = 0.3;
/// Share of non-null values that must parse as finite numbers.
pub const NUMERIC_THRESHOLD: f64 = 0.5;
/// Substrings of a folded column name that mark it as a date.
pub const DATE_NAME_KEYWORDS: [&str; 3] = ["fecha", "date", "dia"];

static DATE_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,4}[/-]\d{1,2}[/-]\d{1,4}").expect("Invalid date pattern regex")
});

/// Classifies one column from its name and values.
///
/// Date wins over numeric. The name check runs on the accent-stripped,
/// lower-cased name; value checks only count non-null cells.
pub fn classify(column_name: &str, values: &[Option<String>]) -> ColumnKind {
    let folded = strip_accents(column_name).to_lowercase();
    if DATE_NAME_KEYWORDS
        .iter()
        .any(|keyword| folded.contains(keyword))
    {
        return ColumnKind::Date;
    }

    let present: Vec<&str> = values.iter().filter_map(|value| value.as_deref()).collect();
    if present.is_empty() {
        return ColumnKind::Text;
    }
    let total = present.len() as f64;

    let date_like = present
        .iter()
        .filter(|value| DATE_LIKE.is_match(value))
        .count();
    if date_like as f64 / total > DATE_PATTERN_THRESHOLD {
        return ColumnKind::Date;
    }

    let numeric = present
        .iter()
        .filter(|value| parse_finite(value).is_some())
        .count();
    if numeric as f64 / total > NUMERIC_THRESHOLD {
        return ColumnKind::Numeric;
    }

    ColumnKind::Text
}

/// Classifies every column of a table, in column order.
pub fn classify_frame(df: &DataFrame) -> Result<ColumnKinds> {
    let mut kinds = ColumnKinds::new();
    for name in df.get_column_names() {
        let values = column_values(df, name)?;
        let kind = classify(name, &values);
        debug!(column = %name, kind = %kind, "Classified column");
        kinds.insert(name.as_str(), kind);
    }
    Ok(kinds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(raw: &[Option<&str>]) -> Vec<Option<String>> {
        raw.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn test_date_by_name() {
        assert_eq!(classify("fecha_venta", &[]), ColumnKind::Date);
        assert_eq!(classify("Día", &values(&[Some("lunes")])), ColumnKind::Date);
        assert_eq!(classify("update_date", &values(&[Some("x")])), ColumnKind::Date);
    }

    #[test]
    fn test_date_by_pattern() {
        let col = values(&[Some("01/02/2024"), Some("x"), Some("y")]);
        assert_eq!(classify("momento", &col), ColumnKind::Date);
    }

    #[test]
    fn test_date_pattern_threshold_is_strict() {
        // 3 of 10 is exactly 30%, not more
        let mut raw = vec![Some("2024-01-01"); 3];
        raw.extend(vec![Some("texto"); 7]);
        assert_eq!(classify("momento", &values(&raw)), ColumnKind::Text);
    }

    #[test]
    fn test_numeric() {
        let col = values(&[Some("1"), Some(" 2.5 "), Some("abc"), None, None]);
        assert_eq!(classify("cantidad", &col), ColumnKind::Numeric);
    }

    #[test]
    fn test_numeric_threshold_is_strict() {
        let col = values(&[Some("1"), Some("abc")]);
        assert_eq!(classify("cantidad", &col), ColumnKind::Text);
    }

    #[test]
    fn test_nan_is_not_numeric() {
        let col = values(&[Some("NaN"), Some("inf"), Some("1")]);
        assert_eq!(classify("valor", &col), ColumnKind::Text);
    }

    #[test]
    fn test_all_null_is_text() {
        assert_eq!(classify("cliente", &values(&[None, None])), ColumnKind::Text);
    }
}
