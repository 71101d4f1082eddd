//! Default fill for missing and unparseable cells.

use etl_common::{
    FILL_DATE_FORMATS, column_values, is_missing_text, parse_datetime, parse_finite, string_column,
};
use etl_model::{CANONICAL_KEY, ColumnKind, ColumnKinds, DATE_SENTINEL, TEXT_SENTINEL};
use polars::prelude::*;
use tracing::debug;

use crate::error::Result;

/// Applies the per-kind fill policy.
///
/// - date columns become `YYYY-MM-DD` strings, with `1900-01-01` for cells
///   that do not parse;
/// - numeric columns become `Int64`, rounding up, with `0` for cells that do
///   not parse;
/// - text cells that are null or spell a missing marker (including `none`)
///   become `Sin registro`.
///
/// The product key is always filled as text, whatever its detected kind.
pub fn fill_defaults(df: &DataFrame, kinds: &ColumnKinds) -> Result<DataFrame> {
    let mut out = df.clone();

    for (name, kind) in kinds.iter() {
        if out.column(name).is_err() {
            continue;
        }
        let kind = if name == CANONICAL_KEY {
            ColumnKind::Text
        } else {
            kind
        };
        let values = column_values(&out, name)?;
        let mut filled = 0usize;

        let column = match kind {
            ColumnKind::Date => {
                let dates: Vec<Option<String>> = values
                    .iter()
                    .map(|value| {
                        let parsed = value
                            .as_deref()
                            .and_then(|v| parse_datetime(v, &FILL_DATE_FORMATS));
                        Some(match parsed {
                            Some(date) => date.format("%Y-%m-%d").to_string(),
                            None => {
                                filled += 1;
                                DATE_SENTINEL.to_string()
                            }
                        })
                    })
                    .collect();
                string_column(name, dates)
            }
            ColumnKind::Numeric => {
                let numbers: Vec<i64> = values
                    .iter()
                    .map(|value| match value.as_deref().and_then(parse_finite) {
                        Some(number) => number.ceil() as i64,
                        None => {
                            filled += 1;
                            0
                        }
                    })
                    .collect();
                Series::new(name.into(), numbers).into_column()
            }
            ColumnKind::Text => {
                let texts: Vec<Option<String>> = values
                    .into_iter()
                    .map(|value| {
                        if is_missing_text(value.as_deref()) {
                            filled += 1;
                            Some(TEXT_SENTINEL.to_string())
                        } else {
                            value
                        }
                    })
                    .collect();
                string_column(name, texts)
            }
        };

        if filled > 0 {
            debug!(column = name, kind = %kind, filled, "Filled default values");
        }
        out.with_column(column)?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(entries: &[(&str, ColumnKind)]) -> ColumnKinds {
        entries
            .iter()
            .map(|(name, kind)| (name.to_string(), *kind))
            .collect()
    }

    #[test]
    fn test_numeric_fill_rounds_up() {
        let df = df! { "cantidad" => [Some("2.1"), Some("abc"), None, Some("-1.5")] }.unwrap();
        let out = fill_defaults(&df, &kinds(&[("cantidad", ColumnKind::Numeric)])).unwrap();

        let column = out.column("cantidad").unwrap();
        assert_eq!(column.dtype(), &DataType::Int64);
        let values: Vec<Option<i64>> = column.i64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(3), Some(0), Some(0), Some(-1)]);
    }

    #[test]
    fn test_date_fill() {
        let df = df! {
            "fecha" => [Some("15/01/2024"), Some("2024/02/01"), Some("ayer"), None],
        }
        .unwrap();
        let out = fill_defaults(&df, &kinds(&[("fecha", ColumnKind::Date)])).unwrap();
        assert_eq!(
            column_values(&out, "fecha").unwrap(),
            vec![
                Some("2024-01-15".to_string()),
                Some("2024-02-01".to_string()),
                Some("1900-01-01".to_string()),
                Some("1900-01-01".to_string()),
            ]
        );
    }

    #[test]
    fn test_text_fill() {
        let df = df! { "cliente" => [Some("ANA"), Some("None"), Some("NaN"), None, Some("  ")] }
            .unwrap();
        let out = fill_defaults(&df, &kinds(&[("cliente", ColumnKind::Text)])).unwrap();
        assert_eq!(
            column_values(&out, "cliente").unwrap(),
            vec![
                Some("ANA".to_string()),
                Some("Sin registro".to_string()),
                Some("Sin registro".to_string()),
                Some("Sin registro".to_string()),
                Some("  ".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_nulls_remain() {
        let df = df! {
            "fecha" => [None::<&str>, Some("2024-01-01")],
            "cantidad" => [None::<&str>, Some("1")],
            "cliente" => [None::<&str>, Some("x")],
        }
        .unwrap();
        let kinds = kinds(&[
            ("fecha", ColumnKind::Date),
            ("cantidad", ColumnKind::Numeric),
            ("cliente", ColumnKind::Text),
        ]);
        let out = fill_defaults(&df, &kinds).unwrap();
        for column in out.get_columns() {
            assert_eq!(column.null_count(), 0, "{}", column.name());
        }
    }

    #[test]
    fn test_numeric_looking_key_stays_text() {
        let df = df! { "codigo_producto" => [Some("001"), None] }.unwrap();
        let out = fill_defaults(&df, &kinds(&[("codigo_producto", ColumnKind::Numeric)])).unwrap();
        assert_eq!(
            column_values(&out, "codigo_producto").unwrap(),
            vec![Some("001".to_string()), Some("Sin registro".to_string())]
        );
    }
}
