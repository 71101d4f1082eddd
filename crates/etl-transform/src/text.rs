//! Text column standardization.

use etl_common::{column_values, fold_upper, string_column};
use etl_model::{CANONICAL_KEY, ColumnKind, ColumnKinds};
use polars::prelude::DataFrame;

use crate::error::Result;

/// Strips accents, trims and upper-cases every text column except the key.
///
/// Nulls stay null. Columns listed in `kinds` but absent from the table are
/// ignored.
pub fn standardize_text_columns(df: &DataFrame, kinds: &ColumnKinds) -> Result<DataFrame> {
    let mut out = df.clone();

    for name in kinds.columns_of(ColumnKind::Text) {
        if name == CANONICAL_KEY || out.column(name).is_err() {
            continue;
        }
        let folded: Vec<Option<String>> = column_values(&out, name)?
            .into_iter()
            .map(|value| value.map(|v| fold_upper(&v)))
            .collect();
        out.with_column(string_column(name, folded))?;
    }

    Ok(out)
}
