//! Product dimension enrichment.

use etl_common::{column_values, string_column};
use etl_model::{CANONICAL_KEY, CATEGORY_COLUMN, DimensionTable, PRODUCT_NAME_COLUMN};
use polars::prelude::DataFrame;
use tracing::{info, warn};

use crate::error::Result;

/// Lookup outcome counts for one enrichment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentStats {
    pub matched: usize,
    pub unmatched: usize,
}

/// Sets product name and category from the dimension lookup.
///
/// Existing `nombre_del_producto` / `categoria` columns are overwritten;
/// keys without a dimension record get the not-found sentinels.
pub fn enrich(
    df: &DataFrame,
    dimensions: &DimensionTable,
) -> Result<(DataFrame, EnrichmentStats)> {
    if df.column(CANONICAL_KEY).is_err() {
        warn!("No product key column, skipping enrichment");
        return Ok((df.clone(), EnrichmentStats::default()));
    }

    let keys = column_values(df, CANONICAL_KEY)?;
    let mut names = Vec::with_capacity(keys.len());
    let mut categories = Vec::with_capacity(keys.len());
    let mut stats = EnrichmentStats::default();

    for key in &keys {
        let hit = dimensions.resolve(key.as_deref().unwrap_or_default());
        if hit.matched {
            stats.matched += 1;
        } else {
            stats.unmatched += 1;
        }
        names.push(Some(hit.name.to_string()));
        categories.push(Some(hit.category.to_string()));
    }

    let mut out = df.clone();
    out.with_column(string_column(PRODUCT_NAME_COLUMN, names))?;
    out.with_column(string_column(CATEGORY_COLUMN, categories))?;

    info!(
        matched = stats.matched,
        unmatched = stats.unmatched,
        "Enriched rows from product dimension"
    );
    Ok((out, stats))
}
