//! Alias to canonical column renames.

use etl_model::{CANONICAL_KEY, PRODUCT_NAME_COLUMN, STOCK_COLUMN, UNIT_PRICE_COLUMN};
use polars::prelude::DataFrame;
use tracing::{info, warn};

use crate::error::Result;

/// Source spellings of one canonical column.
#[derive(Debug, Clone, Copy)]
pub struct AliasGroup {
    pub canonical: &'static str,
    /// Tried in order; the first one present is renamed.
    pub aliases: &'static [&'static str],
}

/// Alias groups, applied in order.
pub const ALIAS_GROUPS: [AliasGroup; 4] = [
    AliasGroup {
        canonical: CANONICAL_KEY,
        aliases: &["codigo_interno", "cdigo_interno", "cdigo", "codigo", "id"],
    },
    AliasGroup {
        canonical: PRODUCT_NAME_COLUMN,
        aliases: &[
            "nombre_del_articulo",
            "nombre_del_artculo",
            "nombre_articulo",
            "articulo",
        ],
    },
    AliasGroup {
        canonical: UNIT_PRICE_COLUMN,
        aliases: &["precio_un_", "precio_un", "precio"],
    },
    AliasGroup {
        canonical: STOCK_COLUMN,
        aliases: &["stock"],
    },
];

/// Renames alias columns to their canonical names.
///
/// When the canonical name is already present, or was claimed by an earlier
/// alias of the same group, remaining aliases are left as they are.
pub fn conform(df: &DataFrame) -> Result<DataFrame> {
    let mut conformed = df.clone();

    for group in &ALIAS_GROUPS {
        let mut claimed = has_column(&conformed, group.canonical);
        for alias in group.aliases {
            if !has_column(&conformed, alias) {
                continue;
            }
            if claimed {
                warn!(
                    alias = *alias,
                    canonical = group.canonical,
                    "Canonical column already present, alias left unchanged"
                );
                continue;
            }
            conformed.rename(alias, group.canonical.into())?;
            info!(from = *alias, to = group.canonical, "Renamed column");
            claimed = true;
        }
    }

    Ok(conformed)
}

fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|column| column.as_str() == name)
}
