//! Product dimension source.

use std::path::Path;

use etl_ingest::extract;
use etl_model::{CategoryRecord, DimensionTable};
use etl_transform::{conform, sanitize_column_names, standardize_key};
use etl_validate::{ValidationContext, validate};
use tracing::{info, info_span, warn};

use crate::error::Result;

/// Loads the product dimension from a category file (CSV or Excel).
///
/// Headers go through the same sanitize and alias steps as any input file,
/// and keys are standardized, so codes match the fact tables. Rows that fail
/// the category schema are skipped.
pub fn load_dimensions(path: &Path) -> Result<DimensionTable> {
    let span = info_span!("load_dimensions", path = %path.display());
    let _guard = span.enter();

    let raw = extract(path)?;
    let names = sanitize_column_names(&raw.headers);
    let df = standardize_key(&conform(&raw.to_frame(&names)?)?)?;

    let result = validate::<CategoryRecord>(&df, &ValidationContext::current())?;
    for error in result.errors() {
        warn!(
            row = error.row_number,
            field = error.field_name.as_deref().unwrap_or("-"),
            reason = %error.message,
            "Skipping dimension row"
        );
    }

    let table: DimensionTable = result.into_records().into_iter().collect();
    info!(products = table.len(), "Dimensions loaded");
    Ok(table)
}
