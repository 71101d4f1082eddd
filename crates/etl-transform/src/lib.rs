//! Cleaning and standardization of ingested retail tables.
//!
//! Every function here takes a table and returns a new one; the input frame
//! is never modified. The stages run in a fixed order:
//!
//! 1. [`sanitize_column_names`] on the raw headers
//! 2. [`conform`] alias columns onto canonical names
//! 3. [`standardize_key`] on `codigo_producto`
//! 4. [`classify_frame`] once, producing the [`ColumnKinds`] used below
//! 5. [`standardize_text_columns`]
//! 6. [`fill_defaults`]
//! 7. [`enrich`] against the product dimension (gold tier only)
//!
//! [`ColumnKinds`]: etl_model::ColumnKinds

mod classify;
mod conform;
mod enrich;
mod error;
mod fill;
mod key;
mod sanitize;
mod text;

// Error type
pub use error::{Result, TransformError};

// Column names
pub use conform::{ALIAS_GROUPS, AliasGroup, conform};
pub use sanitize::{sanitize, sanitize_column_names};

// Type detection
pub use classify::{
    DATE_NAME_KEYWORDS, DATE_PATTERN_THRESHOLD, NUMERIC_THRESHOLD, classify, classify_frame,
};

// Value standardization
pub use fill::fill_defaults;
pub use key::{standardize_key, standardize_key_value};
pub use text::standardize_text_columns;

// Enrichment
pub use enrich::{EnrichmentStats, enrich};
