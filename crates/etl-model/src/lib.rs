//! Shared data model for the retail medallion ETL.
//!
//! Types in this crate are plain data: column kinds, record shapes, quality
//! and validation reports, queue envelopes and dimension lookups. The
//! engines that produce them live in `etl-transform` and `etl-validate`.

pub mod columns;
pub mod dimension;
pub mod kind;
pub mod message;
pub mod quality;
pub mod records;
pub mod validation;

pub use columns::{
    CANONICAL_KEY, CATEGORY_COLUMN, CUSTOMER_COLUMN, DATE_SENTINEL, NOT_FOUND_CATEGORY,
    NOT_FOUND_NAME, PRODUCT_NAME_COLUMN, QUANTITY_COLUMN, RECEIPT_COLUMN, SALE_DATE_COLUMN,
    STOCK_COLUMN, STOCK_DATE_COLUMN, TEXT_SENTINEL, UNIT_PRICE_COLUMN,
};
pub use dimension::{DimensionRecord, DimensionTable, Enrichment};
pub use kind::{ColumnKind, ColumnKinds};
pub use message::{Layer, StageMessage};
pub use quality::{
    ColumnProblem, ColumnStats, ProblemRow, QualityReport, SAMPLE_VALUES, TOP_DISTINCT_VALUES,
};
pub use records::{CategoryRecord, RecordKind, SalesRecord, StockRecord};
pub use validation::{RowError, ValidationOutcome, ValidationSummary};
