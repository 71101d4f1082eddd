//! Typed records built from coerced rows.

use etl_model::{
    CANONICAL_KEY, CATEGORY_COLUMN, CUSTOMER_COLUMN, CategoryRecord, PRODUCT_NAME_COLUMN,
    QUANTITY_COLUMN, RECEIPT_COLUMN, RecordKind, SALE_DATE_COLUMN, STOCK_COLUMN,
    STOCK_DATE_COLUMN, SalesRecord, StockRecord, UNIT_PRICE_COLUMN,
};

use crate::coerce::CoercedRow;
use crate::schema::Schema;

/// A record type with a validation schema.
///
/// `from_row` is only called with rows that passed [`Record::schema`], so it
/// returns `None` only when the schema and the record shape disagree.
pub trait Record: Sized {
    const KIND: RecordKind;

    fn schema() -> Schema {
        Schema::for_kind(Self::KIND)
    }

    fn from_row(row: &CoercedRow) -> Option<Self>;
}

impl Record for CategoryRecord {
    const KIND: RecordKind = RecordKind::Category;

    fn from_row(row: &CoercedRow) -> Option<Self> {
        Some(Self {
            product_code: row.text(CANONICAL_KEY)?.to_string(),
            product_name: row.text(PRODUCT_NAME_COLUMN)?.to_string(),
            category: row.text(CATEGORY_COLUMN)?.to_string(),
        })
    }
}

impl Record for SalesRecord {
    const KIND: RecordKind = RecordKind::Sales;

    fn from_row(row: &CoercedRow) -> Option<Self> {
        Some(Self {
            product_code: row.text(CANONICAL_KEY)?.to_string(),
            quantity: row.float(QUANTITY_COLUMN)?,
            unit_price: row.float(UNIT_PRICE_COLUMN)?,
            sold_at: row.date(SALE_DATE_COLUMN)?,
            receipt_number: row.text(RECEIPT_COLUMN).map(str::to_string),
            customer: row.text(CUSTOMER_COLUMN).map(str::to_string),
        })
    }
}

impl Record for StockRecord {
    const KIND: RecordKind = RecordKind::Stock;

    fn from_row(row: &CoercedRow) -> Option<Self> {
        Some(Self {
            product_code: row.text(CANONICAL_KEY)?.to_string(),
            available: row.int(STOCK_COLUMN)?,
            updated_at: row.date(STOCK_DATE_COLUMN),
        })
    }
}
