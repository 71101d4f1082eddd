//! Statically shaped record types, one per validation schema.
//!
//! Instances are only produced by the validating factory in `etl-validate`,
//! so every field already satisfies its schema constraints.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::columns::{
    CANONICAL_KEY, CATEGORY_COLUMN, PRODUCT_NAME_COLUMN, QUANTITY_COLUMN, STOCK_COLUMN,
    UNIT_PRICE_COLUMN,
};

/// Which record shape a table holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Category,
    Sales,
    Stock,
}

impl RecordKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "category" | "categoria" | "dimension" => Some(Self::Category),
            "sales" | "ventas" => Some(Self::Sales),
            "stock" => Some(Self::Stock),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Sales => "sales",
            Self::Stock => "stock",
        }
    }

    /// Picks a record shape from a conformed column set.
    ///
    /// Sales wins over stock, stock over category; tables without the
    /// canonical key match nothing.
    pub fn detect<S: AsRef<str>>(columns: &[S]) -> Option<Self> {
        let has = |name: &str| columns.iter().any(|column| column.as_ref() == name);
        if !has(CANONICAL_KEY) {
            return None;
        }
        if has(QUANTITY_COLUMN) && has(UNIT_PRICE_COLUMN) {
            Some(Self::Sales)
        } else if has(STOCK_COLUMN) {
            Some(Self::Stock)
        } else if has(PRODUCT_NAME_COLUMN) && has(CATEGORY_COLUMN) {
            Some(Self::Category)
        } else {
            None
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product dimension row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(rename = "codigo_producto")]
    pub product_code: String,
    #[serde(rename = "nombre_del_producto")]
    pub product_name: String,
    #[serde(rename = "categoria")]
    pub category: String,
}

/// One sold line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "codigo_producto")]
    pub product_code: String,
    #[serde(rename = "cantidad")]
    pub quantity: f64,
    #[serde(rename = "precio_unitario")]
    pub unit_price: f64,
    #[serde(rename = "fecha")]
    pub sold_at: NaiveDateTime,
    #[serde(rename = "comprobante_num")]
    pub receipt_number: Option<String>,
    #[serde(rename = "cliente")]
    pub customer: Option<String>,
}

impl SalesRecord {
    /// Line total (quantity times unit price).
    pub fn total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// Stock level snapshot for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    #[serde(rename = "codigo_producto")]
    pub product_code: String,
    #[serde(rename = "stock_disponible")]
    pub available: i64,
    #[serde(rename = "fecha_actualizacion")]
    pub updated_at: Option<NaiveDateTime>,
}
