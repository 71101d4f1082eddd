//! Declarative record schemas.

use etl_model::{
    CANONICAL_KEY, CATEGORY_COLUMN, CUSTOMER_COLUMN, PRODUCT_NAME_COLUMN, QUANTITY_COLUMN,
    RECEIPT_COLUMN, RecordKind, SALE_DATE_COLUMN, STOCK_COLUMN, STOCK_DATE_COLUMN,
    UNIT_PRICE_COLUMN,
};
use serde::{Deserialize, Serialize};

/// Largest accepted unit price.
pub const MAX_UNIT_PRICE: f64 = 1_000_000.0;
/// Largest accepted line total (quantity times unit price).
pub const MAX_SALE_TOTAL: f64 = 10_000_000.0;
/// Earliest accepted year for bounded dates.
pub const MIN_DATE_YEAR: i32 = 2000;

/// Target type of a field after coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Int,
    Float,
    Text,
    Date,
}

/// One side of a numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limit {
    pub value: f64,
    pub inclusive: bool,
}

impl Limit {
    pub fn inclusive(value: f64) -> Self {
        Self {
            value,
            inclusive: true,
        }
    }

    pub fn exclusive(value: f64) -> Self {
        Self {
            value,
            inclusive: false,
        }
    }
}

/// Numeric range check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericBounds {
    pub min: Option<Limit>,
    pub max: Option<Limit>,
}

impl NumericBounds {
    /// Returns a violation message for out-of-range values.
    pub fn check(&self, value: f64) -> Option<String> {
        if let Some(min) = self.min {
            let ok = if min.inclusive {
                value >= min.value
            } else {
                value > min.value
            };
            if !ok {
                let op = if min.inclusive { ">=" } else { ">" };
                return Some(format!("must be {op} {}, got {value}", min.value));
            }
        }
        if let Some(max) = self.max {
            let ok = if max.inclusive {
                value <= max.value
            } else {
                value < max.value
            };
            if !ok {
                let op = if max.inclusive { "<=" } else { "<" };
                return Some(format!("must be {op} {}, got {value}", max.value));
            }
        }
        None
    }
}

/// Plausibility window for dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    /// Reject dates after the validation clock.
    pub not_in_future: bool,
    /// Reject dates in earlier years.
    pub min_year: Option<i32>,
}

/// Rule for a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
    pub bounds: NumericBounds,
    pub date_bounds: DateBounds,
    /// Maximum length in characters, after trimming.
    pub max_len: Option<usize>,
    pub uppercase: bool,
    /// Round floats to this many decimals once they pass.
    pub decimals: Option<u32>,
}

impl FieldRule {
    pub fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            required: true,
            bounds: NumericBounds::default(),
            date_bounds: DateBounds::default(),
            max_len: None,
            uppercase: false,
            decimals: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn min(mut self, limit: Limit) -> Self {
        self.bounds.min = Some(limit);
        self
    }

    pub fn max(mut self, limit: Limit) -> Self {
        self.bounds.max = Some(limit);
        self
    }

    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    pub fn decimals(mut self, decimals: u32) -> Self {
        self.decimals = Some(decimals);
        self
    }

    pub fn plausible_date(mut self) -> Self {
        self.date_bounds = DateBounds {
            not_in_future: true,
            min_year: Some(MIN_DATE_YEAR),
        };
        self
    }
}

/// Rule spanning several fields of a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CrossFieldRule {
    /// `left * right` must not exceed `max`.
    MaxProduct {
        left: String,
        right: String,
        max: f64,
    },
}

/// Full schema for one record kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub kind: RecordKind,
    pub fields: Vec<FieldRule>,
    pub cross_rules: Vec<CrossFieldRule>,
}

impl Schema {
    pub fn for_kind(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Category => Self::category(),
            RecordKind::Sales => Self::sales(),
            RecordKind::Stock => Self::stock(),
        }
    }

    /// Product dimension rows.
    pub fn category() -> Self {
        Self {
            kind: RecordKind::Category,
            fields: vec![
                product_code(),
                FieldRule::new(PRODUCT_NAME_COLUMN, FieldType::Text)
                    .max_len(500)
                    .uppercase(),
                FieldRule::new(CATEGORY_COLUMN, FieldType::Text)
                    .max_len(100)
                    .uppercase(),
            ],
            cross_rules: Vec::new(),
        }
    }

    /// Sold line items.
    pub fn sales() -> Self {
        Self {
            kind: RecordKind::Sales,
            fields: vec![
                product_code(),
                FieldRule::new(QUANTITY_COLUMN, FieldType::Float).min(Limit::exclusive(0.0)),
                FieldRule::new(UNIT_PRICE_COLUMN, FieldType::Float)
                    .min(Limit::exclusive(0.0))
                    .max(Limit::inclusive(MAX_UNIT_PRICE))
                    .decimals(2),
                FieldRule::new(SALE_DATE_COLUMN, FieldType::Date).plausible_date(),
                FieldRule::new(RECEIPT_COLUMN, FieldType::Text).optional(),
                FieldRule::new(CUSTOMER_COLUMN, FieldType::Text).optional(),
            ],
            cross_rules: vec![CrossFieldRule::MaxProduct {
                left: QUANTITY_COLUMN.to_string(),
                right: UNIT_PRICE_COLUMN.to_string(),
                max: MAX_SALE_TOTAL,
            }],
        }
    }

    /// Stock snapshots.
    pub fn stock() -> Self {
        Self {
            kind: RecordKind::Stock,
            fields: vec![
                product_code(),
                FieldRule::new(STOCK_COLUMN, FieldType::Int).min(Limit::inclusive(0.0)),
                FieldRule::new(STOCK_DATE_COLUMN, FieldType::Date).optional(),
            ],
            cross_rules: Vec::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.name == name)
    }
}

fn product_code() -> FieldRule {
    FieldRule::new(CANONICAL_KEY, FieldType::Text)
        .max_len(50)
        .uppercase()
}
