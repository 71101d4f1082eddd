//! Field coercion against a schema.

use chrono::{Datelike, NaiveDateTime};
use etl_common::{RECORD_DATE_FORMATS, parse_datetime, parse_finite};

use crate::schema::{CrossFieldRule, FieldRule, FieldType, Schema};

/// A field value after coercion to its schema type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDateTime),
}

/// A row whose fields all satisfy their schema rules.
///
/// Optional fields that were absent hold `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoercedRow {
    values: Vec<(String, Option<FieldValue>)>,
}

impl CoercedRow {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(field, _)| field == name)
            .and_then(|(_, value)| value.as_ref())
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric value, widening integers.
    pub fn float(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            FieldValue::Float(value) => Some(*value),
            FieldValue::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            FieldValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn date(&self, name: &str) -> Option<NaiveDateTime> {
        match self.get(name)? {
            FieldValue::Date(value) => Some(*value),
            _ => None,
        }
    }
}

/// First rule a row breaks.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Violation {
    pub field: Option<String>,
    pub message: String,
}

/// Coerces a raw row field by field, stopping at the first violation.
pub(crate) fn coerce_row(
    schema: &Schema,
    raw: &[(String, Option<String>)],
    now: NaiveDateTime,
) -> Result<CoercedRow, Violation> {
    let mut row = CoercedRow::default();

    for rule in &schema.fields {
        let value = raw
            .iter()
            .find(|(name, _)| *name == rule.name)
            .and_then(|(_, value)| value.as_deref());
        let coerced = coerce_field(rule, value, now).map_err(|message| Violation {
            field: Some(rule.name.clone()),
            message,
        })?;
        row.values.push((rule.name.clone(), coerced));
    }

    for cross in &schema.cross_rules {
        match cross {
            CrossFieldRule::MaxProduct { left, right, max } => {
                if let (Some(a), Some(b)) = (row.float(left), row.float(right)) {
                    let product = a * b;
                    if product > *max {
                        return Err(Violation {
                            field: None,
                            message: format!(
                                "{left} * {right} = {product:.2} exceeds the maximum of {max}"
                            ),
                        });
                    }
                }
            }
        }
    }

    Ok(row)
}

/// Coerces one value. Blank values count as absent.
pub(crate) fn coerce_field(
    rule: &FieldRule,
    raw: Option<&str>,
    now: NaiveDateTime,
) -> Result<Option<FieldValue>, String> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return if rule.required {
            Err("field is required".to_string())
        } else {
            Ok(None)
        };
    };

    let coerced = match rule.field_type {
        FieldType::Text => {
            let text = if rule.uppercase {
                value.to_uppercase()
            } else {
                value.to_string()
            };
            if let Some(max_len) = rule.max_len {
                let len = text.chars().count();
                if len > max_len {
                    return Err(format!(
                        "must be at most {max_len} characters, got {len}"
                    ));
                }
            }
            FieldValue::Text(text)
        }
        FieldType::Float => {
            let number = parse_finite(value).ok_or_else(|| format!("not a number: {value}"))?;
            if let Some(message) = rule.bounds.check(number) {
                return Err(message);
            }
            FieldValue::Float(match rule.decimals {
                Some(decimals) => round_to(number, decimals),
                None => number,
            })
        }
        FieldType::Int => {
            let number = parse_finite(value).ok_or_else(|| format!("not a number: {value}"))?;
            if let Some(message) = rule.bounds.check(number) {
                return Err(message);
            }
            FieldValue::Int(number.trunc() as i64)
        }
        FieldType::Date => {
            let date = parse_datetime(value, &RECORD_DATE_FORMATS)
                .ok_or_else(|| format!("unrecognized date format: {value}"))?;
            if rule.date_bounds.not_in_future && date > now {
                return Err(format!("date is in the future: {}", date.format("%Y-%m-%d")));
            }
            if let Some(min_year) = rule.date_bounds.min_year
                && date.year() < min_year
            {
                return Err(format!(
                    "date is before {min_year}: {}",
                    date.format("%Y-%m-%d")
                ));
            }
            FieldValue::Date(date)
        }
    };

    Ok(Some(coerced))
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
