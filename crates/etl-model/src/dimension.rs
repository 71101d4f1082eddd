//! Product dimension lookup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::columns::{NOT_FOUND_CATEGORY, NOT_FOUND_NAME};
use crate::records::CategoryRecord;

/// Display attributes of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionRecord {
    pub name: String,
    pub category: String,
}

/// Name and category resolved for a key, sentinel-filled on a miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment<'a> {
    pub name: &'a str,
    pub category: &'a str,
    pub matched: bool,
}

/// In-memory dimension table keyed by upper-cased product code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimensionTable {
    records: BTreeMap<String, DimensionRecord>,
}

impl DimensionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record; a later insert for the same key overwrites.
    pub fn insert(&mut self, code: &str, record: DimensionRecord) {
        self.records.insert(code.trim().to_uppercase(), record);
    }

    pub fn get(&self, code: &str) -> Option<&DimensionRecord> {
        self.records.get(&code.trim().to_uppercase())
    }

    /// Resolves a key, falling back to the not-found sentinels.
    pub fn resolve(&self, code: &str) -> Enrichment<'_> {
        match self.get(code) {
            Some(record) => Enrichment {
                name: &record.name,
                category: &record.category,
                matched: true,
            },
            None => Enrichment {
                name: NOT_FOUND_NAME,
                category: NOT_FOUND_CATEGORY,
                matched: false,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<CategoryRecord> for DimensionTable {
    fn from_iter<I: IntoIterator<Item = CategoryRecord>>(iter: I) -> Self {
        let mut table = DimensionTable::new();
        for record in iter {
            table.insert(
                &record.product_code,
                DimensionRecord {
                    name: record.product_name,
                    category: record.category,
                },
            );
        }
        table
    }
}
