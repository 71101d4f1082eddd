//! Queue envelope passed between medallion stages.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Medallion tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Bronze,
    Silver,
    Gold,
}

impl Layer {
    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Bronze => "bronze",
            Layer::Silver => "silver",
            Layer::Gold => "gold",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trigger message emitted after a stage lands its table.
///
/// Delivery is at-least-once; consumers treat repeated messages for the same
/// `file_id` as an overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageMessage {
    pub file_id: String,
    pub row_count: usize,
    pub timestamp: DateTime<Utc>,
}

impl StageMessage {
    pub fn new(file_id: impl Into<String>, row_count: usize) -> Self {
        Self {
            file_id: file_id.into(),
            row_count,
            timestamp: Utc::now(),
        }
    }
}
