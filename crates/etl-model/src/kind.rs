//! Detected semantic column types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic type detected for a column.
///
/// Detection happens once per column; the result is threaded through the
/// text standardizer, the quality analyzer and the default fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Date,
    Numeric,
    Text,
}

impl ColumnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKind::Date => "date",
            ColumnKind::Numeric => "numeric",
            ColumnKind::Text => "text",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column kinds in table column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnKinds {
    entries: Vec<(String, ColumnKind)>,
}

impl ColumnKinds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the kind for a column, replacing an earlier entry of the same name.
    pub fn insert(&mut self, column: impl Into<String>, kind: ColumnKind) {
        let column = column.into();
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == column) {
            entry.1 = kind;
        } else {
            self.entries.push((column, kind));
        }
    }

    pub fn get(&self, column: &str) -> Option<ColumnKind> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, kind)| *kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnKind)> {
        self.entries.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    /// Columns of the given kind, in order.
    pub fn columns_of(&self, kind: ColumnKind) -> Vec<&str> {
        self.iter()
            .filter(|(_, candidate)| *candidate == kind)
            .map(|(name, _)| name)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ColumnKind)> for ColumnKinds {
    fn from_iter<I: IntoIterator<Item = (String, ColumnKind)>>(iter: I) -> Self {
        let mut kinds = ColumnKinds::new();
        for (name, kind) in iter {
            kinds.insert(name, kind);
        }
        kinds
    }
}
