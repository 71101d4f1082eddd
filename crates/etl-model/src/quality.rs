//! Data-quality report types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::kind::ColumnKind;

/// Distinct problematic values kept per column.
pub const TOP_DISTINCT_VALUES: usize = 10;
/// Sample values kept per column.
pub const SAMPLE_VALUES: usize = 10;

/// General statistics of one column in the pre-clean table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub total_records: usize,
    pub null_values: usize,
    pub empty_values: usize,
    /// Distinct non-null values.
    pub unique_values: usize,
}

/// Problems found in a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProblem {
    pub column: String,
    pub detected_type: ColumnKind,
    pub total_problematic: usize,
    /// Share of all rows, in percent.
    pub percentage: f64,
    /// Problematic raw values with occurrence counts, most frequent first.
    pub distinct_values: Vec<(String, usize)>,
    /// First problematic raw values in row order.
    pub samples: Vec<String>,
    /// Zero-based indices of the affected rows.
    pub affected_rows: Vec<usize>,
    /// Value the cleaning pass substituted, when a single one was used.
    pub fill_value: Option<String>,
    pub stats: ColumnStats,
}

/// One table row with at least one problematic cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemRow {
    pub index: usize,
    /// Columns that caused the row to be flagged, with their detected types.
    pub causes: Vec<(String, ColumnKind)>,
    /// Original (pre-clean) values in column order.
    pub values: Vec<(String, Option<String>)>,
}

impl ProblemRow {
    /// Renders the causes as `column(type); column(type)`.
    pub fn annotation(&self) -> String {
        self.causes
            .iter()
            .map(|(column, kind)| format!("{column}({kind})"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Aggregated data-quality report for one cleaning pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub total_rows: usize,
    /// Problem columns in table column order.
    pub columns: Vec<ColumnProblem>,
    pub problem_rows: BTreeSet<usize>,
    pub rows: Vec<ProblemRow>,
}

impl QualityReport {
    pub fn has_problems(&self) -> bool {
        !self.columns.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnProblem> {
        self.columns.iter().find(|problem| problem.column == name)
    }

    pub fn problem_row_count(&self) -> usize {
        self.problem_rows.len()
    }
}
