//! Plain-text column summary.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use etl_model::QualityReport;

use crate::error::{ReportError, Result};

const TITLE: &str = "DATA QUALITY ANALYSIS REPORT";

/// Renders the per-column summary of a quality report.
///
/// Columns appear in table order, each with its detected type, the number and
/// share of problematic cells, and the most frequent problematic values.
pub fn render_column_summary(
    table: &str,
    report: &QualityReport,
    generated_at: NaiveDateTime,
) -> String {
    let mut lines = vec![
        TITLE.to_string(),
        format!("Table: {table}"),
        format!("Date: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
        format!("Rows analyzed: {}", report.total_rows),
        "=".repeat(70),
    ];

    for problem in &report.columns {
        lines.push(String::new());
        lines.push(format!(
            "COLUMN: {} (detected type: {})",
            problem.column, problem.detected_type
        ));
        lines.push("-".repeat(50));
        lines.push(format!(
            "  - Problems found: {} ({:.2}%)",
            problem.total_problematic, problem.percentage
        ));
        if let Some(fill) = &problem.fill_value {
            lines.push(format!("  - Filled with: '{fill}'"));
        }
        lines.push(format!(
            "  - Null values: {}, empty values: {}, distinct values: {}",
            problem.stats.null_values, problem.stats.empty_values, problem.stats.unique_values
        ));
        lines.push("  - Problematic values (top 10):".to_string());
        for (value, count) in &problem.distinct_values {
            lines.push(format!("    - '{value}': {count} times"));
        }
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Writes the column summary to `path`.
pub fn write_column_summary(
    path: &Path,
    table: &str,
    report: &QualityReport,
    generated_at: NaiveDateTime,
) -> Result<()> {
    let text = render_column_summary(table, report, generated_at);
    fs::write(path, text).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
