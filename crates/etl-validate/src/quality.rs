//! Data-quality analysis and the cleaning pass.
//!
//! The report always describes the table as it was before default fill:
//! [`clean_table`] takes the snapshot, fills, then analyzes the pair.

use std::collections::{BTreeMap, BTreeSet};

use etl_common::{any_to_string, column_values, is_problematic, row_values};
use etl_model::{
    ColumnKind, ColumnKinds, ColumnProblem, ColumnStats, ProblemRow, QualityReport,
    SAMPLE_VALUES, TOP_DISTINCT_VALUES,
};
use etl_transform::{classify_frame, fill_defaults};
use polars::prelude::*;
use tracing::{debug, info};

use crate::error::{Result, ValidateError};

/// Display form of a null cell in distinct-value listings.
pub const NULL_DISPLAY: &str = "<null>";

/// Output of the cleaning pass.
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    pub cleaned: DataFrame,
    pub report: QualityReport,
}

/// Fills defaults and reports the problems found in the pre-fill table.
pub fn clean_table(df: &DataFrame, kinds: &ColumnKinds) -> Result<CleaningOutcome> {
    let snapshot = df.clone();
    let cleaned = fill_defaults(df, kinds)?;
    let report = analyze_with_kinds(&snapshot, &cleaned, kinds)?;
    Ok(CleaningOutcome { cleaned, report })
}

/// Analyzes a pre-clean table, classifying its columns first.
pub fn analyze(original: &DataFrame, cleaned: &DataFrame) -> Result<QualityReport> {
    let kinds = classify_frame(original)?;
    analyze_with_kinds(original, cleaned, &kinds)
}

/// Analyzes a pre-clean table against its cleaned counterpart.
///
/// Both tables must have the same shape and column names. Columns missing
/// from `kinds` are reported as text.
pub fn analyze_with_kinds(
    original: &DataFrame,
    cleaned: &DataFrame,
    kinds: &ColumnKinds,
) -> Result<QualityReport> {
    check_aligned(original, cleaned)?;

    let total_rows = original.height();
    let mut report = QualityReport {
        total_rows,
        ..QualityReport::default()
    };
    let mut causes: BTreeMap<usize, Vec<(String, ColumnKind)>> = BTreeMap::new();

    for name in original.get_column_names() {
        let values = column_values(original, name)?;
        let affected_rows: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, value)| is_problematic(value.as_deref()))
            .map(|(idx, _)| idx)
            .collect();
        if affected_rows.is_empty() {
            continue;
        }

        let kind = kinds.get(name).unwrap_or(ColumnKind::Text);
        let problem_values: Vec<&str> = affected_rows
            .iter()
            .map(|&idx| values[idx].as_deref().unwrap_or(NULL_DISPLAY))
            .collect();

        let fill_value = match cleaned.column(name)?.get(affected_rows[0])? {
            AnyValue::Null => None,
            other => Some(any_to_string(other)),
        };

        let problem = ColumnProblem {
            column: name.to_string(),
            detected_type: kind,
            total_problematic: affected_rows.len(),
            percentage: percentage(affected_rows.len(), total_rows),
            distinct_values: top_distinct(&problem_values),
            samples: problem_values
                .iter()
                .take(SAMPLE_VALUES)
                .map(|value| value.to_string())
                .collect(),
            affected_rows: affected_rows.clone(),
            fill_value,
            stats: column_stats(&values),
        };
        debug!(
            column = %name,
            kind = %kind,
            problems = problem.total_problematic,
            "Column has problematic values"
        );

        for &idx in &affected_rows {
            causes.entry(idx).or_default().push((name.to_string(), kind));
            report.problem_rows.insert(idx);
        }
        report.columns.push(problem);
    }

    for (index, row_causes) in causes {
        report.rows.push(ProblemRow {
            index,
            causes: row_causes,
            values: row_values(original, index)?,
        });
    }

    info!(
        rows = total_rows,
        problem_columns = report.columns.len(),
        problem_rows = report.problem_rows.len(),
        "Data quality analysis finished"
    );
    Ok(report)
}

fn check_aligned(original: &DataFrame, cleaned: &DataFrame) -> Result<()> {
    if original.shape() != cleaned.shape() {
        return Err(ValidateError::ShapeMismatch {
            expected: original.shape(),
            actual: cleaned.shape(),
        });
    }
    let expected: Vec<String> = original
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let actual: Vec<String> = cleaned
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    if expected != actual {
        return Err(ValidateError::ColumnMismatch { expected, actual });
    }
    Ok(())
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = count as f64 * 100.0 / total as f64;
    (raw * 100.0).round() / 100.0
}

/// Most frequent first; ties in value order.
fn top_distinct(values: &[&str]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(*value).or_default() += 1;
    }
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(TOP_DISTINCT_VALUES);
    ranked
}

fn column_stats(values: &[Option<String>]) -> ColumnStats {
    let null_values = values.iter().filter(|value| value.is_none()).count();
    let empty_values = values
        .iter()
        .filter(|value| value.as_deref().is_some_and(|v| v.trim().is_empty()))
        .count();
    let unique_values = values
        .iter()
        .filter_map(|value| value.as_deref())
        .collect::<BTreeSet<_>>()
        .len();
    ColumnStats {
        total_records: values.len(),
        null_values,
        empty_values,
        unique_values,
    }
}
