//! Row-level CSV extracts.

use std::path::Path;

use etl_model::{QualityReport, RowError};

use crate::error::{ReportError, Result};

/// Leading columns of the problem-row extract.
pub const INDEX_COLUMN: &str = "indice_original";
pub const CAUSES_COLUMN: &str = "columnas_problematicas";

/// Header of the validation error extract.
pub const VALIDATION_ERROR_HEADER: [&str; 5] = [
    "row_number",
    "field_name",
    "error_message",
    "raw_value",
    "timestamp",
];

/// Writes every problematic row with its original values.
///
/// Each row carries its zero-based table index and the `column(type)` list of
/// the cells that flagged it, followed by the pre-clean values. Returns the
/// number of data rows written.
pub fn write_problem_rows(path: &Path, report: &QualityReport) -> Result<usize> {
    let csv_err = |source: csv::Error| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;

    let columns: Vec<&str> = report
        .rows
        .first()
        .map(|row| row.values.iter().map(|(name, _)| name.as_str()).collect())
        .unwrap_or_default();
    let mut header = vec![INDEX_COLUMN, CAUSES_COLUMN];
    header.extend(columns);
    writer.write_record(&header).map_err(csv_err)?;

    for row in &report.rows {
        let mut record = vec![row.index.to_string(), row.annotation()];
        record.extend(
            row.values
                .iter()
                .map(|(_, value)| value.clone().unwrap_or_default()),
        );
        writer.write_record(&record).map_err(csv_err)?;
    }

    writer.flush().map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(report.rows.len())
}

/// Writes rejected rows, one line per row error.
pub fn write_validation_errors(path: &Path, errors: &[RowError]) -> Result<usize> {
    let csv_err = |source: csv::Error| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer
        .write_record(VALIDATION_ERROR_HEADER)
        .map_err(csv_err)?;

    for error in errors {
        let row_number = error.row_number.to_string();
        let timestamp = error.detected_at.format("%Y-%m-%d %H:%M:%S").to_string();
        writer
            .write_record([
                row_number.as_str(),
                error.field_name.as_deref().unwrap_or_default(),
                error.message.as_str(),
                error.raw_value().unwrap_or_default(),
                timestamp.as_str(),
            ])
            .map_err(csv_err)?;
    }

    writer.flush().map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(errors.len())
}
