//! Report writers for the cleaning pipeline.
//!
//! Every processed table can produce up to three files in the reports
//! directory:
//!
//! - **Column summary** (`reporte_columnas_<table>_<ts>.txt`): problem counts
//!   and top problematic values per column
//! - **Problem rows** (`filas_problematicas_<table>_<ts>.csv`): every flagged
//!   row with its original values
//! - **Validation errors** (`errores_validacion_<table>_<ts>.csv`): one line
//!   per rejected row

mod error;
mod extract;
mod paths;
mod summary;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use etl_model::{QualityReport, RowError};
use tracing::{debug, info};

pub use error::{ReportError, Result};
pub use extract::{
    CAUSES_COLUMN, INDEX_COLUMN, VALIDATION_ERROR_HEADER, write_problem_rows,
    write_validation_errors,
};
pub use paths::{ReportPaths, TIMESTAMP_FORMAT};
pub use summary::{render_column_summary, write_column_summary};

/// Files written by [`write_reports`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenReports {
    pub column_summary: Option<PathBuf>,
    pub problem_rows: Option<PathBuf>,
    pub validation_errors: Option<PathBuf>,
}

impl WrittenReports {
    pub fn is_empty(&self) -> bool {
        self.paths().next().is_none()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        [
            &self.column_summary,
            &self.problem_rows,
            &self.validation_errors,
        ]
        .into_iter()
        .flatten()
        .map(PathBuf::as_path)
    }
}

/// Writes the reports for one table.
///
/// The quality files are only written when the report has problems, the
/// validation extract only when rows were rejected. The directory is created
/// on demand.
pub fn write_reports(
    dir: &Path,
    table: &str,
    report: &QualityReport,
    errors: &[RowError],
    generated_at: NaiveDateTime,
) -> Result<WrittenReports> {
    let mut written = WrittenReports::default();
    if !report.has_problems() && errors.is_empty() {
        info!(table, "No data-quality problems, no reports written");
        return Ok(written);
    }

    fs::create_dir_all(dir).map_err(|source| ReportError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let paths = ReportPaths::new(dir, table, generated_at);

    if report.has_problems() {
        write_column_summary(&paths.column_summary, table, report, generated_at)?;
        info!(
            path = %paths.column_summary.display(),
            columns = report.columns.len(),
            "Column summary written"
        );
        written.column_summary = Some(paths.column_summary);

        let rows = write_problem_rows(&paths.problem_rows, report)?;
        info!(path = %paths.problem_rows.display(), rows, "Problem rows written");
        written.problem_rows = Some(paths.problem_rows);
    } else {
        debug!(table, "No problematic cells");
    }

    if !errors.is_empty() {
        let rows = write_validation_errors(&paths.validation_errors, errors)?;
        info!(
            path = %paths.validation_errors.display(),
            rows,
            "Validation errors written"
        );
        written.validation_errors = Some(paths.validation_errors);
    }

    Ok(written)
}
