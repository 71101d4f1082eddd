//! Report file naming.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

/// Timestamp suffix used in report file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Locations of the reports produced for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub column_summary: PathBuf,
    pub problem_rows: PathBuf,
    pub validation_errors: PathBuf,
}

impl ReportPaths {
    pub fn new(dir: &Path, table: &str, generated_at: NaiveDateTime) -> Self {
        let stamp = generated_at.format(TIMESTAMP_FORMAT);
        Self {
            column_summary: dir.join(format!("reporte_columnas_{table}_{stamp}.txt")),
            problem_rows: dir.join(format!("filas_problematicas_{table}_{stamp}.csv")),
            validation_errors: dir.join(format!("errores_validacion_{table}_{stamp}.csv")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_names_carry_table_and_timestamp() {
        let at = NaiveDate::from_ymd_opt(2025, 7, 7)
            .unwrap()
            .and_hms_opt(9, 5, 3)
            .unwrap();
        let paths = ReportPaths::new(Path::new("reports"), "ventas", at);
        assert_eq!(
            paths.column_summary,
            Path::new("reports/reporte_columnas_ventas_20250707_090503.txt")
        );
        assert_eq!(
            paths.problem_rows,
            Path::new("reports/filas_problematicas_ventas_20250707_090503.csv")
        );
        assert_eq!(
            paths.validation_errors,
            Path::new("reports/errores_validacion_ventas_20250707_090503.csv")
        );
    }
}
