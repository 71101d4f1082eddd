//! Report files written for a cleaned table.

use std::collections::BTreeSet;
use std::fs;

use chrono::{NaiveDate, NaiveDateTime};
use etl_model::{ColumnKind, ColumnProblem, ColumnStats, ProblemRow, QualityReport, RowError};
use etl_report::{ReportPaths, render_column_summary, write_reports};

fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 7, 7)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

fn sample_report() -> QualityReport {
    let values = |code: &str, price: Option<&str>| {
        vec![
            ("codigo_producto".to_string(), Some(code.to_string())),
            ("precio_unitario".to_string(), price.map(str::to_string)),
        ]
    };
    QualityReport {
        total_rows: 4,
        columns: vec![ColumnProblem {
            column: "precio_unitario".to_string(),
            detected_type: ColumnKind::Numeric,
            total_problematic: 2,
            percentage: 50.0,
            distinct_values: vec![("<null>".to_string(), 1), ("nan".to_string(), 1)],
            samples: vec!["<null>".to_string(), "nan".to_string()],
            affected_rows: vec![1, 3],
            fill_value: Some("0".to_string()),
            stats: ColumnStats {
                total_records: 4,
                null_values: 1,
                empty_values: 0,
                unique_values: 3,
            },
        }],
        problem_rows: BTreeSet::from([1, 3]),
        rows: vec![
            ProblemRow {
                index: 1,
                causes: vec![("precio_unitario".to_string(), ColumnKind::Numeric)],
                values: values("P2", None),
            },
            ProblemRow {
                index: 3,
                causes: vec![("precio_unitario".to_string(), ColumnKind::Numeric)],
                values: values("P4", Some("nan")),
            },
        ],
    }
}

fn sample_error() -> RowError {
    RowError {
        row_number: 2,
        field_name: Some("precio_unitario".to_string()),
        message: "value must be greater than 0".to_string(),
        raw_row: vec![
            ("codigo_producto".to_string(), Some("P2".to_string())),
            ("precio_unitario".to_string(), Some("-5".to_string())),
        ],
        detected_at: generated_at(),
    }
}

#[test]
fn summary_lists_columns_with_counts_and_values() {
    let text = render_column_summary("ventas", &sample_report(), generated_at());
    assert!(text.starts_with("DATA QUALITY ANALYSIS REPORT\n"));
    assert!(text.contains("Table: ventas"));
    assert!(text.contains("Date: 2025-07-07 10:30:00"));
    assert!(text.contains("COLUMN: precio_unitario (detected type: numeric)"));
    assert!(text.contains("  - Problems found: 2 (50.00%)"));
    assert!(text.contains("    - '<null>': 1 times"));
    assert!(text.contains("    - 'nan': 1 times"));
    assert!(text.contains(&"=".repeat(70)));
}

#[test]
fn writes_all_reports_for_problem_table() {
    let dir = tempfile::tempdir().unwrap();
    let reports_dir = dir.path().join("reports");
    let written = write_reports(
        &reports_dir,
        "ventas",
        &sample_report(),
        &[sample_error()],
        generated_at(),
    )
    .unwrap();

    let expected = ReportPaths::new(&reports_dir, "ventas", generated_at());
    assert_eq!(written.column_summary.as_ref(), Some(&expected.column_summary));
    assert_eq!(written.paths().count(), 3);

    let rows = fs::read_to_string(&expected.problem_rows).unwrap();
    let lines: Vec<&str> = rows.lines().collect();
    assert_eq!(
        lines,
        vec![
            "indice_original,columnas_problematicas,codigo_producto,precio_unitario",
            "1,precio_unitario(numeric),P2,",
            "3,precio_unitario(numeric),P4,nan",
        ]
    );

    let errors = fs::read_to_string(&expected.validation_errors).unwrap();
    let lines: Vec<&str> = errors.lines().collect();
    assert_eq!(
        lines,
        vec![
            "row_number,field_name,error_message,raw_value,timestamp",
            "2,precio_unitario,value must be greater than 0,-5,2025-07-07 10:30:00",
        ]
    );
}

#[test]
fn clean_table_without_errors_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let reports_dir = dir.path().join("reports");
    let report = QualityReport {
        total_rows: 3,
        ..QualityReport::default()
    };
    let written = write_reports(&reports_dir, "stock", &report, &[], generated_at()).unwrap();
    assert!(written.is_empty());
    assert!(!reports_dir.exists());
}

#[test]
fn validation_errors_alone_skip_quality_files() {
    let dir = tempfile::tempdir().unwrap();
    let written = write_reports(
        dir.path(),
        "ventas",
        &QualityReport::default(),
        &[sample_error()],
        generated_at(),
    )
    .unwrap();
    assert!(written.column_summary.is_none());
    assert!(written.problem_rows.is_none());
    assert!(written.validation_errors.unwrap().exists());
}
