//! End-to-end runs of the layer pipeline over temporary directories.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use etl_cli::config::{EtlConfig, RecordKindSetting};
use etl_cli::pipeline::Pipeline;
use etl_load::{MemoryQueue, MessageQueue, WarehouseSink};
use etl_model::{CategoryRecord, DimensionTable, Layer, RecordKind};
use etl_validate::ValidationContext;

const SALES_CSV: &str = "Código;Artículo;Cantidad;Precio Un.;Fecha;Cliente\n\
                         A01-p001;mouse;2;1500.5;2025-01-10;Ana\n\
                         P002;teclado;1;;2025-01-11;Luis\n\
                         P003;monitor;1;90000;2025-01-12;\n";

fn context() -> ValidationContext {
    ValidationContext::new(
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    )
}

fn dimensions() -> DimensionTable {
    [CategoryRecord {
        product_code: "P001".to_string(),
        product_name: "MOUSE INALAMBRICO".to_string(),
        category: "PERIFERICOS".to_string(),
    }]
    .into_iter()
    .collect()
}

fn config(root: &Path) -> EtlConfig {
    EtlConfig {
        input_dir: root.join("raw"),
        output_dir: root.join("lake"),
        queue_dir: root.join("queue"),
        reports_dir: root.join("reports"),
        ..EtlConfig::default()
    }
}

fn write_inputs(root: &Path) -> (PathBuf, PathBuf) {
    let raw = root.join("raw");
    fs::create_dir_all(&raw).unwrap();
    let broken = raw.join("broken.xlsx");
    fs::write(&broken, b"not a workbook").unwrap();
    let sales = raw.join("Ventas Enero.csv");
    fs::write(&sales, SALES_CSV).unwrap();
    (broken, sales)
}

#[test]
fn broken_file_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let (broken, sales) = write_inputs(dir.path());
    let config = config(dir.path());
    let sink = WarehouseSink::new(&config.output_dir);
    let queue = MemoryQueue::new();
    let dimensions = dimensions();

    let summary = Pipeline::new(&config, &sink, &queue, &dimensions)
        .with_context(context())
        .run_batch(&[broken.clone(), sales]);

    assert!(summary.has_failures());
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].source, broken);
    assert_eq!(summary.files.len(), 1);

    let file = &summary.files[0];
    assert_eq!(file.file_id, "ventas_enero");
    assert_eq!(file.record_kind, Some(RecordKind::Sales));
    assert_eq!(file.bronze_rows, 3);
    assert_eq!(file.rejected_rows, 1);
    assert_eq!(file.silver_rows, 2);
    assert_eq!(file.gold_rows, 2);
    assert_eq!(file.unmatched_keys, 1);
    assert_eq!(file.problem_columns, 2);
    assert_eq!(file.problem_rows, 2);
    assert_eq!(file.reports.paths().count(), 3);
    for path in file.reports.paths() {
        assert!(path.starts_with(&config.reports_dir));
        assert!(path.exists());
    }

    for layer in [Layer::Bronze, Layer::Silver, Layer::Gold] {
        let messages = queue.pending(layer).unwrap();
        assert_eq!(messages.len(), 1, "one {layer} message");
        assert_eq!(messages[0].file_id, "ventas_enero");
    }
    assert_eq!(queue.pending(Layer::Gold).unwrap()[0].row_count, 2);
}

#[test]
fn layers_hold_raw_standardized_and_enriched_rows() {
    let dir = tempfile::tempdir().unwrap();
    let (_, sales) = write_inputs(dir.path());
    let config = config(dir.path());
    let sink = WarehouseSink::new(&config.output_dir);
    let queue = MemoryQueue::new();
    let dimensions = dimensions();

    Pipeline::new(&config, &sink, &queue, &dimensions)
        .with_context(context())
        .process_file(&sales)
        .unwrap();

    let lake = &config.output_dir;
    let bronze = fs::read_to_string(lake.join("bronze/ventas_enero.csv")).unwrap();
    let mut lines = bronze.lines();
    assert_eq!(
        lines.next(),
        Some("codigo,articulo,cantidad,precio_un_,fecha,cliente")
    );
    assert_eq!(lines.next(), Some("A01-p001,mouse,2,1500.5,2025-01-10,Ana"));

    let silver = fs::read_to_string(lake.join("silver/ventas_enero.csv")).unwrap();
    assert!(silver.starts_with("codigo_producto,nombre_del_producto,cantidad,precio_unitario"));
    assert!(silver.contains("P001,"));
    assert!(!silver.contains("P002"));

    let gold = fs::read_to_string(lake.join("gold/ventas_enero.csv")).unwrap();
    assert!(gold.contains("MOUSE INALAMBRICO"));
    assert!(gold.contains("PERIFERICOS"));
    assert!(gold.contains("NO_ENCONTRADO"));
    assert!(gold.contains("SIN_CATEGORIA"));
}

#[test]
fn rerunning_a_file_overwrites_its_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let (_, sales) = write_inputs(dir.path());
    let config = config(dir.path());
    let sink = WarehouseSink::new(&config.output_dir);
    let queue = MemoryQueue::new();
    let dimensions = dimensions();
    let pipeline = Pipeline::new(&config, &sink, &queue, &dimensions).with_context(context());

    pipeline.process_file(&sales).unwrap();
    let first = fs::read_to_string(config.output_dir.join("gold/ventas_enero.csv")).unwrap();
    pipeline.process_file(&sales).unwrap();
    let second = fs::read_to_string(config.output_dir.join("gold/ventas_enero.csv")).unwrap();

    assert_eq!(first, second);
    assert_eq!(queue.len(), 3);
}

#[test]
fn unvalidated_tables_keep_every_row() {
    let dir = tempfile::tempdir().unwrap();
    let (_, sales) = write_inputs(dir.path());
    let config = EtlConfig {
        record_kind: RecordKindSetting::None,
        ..config(dir.path())
    };
    let sink = WarehouseSink::new(&config.output_dir);
    let queue = MemoryQueue::new();
    let dimensions = DimensionTable::new();

    let file = Pipeline::new(&config, &sink, &queue, &dimensions)
        .with_context(context())
        .process_file(&sales)
        .unwrap();

    assert_eq!(file.record_kind, None);
    assert_eq!(file.rejected_rows, 0);
    assert_eq!(file.silver_rows, 3);
    assert_eq!(file.unmatched_keys, 3);
}

#[test]
fn files_with_the_same_sanitized_stem_keep_separate_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let (_, first) = write_inputs(dir.path());
    let second = dir.path().join("raw/ventas-enero.csv");
    fs::write(
        &second,
        "Código;Artículo;Cantidad;Precio Un.;Fecha;Cliente\n\
         P009;parlante;4;2500;2025-02-03;Eva\n",
    )
    .unwrap();
    let config = config(dir.path());
    let sink = WarehouseSink::new(&config.output_dir);
    let queue = MemoryQueue::new();
    let dimensions = dimensions();

    let summary = Pipeline::new(&config, &sink, &queue, &dimensions)
        .with_context(context())
        .run_batch(&[first, second]);

    assert!(!summary.has_failures());
    let ids: Vec<&str> = summary.files.iter().map(|f| f.file_id.as_str()).collect();
    assert_eq!(ids, vec!["ventas_enero", "ventas_enero_2"]);

    let lake = &config.output_dir;
    let first_bronze = fs::read_to_string(lake.join("bronze/ventas_enero.csv")).unwrap();
    assert!(first_bronze.contains("A01-p001"));
    assert!(!first_bronze.contains("P009"));
    let second_bronze = fs::read_to_string(lake.join("bronze/ventas_enero_2.csv")).unwrap();
    assert!(second_bronze.contains("P009"));
    assert!(!second_bronze.contains("A01-p001"));

    let messages = queue.pending(Layer::Bronze).unwrap();
    assert_eq!(messages.len(), 2);
}
