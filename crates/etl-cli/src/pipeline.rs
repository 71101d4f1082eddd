//! Bronze, silver and gold processing of source files.
//!
//! Each file runs through every stage on its own. A failure stops that file
//! only; the batch moves on and records the error.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use etl_ingest::{extract, list_input_files};
use etl_load::{DirectoryQueue, MessageQueue, TableSink, load_dimensions};
use etl_model::{DimensionTable, Layer, RecordKind, RowError, StageMessage};
use etl_report::{WrittenReports, write_reports};
use etl_transform::{
    classify_frame, conform, enrich, sanitize, sanitize_column_names, standardize_key,
    standardize_text_columns,
};
use etl_validate::{CleaningOutcome, ValidationContext, clean_table, validate_kind};
use polars::prelude::DataFrame;
use tracing::{debug, error, info, info_span, trace, warn};

use crate::config::{EtlConfig, RecordKindSetting};
use crate::logging::redact_value;

/// Identifier used for a source file's tables, messages and reports.
///
/// The sanitized file stem, so reprocessing a file overwrites its outputs.
pub fn file_id(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    let id = sanitize(&stem);
    if id.is_empty() { "file".to_string() } else { id }
}

/// First of `base`, `base_2`, `base_3`, ... not already in `taken`.
fn unique_file_id(base: &str, taken: &BTreeSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}_{n}"))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Counts for one processed file.
#[derive(Debug, Clone, Default)]
pub struct FileSummary {
    pub file_id: String,
    pub source: PathBuf,
    pub record_kind: Option<RecordKind>,
    pub bronze_rows: usize,
    pub silver_rows: usize,
    pub gold_rows: usize,
    pub rejected_rows: usize,
    pub problem_columns: usize,
    pub problem_rows: usize,
    pub unmatched_keys: usize,
    pub reports: WrittenReports,
}

/// A file that could not be processed.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub source: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub files: Vec<FileSummary>,
    pub failures: Vec<FileFailure>,
}

impl BatchSummary {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Stage runner over a sink, a queue and a loaded dimension table.
pub struct Pipeline<'a> {
    reports_dir: &'a Path,
    record_kind: RecordKindSetting,
    sink: &'a dyn TableSink,
    queue: &'a dyn MessageQueue,
    dimensions: &'a DimensionTable,
    ctx: ValidationContext,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: &'a EtlConfig,
        sink: &'a dyn TableSink,
        queue: &'a dyn MessageQueue,
        dimensions: &'a DimensionTable,
    ) -> Self {
        Self {
            reports_dir: &config.reports_dir,
            record_kind: config.record_kind,
            sink,
            queue,
            dimensions,
            ctx: ValidationContext::current(),
        }
    }

    /// Pins the validation clock.
    #[must_use]
    pub fn with_context(mut self, ctx: ValidationContext) -> Self {
        self.ctx = ctx;
        self
    }

    /// Processes every file, isolating failures per file.
    ///
    /// Files whose stems sanitize to the same id get numbered suffixes in
    /// input order, so no file overwrites another's outputs.
    pub fn run_batch(&self, paths: &[PathBuf]) -> BatchSummary {
        let mut summary = BatchSummary::default();
        let mut taken = BTreeSet::new();
        for path in paths {
            let base = file_id(path);
            let id = unique_file_id(&base, &taken);
            if id != base {
                warn!(
                    path = %path.display(),
                    base = %base,
                    file_id = %id,
                    "File id already used in this batch, renamed"
                );
            }
            taken.insert(id.clone());
            match self.process_file_as(path, &id) {
                Ok(file) => summary.files.push(file),
                Err(err) => {
                    let message = format!("{err:#}");
                    error!(path = %path.display(), error = %message, "File failed, skipping");
                    summary.failures.push(FileFailure {
                        source: path.clone(),
                        error: message,
                    });
                }
            }
        }
        info!(
            processed = summary.files.len(),
            failed = summary.failures.len(),
            "Batch finished"
        );
        summary
    }

    /// Runs one file through all three layers.
    pub fn process_file(&self, path: &Path) -> Result<FileSummary> {
        self.process_file_as(path, &file_id(path))
    }

    fn process_file_as(&self, path: &Path, file_id: &str) -> Result<FileSummary> {
        let span = info_span!("file", file_id = %file_id);
        let _guard = span.enter();
        let start = Instant::now();

        let mut summary = FileSummary {
            file_id: file_id.to_string(),
            source: path.to_path_buf(),
            ..FileSummary::default()
        };

        // Bronze: raw values under sanitized names.
        let bronze = self.bronze(path, file_id)?;
        summary.bronze_rows = bronze.height();

        // Silver: standardized, validated and filled.
        let conformed = standardize_key(&conform(&bronze)?)?;
        let kinds = classify_frame(&conformed)?;
        let standardized = standardize_text_columns(&conformed, &kinds)?;

        let columns: Vec<String> = standardized
            .get_column_names()
            .iter()
            .map(|name| name.as_str().to_string())
            .collect();
        summary.record_kind = self.record_kind.resolve(&columns);
        let validation = match summary.record_kind {
            Some(kind) => Some(
                validate_kind(&standardized, kind, &self.ctx)
                    .with_context(|| format!("validate {file_id} as {kind}"))?,
            ),
            None => {
                warn!("No record schema matches the table, validation skipped");
                None
            }
        };
        let rejected: Vec<RowError> = validation
            .as_ref()
            .map(|result| result.errors().into_iter().cloned().collect())
            .unwrap_or_default();
        for row in &rejected {
            trace!(
                row = row.row_number,
                field = row.field_name.as_deref().unwrap_or("-"),
                value = redact_value(row.raw_value().unwrap_or_default()),
                "Rejected row"
            );
        }
        summary.rejected_rows = rejected.len();

        let CleaningOutcome { cleaned, report } = clean_table(&standardized, &kinds)?;
        summary.problem_columns = report.columns.len();
        summary.problem_rows = report.problem_row_count();
        summary.reports =
            write_reports(self.reports_dir, file_id, &report, &rejected, self.ctx.now)
                .context("write reports")?;

        let silver = match &validation {
            Some(result) => result.filter(&cleaned)?,
            None => cleaned,
        };
        self.land(Layer::Silver, file_id, &silver)?;
        summary.silver_rows = silver.height();

        // Gold: enriched with the product dimension.
        let (gold, stats) = enrich(&silver, self.dimensions)?;
        self.land(Layer::Gold, file_id, &gold)?;
        summary.gold_rows = gold.height();
        summary.unmatched_keys = stats.unmatched;

        info!(
            bronze = summary.bronze_rows,
            silver = summary.silver_rows,
            gold = summary.gold_rows,
            rejected = summary.rejected_rows,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "File processed"
        );
        Ok(summary)
    }

    fn bronze(&self, path: &Path, file_id: &str) -> Result<DataFrame> {
        let raw = extract(path).with_context(|| format!("extract {}", path.display()))?;
        let names = sanitize_column_names(&raw.headers);
        debug!(columns = ?names, "Sanitized column names");
        let df = raw.to_frame(&names)?;
        self.land(Layer::Bronze, file_id, &df)?;
        Ok(df)
    }

    fn land(&self, layer: Layer, file_id: &str, df: &DataFrame) -> Result<()> {
        self.sink
            .write_table(layer, file_id, file_id, df)
            .with_context(|| format!("load {layer} table to {} sink", self.sink.name()))?;
        self.queue
            .send(layer, &StageMessage::new(file_id, df.height()))
            .with_context(|| format!("send {layer} message"))?;
        Ok(())
    }
}

/// Runs the whole input directory with a validated configuration.
pub fn run(config: &EtlConfig) -> Result<BatchSummary> {
    let span = info_span!("batch", input_dir = %config.input_dir.display());
    let _guard = span.enter();

    let paths = list_input_files(&config.input_dir).context("list input files")?;
    info!(files = paths.len(), sink = ?config.sink, "Starting batch");

    let dimensions = match &config.dimensions {
        Some(path) => load_dimensions(path).context("load product dimensions")?,
        None => {
            warn!("No dimension file configured, gold rows will carry not-found sentinels");
            DimensionTable::new()
        }
    };
    let sink = config.sink.build(&config.output_dir);
    let queue = DirectoryQueue::new(&config.queue_dir);
    Ok(Pipeline::new(config, sink.as_ref(), &queue, &dimensions).run_batch(&paths))
}
