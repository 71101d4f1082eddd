//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use etl_cli::config::{ConfigOverrides, RecordKindSetting};
use etl_load::SinkKind;

#[derive(Parser)]
#[command(
    name = "etl",
    version,
    about = "Retail ETL - clean, validate and layer sales spreadsheets",
    long_about = "Clean and validate retail spreadsheets (sales, stock, categories).\n\n\
                  Every input file is landed as bronze (raw), silver (standardized and \n\
                  validated) and gold (enriched with the product dimension), with \n\
                  data-quality reports for each table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow raw row values (customer names, receipts) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Process every file in the input directory.
    Run(RunArgs),

    /// Print the effective configuration as TOML.
    Config(RunArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// TOML configuration file.
    #[arg(long = "config", short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory with the source CSV and Excel files.
    #[arg(long = "input-dir", value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Sink root for the bronze, silver and gold tables.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory holding stage messages.
    #[arg(long = "queue-dir", value_name = "DIR")]
    pub queue_dir: Option<PathBuf>,

    /// Directory for data-quality and validation reports.
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Storage sink for layer tables.
    #[arg(long = "sink", value_enum)]
    pub sink: Option<SinkArg>,

    /// Validation schema (auto picks one from the table columns).
    #[arg(long = "record-kind", value_enum)]
    pub record_kind: Option<RecordKindArg>,

    /// Category file used to enrich gold tables.
    #[arg(long = "dimensions", value_name = "PATH")]
    pub dimensions: Option<PathBuf>,
}

impl RunArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            queue_dir: self.queue_dir.clone(),
            reports_dir: self.reports_dir.clone(),
            sink: self.sink.map(SinkKind::from),
            record_kind: self.record_kind.map(RecordKindSetting::from),
            dimensions: self.dimensions.clone(),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SinkArg {
    Warehouse,
    KeyValue,
}

impl From<SinkArg> for SinkKind {
    fn from(arg: SinkArg) -> Self {
        match arg {
            SinkArg::Warehouse => SinkKind::Warehouse,
            SinkArg::KeyValue => SinkKind::KeyValue,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RecordKindArg {
    Auto,
    None,
    Category,
    Sales,
    Stock,
}

impl From<RecordKindArg> for RecordKindSetting {
    fn from(arg: RecordKindArg) -> Self {
        match arg {
            RecordKindArg::Auto => RecordKindSetting::Auto,
            RecordKindArg::None => RecordKindSetting::None,
            RecordKindArg::Category => RecordKindSetting::Category,
            RecordKindArg::Sales => RecordKindSetting::Sales,
            RecordKindArg::Stock => RecordKindSetting::Stock,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
