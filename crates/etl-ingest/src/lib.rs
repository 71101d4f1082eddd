//! Source extraction for the retail ETL.
//!
//! Input spreadsheets arrive as CSV exports with an unknown delimiter and
//! encoding, or as Excel workbooks. Both are read into a [`RawTable`] of
//! optional string cells, and from there into a Polars `DataFrame` once the
//! column names have been sanitized.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use etl_ingest::{extract, list_input_files};
//!
//! for path in list_input_files(Path::new("data/raw"))? {
//!     let raw = extract(&path)?;
//!     let df = raw.to_frame(&raw.headers)?;
//! }
//! ```

mod delimited;
mod discovery;
mod error;
mod excel;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === Extraction ===
pub use delimited::{CSV_DELIMITERS, decode_text, read_csv, sniff_delimiter};
pub use excel::read_excel;
pub use table::{RawTable, SourceFormat, extract};

// === File Discovery ===
pub use discovery::{InputFormat, list_input_files};
