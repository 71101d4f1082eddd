//! Raw extracted tables.

use std::path::Path;

use etl_common::string_column;
use polars::prelude::*;
use tracing::info;

use crate::delimited::read_csv;
use crate::discovery::InputFormat;
use crate::error::{IngestError, Result};
use crate::excel::read_excel;

/// How a raw table was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceFormat {
    Csv {
        delimiter: u8,
        encoding: &'static str,
    },
    Excel {
        sheet: String,
    },
}

/// Extractor output: header strings as found in the file plus cell values.
///
/// Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
    pub format: SourceFormat,
}

impl RawTable {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Builds a DataFrame of nullable string columns under the given names.
    ///
    /// `names` must have one entry per header and contain no duplicates.
    pub fn to_frame(&self, names: &[String]) -> Result<DataFrame> {
        if names.len() != self.headers.len() {
            return Err(IngestError::ColumnCount {
                expected: self.headers.len(),
                actual: names.len(),
            });
        }

        let columns: Vec<Column> = names
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let values: Vec<Option<String>> = self
                    .rows
                    .iter()
                    .map(|row| row.get(idx).cloned().flatten())
                    .collect();
                string_column(name, values)
            })
            .collect();

        Ok(DataFrame::new(columns)?)
    }
}

/// Extracts a source file, dispatching on its extension.
pub fn extract(path: &Path) -> Result<RawTable> {
    let table = match InputFormat::from_path(path) {
        Some(InputFormat::Csv) => read_csv(path)?,
        Some(InputFormat::Excel) => read_excel(path)?,
        None => {
            return Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };

    info!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "Extracted source file"
    );
    Ok(table)
}
