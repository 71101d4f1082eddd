//! Excel workbook reading.

use std::path::Path;

use calamine::{Data, DataType, Reader, open_workbook_auto};
use chrono::{NaiveDateTime, Timelike};
use etl_common::format_numeric;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::table::{RawTable, SourceFormat};

/// Reads the first worksheet of a workbook into a raw table.
///
/// The first row of the used range is the header. Rows without any
/// non-empty cell are dropped.
pub fn read_excel(path: &Path) -> Result<RawTable> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::EmptyFile {
            path: path.to_path_buf(),
        })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::EmptyFile {
            path: path.to_path_buf(),
        })?
        .map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = rows_iter
        .next()
        .ok_or_else(|| IngestError::EmptyFile {
            path: path.to_path_buf(),
        })?
        .iter()
        .map(|cell| cell_to_string(cell).unwrap_or_default())
        .collect();

    let rows: Vec<Vec<Option<String>>> = rows_iter
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>())
        .filter(|row| row.iter().any(Option::is_some))
        .collect();

    debug!(
        path = %path.display(),
        sheet = %sheet,
        rows = rows.len(),
        "Read worksheet"
    );

    Ok(RawTable {
        headers,
        rows,
        format: SourceFormat::Excel { sheet },
    })
}

fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Float(v) => Some(format_numeric(*v)),
        Data::Int(v) => Some(v.to_string()),
        Data::Bool(v) => Some(v.to_string()),
        Data::DateTime(_) => cell.as_datetime().map(format_datetime),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

/// Date-only cells keep just the date; anything with a time of day keeps both.
fn format_datetime(value: NaiveDateTime) -> String {
    if value.num_seconds_from_midnight() == 0 {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
