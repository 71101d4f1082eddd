//! CSV file reading.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::table::{RawTable, SourceFormat};

use super::encoding::decode_text;
use super::sniff::sniff_delimiter;

/// Reads a CSV file into a raw table.
///
/// The delimiter is sniffed and the encoding falls back to Windows-1252 when
/// the bytes are not UTF-8. Empty cells become `None`, short rows are padded,
/// cells past the header width are dropped with a warning and fully blank
/// rows are dropped.
pub fn read_csv(path: &Path) -> Result<RawTable> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let (text, encoding) = decode_text(&bytes);
    if encoding != "UTF-8" {
        warn!(
            path = %path.display(),
            encoding,
            "File is not valid UTF-8, decoded with fallback encoding"
        );
    }

    let delimiter = sniff_delimiter(&text);
    debug!(
        path = %path.display(),
        delimiter = %char::from(delimiter).escape_default(),
        "Sniffed CSV delimiter"
    );

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    let headers: Vec<String> = match records.next() {
        Some(record) => record
            .map_err(|e| IngestError::CsvParse {
                path: path.to_path_buf(),
                source: e,
            })?
            .iter()
            .map(str::to_string)
            .collect(),
        None => {
            return Err(IngestError::EmptyFile {
                path: path.to_path_buf(),
            });
        }
    };
    if headers.is_empty() {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    let width = headers.len();
    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        if record.len() > width {
            warn!(
                path = %path.display(),
                line = record.position().map_or(0, csv::Position::line),
                extra = record.len() - width,
                "Row has more cells than the header, extra cells dropped"
            );
        }
        let row: Vec<Option<String>> = (0..width)
            .map(|idx| {
                record
                    .get(idx)
                    .filter(|cell| !cell.is_empty())
                    .map(str::to_string)
            })
            .collect();
        if row.iter().all(Option::is_none) {
            continue;
        }
        rows.push(row);
    }

    Ok(RawTable {
        headers,
        rows,
        format: SourceFormat::Csv {
            delimiter,
            encoding,
        },
    })
}
