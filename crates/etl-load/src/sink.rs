//! Layer table sinks.
//!
//! Both sinks store one table per layer directory:
//!
//! ```text
//! root/
//! ├── bronze/
//! │   └── ventas_enero.csv
//! ├── silver/
//! └── gold/
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use etl_common::column_values;
use etl_model::Layer;
use polars::prelude::{DataFrame, PolarsResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{LoadError, Result};

/// Key fields added to every key-value item.
pub const FILE_ID_FIELD: &str = "file_id";
pub const ROW_ID_FIELD: &str = "row_id";
pub const LOADED_AT_FIELD: &str = "loaded_at";

/// One stored key-value item.
pub type Item = Map<String, Value>;

/// Destination for layer tables.
///
/// Writing the same `(layer, table, file_id)` twice leaves the second
/// version, so a replayed stage is harmless.
pub trait TableSink {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Lands `df` as `table` in `layer` and returns the written location.
    fn write_table(
        &self,
        layer: Layer,
        table: &str,
        file_id: &str,
        df: &DataFrame,
    ) -> Result<PathBuf>;
}

/// Available sink implementations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SinkKind {
    #[default]
    Warehouse,
    KeyValue,
}

impl SinkKind {
    pub fn build(self, root: &Path) -> Box<dyn TableSink> {
        match self {
            SinkKind::Warehouse => Box::new(WarehouseSink::new(root)),
            SinkKind::KeyValue => Box::new(KeyValueSink::new(root)),
        }
    }
}

/// Warehouse-style sink: one CSV file per table, replaced on every write.
#[derive(Debug, Clone)]
pub struct WarehouseSink {
    root: PathBuf,
}

impl WarehouseSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn table_path(&self, layer: Layer, table: &str) -> PathBuf {
        self.root.join(layer.as_str()).join(format!("{table}.csv"))
    }
}

impl TableSink for WarehouseSink {
    fn name(&self) -> &'static str {
        "warehouse"
    }

    fn write_table(
        &self,
        layer: Layer,
        table: &str,
        file_id: &str,
        df: &DataFrame,
    ) -> Result<PathBuf> {
        let path = self.table_path(layer, table);
        ensure_parent(&path)?;
        let (headers, rows) = frame_cells(df)?;

        let csv_err = |source: csv::Error| LoadError::Csv {
            path: path.clone(),
            source,
        };
        let mut writer = csv::Writer::from_path(&path).map_err(csv_err)?;
        writer.write_record(&headers).map_err(csv_err)?;
        for row in &rows {
            writer
                .write_record(row.iter().map(|cell| cell.as_deref().unwrap_or_default()))
                .map_err(csv_err)?;
        }
        writer.flush().map_err(|source| LoadError::Write {
            path: path.clone(),
            source,
        })?;

        info!(
            %layer,
            table,
            file_id,
            rows = rows.len(),
            path = %path.display(),
            "Table written"
        );
        Ok(path)
    }
}

/// Key-value item store: a JSON array of items per table.
///
/// Items are keyed by `file_id` and a zero-padded `row_id`. Writing a file
/// replaces only the items of that `file_id`.
#[derive(Debug, Clone)]
pub struct KeyValueSink {
    root: PathBuf,
}

impl KeyValueSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn table_path(&self, layer: Layer, table: &str) -> PathBuf {
        self.root.join(layer.as_str()).join(format!("{table}.json"))
    }

    /// Reads all items stored for a table; a missing table has none.
    pub fn items(&self, layer: Layer, table: &str) -> Result<Vec<Item>> {
        read_items(&self.table_path(layer, table))
    }
}

impl TableSink for KeyValueSink {
    fn name(&self) -> &'static str {
        "key-value"
    }

    fn write_table(
        &self,
        layer: Layer,
        table: &str,
        file_id: &str,
        df: &DataFrame,
    ) -> Result<PathBuf> {
        let path = self.table_path(layer, table);
        ensure_parent(&path)?;

        let mut items = read_items(&path)?;
        let before = items.len();
        items.retain(|item| item.get(FILE_ID_FIELD).and_then(Value::as_str) != Some(file_id));
        if items.len() != before {
            debug!(file_id, replaced = before - items.len(), "Replacing items");
        }

        let (headers, rows) = frame_cells(df)?;
        let loaded_at = Utc::now().to_rfc3339();
        for (idx, row) in rows.into_iter().enumerate() {
            let mut item = Item::new();
            for (name, cell) in headers.iter().zip(row) {
                item.insert(name.clone(), cell.map_or(Value::Null, Value::String));
            }
            item.insert(FILE_ID_FIELD.to_string(), Value::from(file_id));
            item.insert(ROW_ID_FIELD.to_string(), Value::from(row_id(idx)));
            item.insert(LOADED_AT_FIELD.to_string(), Value::from(loaded_at.as_str()));
            items.push(item);
        }

        let json = serde_json::to_string_pretty(&items).map_err(|source| LoadError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, format!("{json}\n")).map_err(|source| LoadError::Write {
            path: path.clone(),
            source,
        })?;

        info!(
            %layer,
            table,
            file_id,
            rows = df.height(),
            path = %path.display(),
            "Items written"
        );
        Ok(path)
    }
}

/// Item key of the zero-based row `idx`.
pub fn row_id(idx: usize) -> String {
    format!("row_{idx:05}")
}

fn read_items(path: &Path) -> Result<Vec<Item>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| LoadError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Column names and row-major cells of a frame.
fn frame_cells(df: &DataFrame) -> PolarsResult<(Vec<String>, Vec<Vec<Option<String>>>)> {
    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.as_str().to_string())
        .collect();
    let columns = headers
        .iter()
        .map(|name| column_values(df, name))
        .collect::<PolarsResult<Vec<_>>>()?;
    let rows = (0..df.height())
        .map(|idx| columns.iter().map(|values| values[idx].clone()).collect())
        .collect();
    Ok((headers, rows))
}
