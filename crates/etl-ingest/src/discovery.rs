//! Input file discovery.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{IngestError, Result};

/// Supported source file families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Excel,
}

impl InputFormat {
    /// Classifies a path by extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            _ => None,
        }
    }
}

/// Lists the extractable files in a directory.
///
/// Returns files sorted by filename. Files with other extensions and Office
/// lock files (`~$...`) are skipped with a warning.
pub fn list_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_lock_file = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("~$"));

        if is_lock_file || InputFormat::from_path(&path).is_none() {
            warn!(path = %path.display(), "Skipping unsupported file");
            continue;
        }
        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_input_format_from_path() {
        assert_eq!(
            InputFormat::from_path(Path::new("ventas.CSV")),
            Some(InputFormat::Csv)
        );
        assert_eq!(
            InputFormat::from_path(Path::new("stock.xlsx")),
            Some(InputFormat::Excel)
        );
        assert_eq!(InputFormat::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_list_input_files() {
        let dir = TempDir::new().unwrap();
        for name in ["b_ventas.csv", "a_stock.xlsx", "notes.txt", "~$a_stock.xlsx"] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.csv")).unwrap();

        let files = list_input_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a_stock.xlsx", "b_ventas.csv"]);
    }

    #[test]
    fn test_list_input_files_missing_dir() {
        let result = list_input_files(Path::new("/nonexistent/raw"));
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }
}
