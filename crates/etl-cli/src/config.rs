//! Pipeline configuration.
//!
//! Loaded from a TOML file, overridden by command-line flags, then validated
//! once before any file is processed.
//!
//! ```toml
//! input_dir = "data/raw"
//! output_dir = "data/lake"
//! queue_dir = "data/queue"
//! reports_dir = "reports"
//! sink = "warehouse"
//! record_kind = "auto"
//! dimensions = "data/raw/Category.xlsx"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use etl_load::SinkKind;
use etl_model::RecordKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that make the configuration unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{role} directory not found: {path}")]
    MissingDirectory { role: &'static str, path: PathBuf },

    #[error("failed to create {role} directory {path}: {source}")]
    CreateDirectory {
        role: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("dimension file not found: {path}")]
    MissingDimensions { path: PathBuf },
}

/// How the validation schema for a table is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKindSetting {
    /// Pick the schema from the table's columns.
    #[default]
    Auto,
    /// Skip validation; every row proceeds.
    None,
    Category,
    Sales,
    Stock,
}

impl RecordKindSetting {
    /// Schema to validate a table with these columns against.
    pub fn resolve<S: AsRef<str>>(self, columns: &[S]) -> Option<RecordKind> {
        match self {
            RecordKindSetting::Auto => RecordKind::detect(columns),
            RecordKindSetting::None => None,
            RecordKindSetting::Category => Some(RecordKind::Category),
            RecordKindSetting::Sales => Some(RecordKind::Sales),
            RecordKindSetting::Stock => Some(RecordKind::Stock),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EtlConfig {
    /// Directory scanned for source files.
    pub input_dir: PathBuf,
    /// Sink root; layer tables land under `<output_dir>/<layer>/`.
    pub output_dir: PathBuf,
    pub queue_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub sink: SinkKind,
    pub record_kind: RecordKindSetting,
    /// Category file used for gold enrichment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<PathBuf>,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data/raw"),
            output_dir: PathBuf::from("data/lake"),
            queue_dir: PathBuf::from("data/queue"),
            reports_dir: PathBuf::from("reports"),
            sink: SinkKind::default(),
            record_kind: RecordKindSetting::default(),
            dimensions: None,
        }
    }
}

/// Values given on the command line; `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub queue_dir: Option<PathBuf>,
    pub reports_dir: Option<PathBuf>,
    pub sink: Option<SinkKind>,
    pub record_kind: Option<RecordKindSetting>,
    pub dimensions: Option<PathBuf>,
}

impl EtlConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Loads `path` when given, otherwise starts from the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(dir) = overrides.input_dir {
            self.input_dir = dir;
        }
        if let Some(dir) = overrides.output_dir {
            self.output_dir = dir;
        }
        if let Some(dir) = overrides.queue_dir {
            self.queue_dir = dir;
        }
        if let Some(dir) = overrides.reports_dir {
            self.reports_dir = dir;
        }
        if let Some(sink) = overrides.sink {
            self.sink = sink;
        }
        if let Some(kind) = overrides.record_kind {
            self.record_kind = kind;
        }
        if overrides.dimensions.is_some() {
            self.dimensions = overrides.dimensions;
        }
        self
    }

    /// Checks that the input directory and dimension file exist, and creates
    /// the sink root and queue directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.input_dir.is_dir() {
            return Err(ConfigError::MissingDirectory {
                role: "input",
                path: self.input_dir.clone(),
            });
        }
        if let Some(path) = &self.dimensions
            && !path.is_file()
        {
            return Err(ConfigError::MissingDimensions { path: path.clone() });
        }
        ensure_dir("sink", &self.output_dir)?;
        ensure_dir("queue", &self.queue_dir)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn ensure_dir(role: &'static str, path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::MissingDirectory {
            role,
            path: path.to_path_buf(),
        });
    }
    fs::create_dir_all(path).map_err(|source| ConfigError::CreateDirectory {
        role,
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config =
            EtlConfig::from_toml("sink = \"key-value\"\nrecord_kind = \"sales\"\n").unwrap();
        assert_eq!(config.sink, SinkKind::KeyValue);
        assert_eq!(config.record_kind, RecordKindSetting::Sales);
        assert_eq!(config.input_dir, PathBuf::from("data/raw"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(EtlConfig::from_toml("inputs = \"x\"\n").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let config = EtlConfig::default().with_overrides(ConfigOverrides {
            input_dir: Some(PathBuf::from("in")),
            record_kind: Some(RecordKindSetting::None),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.input_dir, PathBuf::from("in"));
        assert_eq!(config.record_kind, RecordKindSetting::None);
        assert_eq!(config.output_dir, PathBuf::from("data/lake"));
    }

    #[test]
    fn test_record_kind_resolution() {
        let columns = ["codigo_producto", "cantidad", "precio_unitario", "fecha"];
        assert_eq!(
            RecordKindSetting::Auto.resolve(&columns),
            Some(RecordKind::Sales)
        );
        assert_eq!(RecordKindSetting::None.resolve(&columns), None);
        assert_eq!(
            RecordKindSetting::Stock.resolve(&columns),
            Some(RecordKind::Stock)
        );
    }

    #[test]
    fn test_validate_requires_input_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = EtlConfig {
            input_dir: dir.path().join("missing"),
            output_dir: dir.path().join("lake"),
            queue_dir: dir.path().join("queue"),
            ..EtlConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingDirectory { role: "input", .. })
        ));
    }

    #[test]
    fn test_validate_creates_sink_and_queue_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let config = EtlConfig {
            input_dir: dir.path().to_path_buf(),
            output_dir: dir.path().join("lake"),
            queue_dir: dir.path().join("queue"),
            ..EtlConfig::default()
        };
        config.validate().unwrap();
        assert!(dir.path().join("lake").is_dir());
        assert!(dir.path().join("queue").is_dir());
    }
}
