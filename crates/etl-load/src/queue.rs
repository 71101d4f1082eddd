//! Stage trigger messages.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use etl_model::{Layer, StageMessage};
use tracing::{debug, info};

use crate::error::{LoadError, Result};
use crate::sink::ensure_parent;

/// Queue of messages emitted after a layer lands its table.
///
/// `stage` is the layer that emitted the message. A message for the same
/// `(stage, file_id)` replaces the earlier one.
pub trait MessageQueue {
    fn send(&self, stage: Layer, message: &StageMessage) -> Result<()>;

    /// Messages currently held for `stage`, ordered by `file_id`.
    fn pending(&self, stage: Layer) -> Result<Vec<StageMessage>>;
}

/// Filesystem queue storing `<root>/<stage>/<file_id>.json`.
#[derive(Debug, Clone)]
pub struct DirectoryQueue {
    root: PathBuf,
}

impl DirectoryQueue {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn message_path(&self, stage: Layer, file_id: &str) -> PathBuf {
        self.root.join(stage.as_str()).join(format!("{file_id}.json"))
    }
}

impl MessageQueue for DirectoryQueue {
    fn send(&self, stage: Layer, message: &StageMessage) -> Result<()> {
        let path = self.message_path(stage, &message.file_id);
        ensure_parent(&path)?;
        let json = serde_json::to_string(message).map_err(|source| LoadError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| LoadError::Write {
            path: path.clone(),
            source,
        })?;
        info!(
            %stage,
            file_id = %message.file_id,
            row_count = message.row_count,
            "Stage message sent"
        );
        Ok(())
    }

    fn pending(&self, stage: Layer) -> Result<Vec<StageMessage>> {
        let dir = self.root.join(stage.as_str());
        if !dir.exists() {
            debug!(%stage, "No queue directory");
            return Ok(Vec::new());
        }
        let read_err = |source| LoadError::Read {
            path: dir.clone(),
            source,
        };

        let mut messages = Vec::new();
        for entry in fs::read_dir(&dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let text = fs::read_to_string(&path).map_err(|source| LoadError::Read {
                path: path.clone(),
                source,
            })?;
            let message: StageMessage =
                serde_json::from_str(&text).map_err(|source| LoadError::Json {
                    path: path.clone(),
                    source,
                })?;
            messages.push(message);
        }
        messages.sort_by(|a, b| a.file_id.cmp(&b.file_id));
        Ok(messages)
    }
}

/// In-process queue.
#[derive(Debug, Default)]
pub struct MemoryQueue {
    messages: Mutex<BTreeMap<(Layer, String), StageMessage>>,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MessageQueue for MemoryQueue {
    fn send(&self, stage: Layer, message: &StageMessage) -> Result<()> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((stage, message.file_id.clone()), message.clone());
        Ok(())
    }

    fn pending(&self, stage: Layer) -> Result<Vec<StageMessage>> {
        Ok(self
            .messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|((layer, _), _)| *layer == stage)
            .map(|(_, message)| message.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_queue_overwrites_same_file() {
        let queue = MemoryQueue::new();
        queue.send(Layer::Bronze, &StageMessage::new("ventas", 10)).unwrap();
        queue.send(Layer::Bronze, &StageMessage::new("ventas", 8)).unwrap();
        queue.send(Layer::Silver, &StageMessage::new("ventas", 7)).unwrap();

        assert_eq!(queue.len(), 2);
        let bronze = queue.pending(Layer::Bronze).unwrap();
        assert_eq!(bronze.len(), 1);
        assert_eq!(bronze[0].row_count, 8);
        assert!(queue.pending(Layer::Gold).unwrap().is_empty());
    }
}
