//! Crawl checkpoint: a single slot holding the last fully processed id.

use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

#[async_trait]
pub trait CheckpointStore: Send + Sync {
    /// The last fully processed id, or `None` when no checkpoint exists yet.
    async fn read(&self) -> AppResult<Option<String>>;

    async fn write(&self, id: &str) -> AppResult<()>;
}

/// Checkpoint persisted as a plain text file.
pub struct FileCheckpointStore {
    path: PathBuf,
}

impl FileCheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CheckpointStore for FileCheckpointStore {
    async fn read(&self) -> AppResult<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => {
                let id = raw.trim();
                if id.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(id.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::CheckpointError(format!(
                "failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn write(&self, id: &str) -> AppResult<()> {
        tokio::fs::write(&self.path, id).await.map_err(|e| {
            AppError::CheckpointError(format!("failed to write {}: {}", self.path.display(), e))
        })
    }
}
