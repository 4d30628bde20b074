//! Persistence backends for search history
//!
//! The store keeps the list authoritative in memory; backends only move the
//! raw JSON payload to and from durable storage.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::RwLock;

/// Fixed key the history payload is stored under
pub const STORAGE_KEY: &str = "searchHistory";

/// Failures of the persistence layer. Absorbed by the store, never fatal.
#[derive(Debug, Error)]
pub enum HistoryStoreError {
    #[error("history storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("history payload malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Durable storage for the serialized history list
#[async_trait]
pub trait HistoryBackend: Send + Sync {
    /// Read the persisted payload; `None` when nothing was stored yet
    async fn read(&self) -> Result<Option<String>, HistoryStoreError>;

    /// Overwrite the persisted payload wholesale
    async fn write(&self, payload: &str) -> Result<(), HistoryStoreError>;
}

/// File-backed storage holding a JSON array of strings
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Default location under the platform data directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("omnibox").join(format!("{}.json", STORAGE_KEY)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HistoryBackend for JsonFileBackend {
    async fn read(&self) -> Result<Option<String>, HistoryStoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, payload: &str) -> Result<(), HistoryStoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, payload).await?;
        Ok(())
    }
}

/// In-memory storage for tests and ephemeral runs
#[derive(Default)]
pub struct MemoryBackend {
    payload: RwLock<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already-persisted payload
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: RwLock::new(Some(payload.into())),
        }
    }
}

#[async_trait]
impl HistoryBackend for MemoryBackend {
    async fn read(&self) -> Result<Option<String>, HistoryStoreError> {
        Ok(self.payload.read().await.clone())
    }

    async fn write(&self, payload: &str) -> Result<(), HistoryStoreError> {
        *self.payload.write().await = Some(payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("searchHistory.json"));

        assert!(backend.read().await.unwrap().is_none());

        backend.write(r#"["cats","dogs"]"#).await.unwrap();
        let payload = backend.read().await.unwrap().unwrap();
        assert_eq!(payload, r#"["cats","dogs"]"#);
    }

    #[tokio::test]
    async fn test_file_backend_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data").join("omnibox").join("searchHistory.json");
        let backend = JsonFileBackend::new(&nested);

        backend.write("[]").await.unwrap();
        assert!(nested.exists());
    }

    #[tokio::test]
    async fn test_memory_backend() {
        let backend = MemoryBackend::new();
        assert!(backend.read().await.unwrap().is_none());

        backend.write(r#"["x"]"#).await.unwrap();
        assert_eq!(backend.read().await.unwrap().unwrap(), r#"["x"]"#);
    }
}
