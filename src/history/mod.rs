//! Search history store
//!
//! Durable, ordered record of past submitted queries. The list is loaded
//! once at startup, mutated on every successful submission, and persisted
//! write-through. Persistence failures are logged and absorbed; the
//! in-memory list stays authoritative for the session.

mod storage;

pub use storage::{HistoryBackend, HistoryStoreError, JsonFileBackend, MemoryBackend, STORAGE_KEY};

use crate::suggest::Suggestion;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Maximum number of retained history entries
pub const HISTORY_CAPACITY: usize = 10;

/// Ordered, capacity-bounded record of past queries, most recent first
pub struct HistoryStore {
    backend: Arc<dyn HistoryBackend>,
    entries: RwLock<Vec<String>>,
}

impl HistoryStore {
    /// Load the persisted history. A missing or malformed payload starts
    /// the session with an empty list.
    pub async fn load(backend: Arc<dyn HistoryBackend>) -> Self {
        let mut entries = match backend.read().await {
            Ok(Some(payload)) => match parse_payload(&payload) {
                Ok(list) => list,
                Err(e) => {
                    warn!("Ignoring malformed history payload: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read history, starting empty: {}", e);
                Vec::new()
            }
        };
        entries.truncate(HISTORY_CAPACITY);

        Self {
            backend,
            entries: RwLock::new(entries),
        }
    }

    /// In-memory store with no prior history
    pub async fn in_memory() -> Self {
        Self::load(Arc::new(MemoryBackend::new())).await
    }

    /// Record a submitted query at the front of the list, bounded by the
    /// capacity, and persist the result. A query that trims to empty is a
    /// no-op. Returns the new list.
    pub async fn record(&self, query: &str) -> Vec<String> {
        let query = query.trim();
        if query.is_empty() {
            return self.entries().await;
        }

        let snapshot = {
            let mut entries = self.entries.write().await;
            entries.retain(|e| e != query);
            entries.insert(0, query.to_string());
            entries.truncate(HISTORY_CAPACITY);
            entries.clone()
        };

        if let Err(e) = self.persist(&snapshot).await {
            warn!("Failed to persist history: {}", e);
        } else {
            debug!("Recorded query, history length {}", snapshot.len());
        }

        snapshot
    }

    /// Current entries, most recent first
    pub async fn entries(&self) -> Vec<String> {
        self.entries.read().await.clone()
    }

    /// The full list mapped to history-origin suggestions, order preserved
    pub async fn as_suggestions(&self) -> Vec<Suggestion> {
        self.entries
            .read()
            .await
            .iter()
            .cloned()
            .map(Suggestion::history)
            .collect()
    }

    async fn persist(&self, entries: &[String]) -> Result<(), HistoryStoreError> {
        let payload = serde_json::to_string(entries).map_err(HistoryStoreError::Malformed)?;
        self.backend.write(&payload).await
    }
}

fn parse_payload(payload: &str) -> Result<Vec<String>, HistoryStoreError> {
    Ok(serde_json::from_str(payload)?)
}
