//! Suggestion aggregation
//!
//! Produces the ranked batch shown for the current query text: history
//! matches first, then remote autocomplete results that do not repeat
//! them. Remote failures degrade to history-only; they never surface to
//! the caller.

use super::{Suggestion, SuggestionBatch};
use crate::history::HistoryStore;
use crate::metrics;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Queries shorter than this show the idle display: the full history,
/// unfiltered
pub const MIN_QUERY_LEN: usize = 2;

/// Remote half of the pipeline. Implemented by the autocomplete adapter
/// and by in-memory fakes in tests.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Raw candidate strings for a query prefix
    async fn fetch(&self, query: &str) -> Result<Vec<String>>;
}

/// Merges history matches with remote autocomplete results
pub struct SuggestionAggregator {
    history: Arc<HistoryStore>,
    remote: Arc<dyn SuggestionSource>,
}

impl SuggestionAggregator {
    pub fn new(history: Arc<HistoryStore>, remote: Arc<dyn SuggestionSource>) -> Self {
        Self { history, remote }
    }

    /// Produce the batch for one query pass
    pub async fn suggest(&self, query: &str) -> SuggestionBatch {
        if query.chars().count() < MIN_QUERY_LEN {
            return SuggestionBatch {
                query: query.to_string(),
                suggestions: self.history.as_suggestions().await,
            };
        }

        let needle = query.to_lowercase();
        let mut suggestions: Vec<Suggestion> = self
            .history
            .entries()
            .await
            .into_iter()
            .filter(|entry| entry.to_lowercase().contains(&needle))
            .map(Suggestion::history)
            .collect();

        let remote = match self.remote.fetch(query).await {
            Ok(items) => items,
            Err(e) => {
                warn!("Autocomplete fetch failed for {:?}: {}", query, e);
                metrics::global().record_remote_error();
                Vec::new()
            }
        };

        // remote entries are filtered against the batch, never the other
        // way around: history matches always survive
        for text in remote {
            let lowered = text.to_lowercase();
            if suggestions.iter().any(|s| s.text.to_lowercase() == lowered) {
                continue;
            }
            suggestions.push(Suggestion::remote(text));
        }

        debug!(
            "Aggregated {} suggestions for {:?}",
            suggestions.len(),
            query
        );

        SuggestionBatch {
            query: query.to_string(),
            suggestions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggest::SuggestionOrigin;

    struct FixedSource(Vec<String>);

    #[async_trait]
    impl SuggestionSource for FixedSource {
        async fn fetch(&self, _query: &str) -> Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl SuggestionSource for FailingSource {
        async fn fetch(&self, _query: &str) -> Result<Vec<String>> {
            anyhow::bail!("connection refused")
        }
    }

    async fn store_with(entries: &[&str]) -> Arc<HistoryStore> {
        let store = HistoryStore::in_memory().await;
        // record in reverse so the first listed entry ends up most recent
        for entry in entries.iter().rev() {
            store.record(entry).await;
        }
        Arc::new(store)
    }

    #[tokio::test]
    async fn test_short_query_shows_full_history() {
        let history = store_with(&["cats", "dogs"]).await;
        let aggregator =
            SuggestionAggregator::new(history, Arc::new(FixedSource(vec!["c things".into()])));

        let batch = aggregator.suggest("c").await;
        let texts: Vec<&str> = batch.suggestions.iter().map(|s| s.text.as_str()).collect();

        // remote is not consulted below the minimum length
        assert_eq!(texts, vec!["cats", "dogs"]);
        assert!(batch
            .suggestions
            .iter()
            .all(|s| s.origin == SuggestionOrigin::History));
    }

    #[tokio::test]
    async fn test_history_filter_is_substring_case_insensitive() {
        let history = store_with(&["My Cats", "dogs"]).await;
        let aggregator = SuggestionAggregator::new(history, Arc::new(FixedSource(vec![])));

        let batch = aggregator.suggest("ca").await;
        let texts: Vec<&str> = batch.suggestions.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["My Cats"]);
    }

    #[tokio::test]
    async fn test_remote_appended_after_history() {
        let history = store_with(&["cats", "dogs"]).await;
        let aggregator = SuggestionAggregator::new(
            history,
            Arc::new(FixedSource(vec!["cat food".into(), "cat videos".into()])),
        );

        let batch = aggregator.suggest("ca").await;
        assert_eq!(batch.suggestions[0], Suggestion::history("cats"));
        assert_eq!(batch.suggestions[1], Suggestion::remote("cat food"));
        assert_eq!(batch.suggestions[2], Suggestion::remote("cat videos"));
    }

    #[tokio::test]
    async fn test_remote_deduped_against_history_case_insensitive() {
        let history = store_with(&["Cats"]).await;
        let aggregator = SuggestionAggregator::new(
            history,
            Arc::new(FixedSource(vec!["cats".into(), "cat food".into()])),
        );

        let batch = aggregator.suggest("ca").await;
        let texts: Vec<&str> = batch.suggestions.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["Cats", "cat food"]);
    }

    #[tokio::test]
    async fn test_remote_duplicates_collapse() {
        let history = store_with(&[]).await;
        let aggregator = SuggestionAggregator::new(
            history,
            Arc::new(FixedSource(vec!["Rust".into(), "rust".into()])),
        );

        let batch = aggregator.suggest("ru").await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.suggestions[0], Suggestion::remote("Rust"));
    }

    #[tokio::test]
    async fn test_remote_failure_degrades_to_history() {
        let history = store_with(&["cats", "dogs"]).await;
        let aggregator = SuggestionAggregator::new(history, Arc::new(FailingSource));

        let batch = aggregator.suggest("ca").await;
        let texts: Vec<&str> = batch.suggestions.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["cats"]);
    }

    #[tokio::test]
    async fn test_no_matches_yields_empty_batch() {
        let history = store_with(&[]).await;
        let aggregator = SuggestionAggregator::new(history, Arc::new(FixedSource(vec![])));

        let batch = aggregator.suggest("xyz").await;
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_empty_history_remote_only() {
        let history = store_with(&[]).await;
        let aggregator = SuggestionAggregator::new(
            history,
            Arc::new(FixedSource(vec!["xyz abc".into(), "xyz def".into()])),
        );

        let batch = aggregator.suggest("xyz").await;
        assert_eq!(
            batch.suggestions,
            vec![Suggestion::remote("xyz abc"), Suggestion::remote("xyz def")]
        );
    }
}
