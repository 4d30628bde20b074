//! Search box session
//!
//! The embeddable wiring of the pipeline: keystrokes feed the debouncer
//! and committed passes run the aggregator, with only the latest pass's
//! batch reaching the display slot. Submission records into the history
//! store.

use super::{Debouncer, PassState, SuggestionAggregator, SuggestionBatch, SuggestionSource};
use crate::config::Settings;
use crate::history::HistoryStore;
use crate::metrics;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Default)]
struct DisplaySlot {
    seq: u64,
    batch: SuggestionBatch,
}

/// One search box: debounced suggestion passes plus the submission path
pub struct SearchBox {
    history: Arc<HistoryStore>,
    aggregator: Arc<SuggestionAggregator>,
    debouncer: Arc<Debouncer>,
    displayed: Arc<Mutex<DisplaySlot>>,
}

impl SearchBox {
    pub fn new(
        history: Arc<HistoryStore>,
        aggregator: Arc<SuggestionAggregator>,
        window: Duration,
    ) -> Self {
        Self {
            history,
            aggregator,
            debouncer: Arc::new(Debouncer::new(window)),
            displayed: Arc::new(Mutex::new(DisplaySlot::default())),
        }
    }

    /// Wire a session from settings: the configured debounce window and
    /// the given remote source over the shared history store.
    pub fn from_settings(
        settings: &Settings,
        history: Arc<HistoryStore>,
        remote: Arc<dyn SuggestionSource>,
    ) -> Self {
        let aggregator = Arc::new(SuggestionAggregator::new(history.clone(), remote));
        Self::new(
            history,
            aggregator,
            Duration::from_millis(settings.suggest.debounce_ms),
        )
    }

    /// Note a keystroke: issue a pass and run it in the background. The
    /// returned handle resolves to the pass outcome; callers that only
    /// care about the display can drop it. An empty query commits to the
    /// idle display (the full history).
    pub fn keystroke(&self, query: &str) -> JoinHandle<PassState> {
        let pass = self.debouncer.issue(query);
        metrics::global().record_pass_issued();

        let debouncer = self.debouncer.clone();
        let aggregator = self.aggregator.clone();
        let displayed = self.displayed.clone();

        tokio::spawn(async move {
            if debouncer.settle(&pass).await == PassState::Superseded {
                metrics::global().record_pass_superseded();
                return PassState::Superseded;
            }

            let batch = aggregator.suggest(&pass.query).await;

            // the remote call may outlive its pass; check again before
            // touching the display
            if !debouncer.is_latest(pass.seq) {
                metrics::global().record_pass_superseded();
                debug!("Discarding stale batch for {:?}", pass.query);
                return PassState::Superseded;
            }

            let mut slot = displayed.lock().unwrap();
            if pass.seq >= slot.seq {
                slot.seq = pass.seq;
                slot.batch = batch;
            }
            metrics::global().record_pass_committed();
            PassState::Committed
        })
    }

    /// The batch currently owned by the display
    pub fn displayed(&self) -> SuggestionBatch {
        self.displayed.lock().unwrap().batch.clone()
    }

    /// Current debouncer state, for callers that render a spinner
    pub fn pass_state(&self) -> PassState {
        self.debouncer.state()
    }

    /// Submit the query: record it into history and return the new list.
    /// A query that trims to empty is a no-op and returns `None`.
    pub async fn submit(&self, query: &str) -> Option<Vec<String>> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(self.history.record(query).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggest::{Suggestion, SuggestionOrigin};
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct CountingSource {
        calls: AtomicU64,
        items: Vec<String>,
    }

    impl CountingSource {
        fn new(items: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU64::new(0),
                items: items.iter().map(|s| s.to_string()).collect(),
            })
        }
    }

    #[async_trait]
    impl SuggestionSource for CountingSource {
        async fn fetch(&self, _query: &str) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.items.clone())
        }
    }

    /// Source that parks until released, for completion-order tests
    struct GatedSource {
        release: tokio::sync::Notify,
        items: Vec<String>,
    }

    #[async_trait]
    impl SuggestionSource for GatedSource {
        async fn fetch(&self, _query: &str) -> Result<Vec<String>> {
            self.release.notified().await;
            Ok(self.items.clone())
        }
    }

    async fn search_box(remote: Arc<dyn SuggestionSource>) -> SearchBox {
        let history = Arc::new(HistoryStore::in_memory().await);
        let aggregator = Arc::new(SuggestionAggregator::new(history.clone(), remote));
        SearchBox::new(history, aggregator, Duration::from_millis(300))
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_keystrokes_run_one_pass() {
        let source = CountingSource::new(&["cat video"]);
        let searchbox = search_box(source.clone()).await;

        let first = searchbox.keystroke("c");
        let second = searchbox.keystroke("ca");
        let third = searchbox.keystroke("cat");

        assert_eq!(first.await.unwrap(), PassState::Superseded);
        assert_eq!(second.await.unwrap(), PassState::Superseded);
        assert_eq!(third.await.unwrap(), PassState::Committed);

        // exactly one aggregation pass reached the remote source
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(searchbox.displayed().query, "cat");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_completion_never_overwrites_newer_batch() {
        let slow = Arc::new(GatedSource {
            release: tokio::sync::Notify::new(),
            items: vec!["slow result".to_string()],
        });
        let history = Arc::new(HistoryStore::in_memory().await);
        let aggregator = Arc::new(SuggestionAggregator::new(history.clone(), slow.clone()));
        let searchbox = SearchBox::new(history, aggregator, Duration::from_millis(300));

        // first pass commits its window, then parks inside the remote call
        let first = searchbox.keystroke("ca");
        tokio::time::sleep(Duration::from_millis(350)).await;

        // second pass arrives and fully completes
        let second = searchbox.keystroke("cat");
        slow.release.notify_one();
        tokio::time::sleep(Duration::from_millis(350)).await;
        slow.release.notify_one();
        assert_eq!(second.await.unwrap(), PassState::Committed);

        // the first pass finishes last but must not win
        assert_eq!(first.await.unwrap(), PassState::Superseded);
        assert_eq!(searchbox.displayed().query, "cat");
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_query_commits_idle_display() {
        let source = CountingSource::new(&["ignored"]);
        let searchbox = search_box(source.clone()).await;
        searchbox.submit("cats").await;

        let pass = searchbox.keystroke("");
        assert_eq!(pass.await.unwrap(), PassState::Committed);

        let displayed = searchbox.displayed();
        assert_eq!(
            displayed.suggestions,
            vec![Suggestion::history("cats")]
        );
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_from_settings_uses_configured_window() {
        let mut settings = crate::config::Settings::default();
        settings.suggest.debounce_ms = 50;

        let history = Arc::new(HistoryStore::in_memory().await);
        let source = CountingSource::new(&["cat video"]);
        let searchbox = SearchBox::from_settings(&settings, history, source.clone());

        assert_eq!(searchbox.pass_state(), PassState::Idle);
        let pass = searchbox.keystroke("cat");
        assert_eq!(searchbox.pass_state(), PassState::Pending);

        assert_eq!(pass.await.unwrap(), PassState::Committed);
        assert_eq!(searchbox.pass_state(), PassState::Committed);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_records_history() {
        let searchbox = search_box(CountingSource::new(&[])).await;

        let list = searchbox.submit("  rust lang  ").await.unwrap();
        assert_eq!(list, vec!["rust lang"]);

        assert!(searchbox.submit("   ").await.is_none());
        let pass = searchbox.keystroke("ru");
        pass.await.unwrap();
        assert_eq!(
            searchbox.displayed().suggestions[0].origin,
            SuggestionOrigin::History
        );
    }
}
