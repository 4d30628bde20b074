//! Application state shared across handlers

use crate::autocomplete::RemoteSuggestions;
use crate::config::Settings;
use crate::feed::NewsFeed;
use crate::history::HistoryStore;
use crate::network::HttpClient;
use crate::suggest::SuggestionAggregator;
use crate::websearch::WebSearch;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search history store
    pub history: Arc<HistoryStore>,
    /// Suggestion aggregator over the configured autocomplete backend
    pub aggregator: Arc<SuggestionAggregator>,
    /// Results listing fetcher
    pub websearch: Arc<WebSearch>,
    /// Home feed fetcher
    pub feed: Arc<NewsFeed>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        settings: Settings,
        client: HttpClient,
        history: Arc<HistoryStore>,
    ) -> anyhow::Result<Self> {
        let remote = RemoteSuggestions::new(client.clone(), &settings.suggest.backend)?;
        let aggregator = Arc::new(SuggestionAggregator::new(
            history.clone(),
            Arc::new(remote),
        ));
        let websearch = Arc::new(WebSearch::new(client.clone(), &settings.websearch));
        let feed = Arc::new(NewsFeed::new(client, &settings.feed));

        Ok(Self {
            settings: Arc::new(settings),
            history,
            aggregator,
            websearch,
            feed,
        })
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
