//! HTTP request handlers
//!
//! Every pipeline failure is absorbed before it reaches a response; the
//! API degrades to empty listings rather than error payloads.

use super::state::AppState;
use crate::feed::NewsItem;
use crate::metrics;
use crate::suggest::SuggestionBatch;
use crate::websearch::SearchResult;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Query parameters shared by /suggest and /search
#[derive(Debug, Deserialize)]
pub struct QueryParams {
    /// Query text
    pub q: Option<String>,
}

/// Response for /search
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub number_of_results: usize,
    pub results: Vec<SearchResult>,
    /// History list after recording this submission
    pub history: Vec<String>,
}

/// Response for /feed
#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub items: Vec<NewsItem>,
}

/// Suggestion handler: one aggregation pass for the given query text
pub async fn suggest(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Json<SuggestionBatch> {
    let q = params.q.unwrap_or_default();
    Json(state.aggregator.suggest(&q).await)
}

/// Search handler: record the submission and fetch the results listing.
/// A whitespace-only query is a no-op: nothing is recorded, the listing
/// is empty.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Json<SearchResponse> {
    let raw = params.q.unwrap_or_default();
    let query = raw.trim();

    if query.is_empty() {
        return Json(SearchResponse {
            query: String::new(),
            number_of_results: 0,
            results: vec![],
            history: state.history.entries().await,
        });
    }

    let (results, history) =
        futures::join!(state.websearch.search(query), state.history.record(query));

    let results = match results {
        Ok(results) => results,
        Err(e) => {
            warn!("Web search failed for {:?}: {}", query, e);
            vec![]
        }
    };

    Json(SearchResponse {
        query: query.to_string(),
        number_of_results: results.len(),
        results,
        history,
    })
}

/// Feed handler: the home screen news listing
pub async fn feed(State(state): State<AppState>) -> Json<FeedResponse> {
    let items = match state.feed.fetch().await {
        Ok(items) => items,
        Err(e) => {
            warn!("Feed fetch failed: {}", e);
            vec![]
        }
    };

    Json(FeedResponse { items })
}

/// History handler: the current list, for screen-load reads
pub async fn history(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.history.entries().await)
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "instance": state.instance_name(),
        "version": crate::VERSION,
    }))
}

/// Metrics handler
pub async fn metrics_snapshot() -> impl IntoResponse {
    Json(metrics::global().snapshot())
}
