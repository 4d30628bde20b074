//! Web search results fetcher
//!
//! Adapter over a Custom Search style JSON endpoint, used by the results
//! screen after a query is submitted. One request, one listing; failures
//! are absorbed by the caller.

use crate::config::WebSearchSettings;
use crate::network::HttpClient;
use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// A single web search result
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub display_link: String,
    pub snippet: Option<String>,
    pub thumbnail: Option<String>,
}

/// Client for the configured web search endpoint
pub struct WebSearch {
    client: HttpClient,
    endpoint: String,
    api_key: Option<String>,
    cx: Option<String>,
}

impl WebSearch {
    pub fn new(client: HttpClient, settings: &WebSearchSettings) -> Self {
        Self {
            client,
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            cx: settings.cx.clone(),
        }
    }

    /// Fetch the results listing for a submitted query. Without
    /// configured credentials the listing is empty and no request is
    /// made.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let (key, cx) = match (&self.api_key, &self.cx) {
            (Some(key), Some(cx)) => (key.clone(), cx.clone()),
            _ => {
                debug!("Web search credentials not configured, returning empty listing");
                return Ok(vec![]);
            }
        };

        let mut params = HashMap::new();
        params.insert("key".to_string(), key);
        params.insert("cx".to_string(), cx);
        params.insert("q".to_string(), query.to_string());

        let response = self.client.get_with_params(&self.endpoint, params).await?;
        if !response.is_success() {
            warn!("Web search returned status {}", response.status);
            return Ok(vec![]);
        }

        let json: serde_json::Value = serde_json::from_str(&response.text)?;
        Ok(parse_items(&json))
    }
}

fn parse_items(json: &serde_json::Value) -> Vec<SearchResult> {
    let items = match json.get("items").and_then(|v| v.as_array()) {
        Some(items) => items,
        None => return vec![],
    };

    items
        .iter()
        .filter_map(|item| {
            let title = item.get("title")?.as_str()?.to_string();
            let link = item.get("link")?.as_str()?.to_string();

            let display_link = item
                .get("displayLink")
                .and_then(|v| v.as_str())
                .map(String::from)
                .or_else(|| host_of(&link))
                .unwrap_or_else(|| link.clone());

            let snippet = item
                .get("snippet")
                .and_then(|v| v.as_str())
                .map(String::from);

            let thumbnail = item
                .get("pagemap")
                .and_then(|p| p.get("cse_thumbnail"))
                .and_then(|t| t.as_array())
                .and_then(|arr| arr.first())
                .and_then(|t| t.get("src"))
                .and_then(|v| v.as_str())
                .map(String::from);

            Some(SearchResult {
                title,
                link,
                display_link,
                snippet,
                thumbnail,
            })
        })
        .collect()
}

fn host_of(link: &str) -> Option<String> {
    url::Url::parse(link)
        .ok()
        .and_then(|u| u.host_str().map(String::from))
}
