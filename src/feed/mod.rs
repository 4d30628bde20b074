//! News feed fetcher
//!
//! Adapter over a news search JSON endpoint for the home screen listing.
//! Entries may carry their payload directly or nested under `highlight`;
//! fields are resolved with that fallback.

use crate::config::FeedSettings;
use crate::network::HttpClient;
use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// One news story on the home feed
#[derive(Debug, Clone, Serialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub source: Option<String>,
    pub source_icon: Option<String>,
    pub date: Option<String>,
    pub thumbnail: Option<String>,
}

/// Client for the configured news endpoint
pub struct NewsFeed {
    client: HttpClient,
    endpoint: String,
    api_key: Option<String>,
    gl: String,
    hl: String,
}

impl NewsFeed {
    pub fn new(client: HttpClient, settings: &FeedSettings) -> Self {
        Self {
            client,
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
            gl: settings.gl.clone(),
            hl: settings.hl.clone(),
        }
    }

    /// Fetch the news listing. Without a configured API key the feed is
    /// empty and no request is made.
    pub async fn fetch(&self) -> Result<Vec<NewsItem>> {
        let key = match &self.api_key {
            Some(key) => key.clone(),
            None => {
                debug!("Feed API key not configured, returning empty feed");
                return Ok(vec![]);
            }
        };

        let mut params = HashMap::new();
        params.insert("engine".to_string(), "google_news".to_string());
        params.insert("gl".to_string(), self.gl.clone());
        params.insert("hl".to_string(), self.hl.clone());
        params.insert("api_key".to_string(), key);

        let response = self.client.get_with_params(&self.endpoint, params).await?;
        if !response.is_success() {
            warn!("News feed returned status {}", response.status);
            return Ok(vec![]);
        }

        let json: serde_json::Value = serde_json::from_str(&response.text)?;
        Ok(parse_news_results(&json))
    }
}

fn parse_news_results(json: &serde_json::Value) -> Vec<NewsItem> {
    let results = match json.get("news_results").and_then(|v| v.as_array()) {
        Some(results) => results,
        None => return vec![],
    };

    results.iter().filter_map(parse_entry).collect()
}

fn parse_entry(entry: &serde_json::Value) -> Option<NewsItem> {
    let title = field(entry, &["title"])?;
    let link = field(entry, &["link"])?;

    Some(NewsItem {
        title,
        link,
        source: field(entry, &["source", "name"]),
        source_icon: field(entry, &["source", "icon"]),
        date: field(entry, &["date"]),
        thumbnail: field(entry, &["thumbnail"]),
    })
}

/// Resolve a string field on the entry itself, falling back to the same
/// path under `highlight`
fn field(entry: &serde_json::Value, path: &[&str]) -> Option<String> {
    lookup(entry, path).or_else(|| entry.get("highlight").and_then(|h| lookup(h, path)))
}

fn lookup(value: &serde_json::Value, path: &[&str]) -> Option<String> {
    let mut current = value;
    for key in path {
        current = current.get(key)?;
    }
    current.as_str().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(endpoint: &str, with_key: bool) -> FeedSettings {
        FeedSettings {
            endpoint: endpoint.to_string(),
            api_key: with_key.then(|| "k".to_string()),
            gl: "in".to_string(),
            hl: "en".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetch_maps_entries() {
        let server = MockServer::start().await;
        let body = r#"{
            "news_results": [
                {
                    "title": "Direct story",
                    "link": "https://news.example/a",
                    "source": {"name": "Example News", "icon": "https://news.example/icon.png"},
                    "date": "07/28/2026, 07:00 AM, +0000 UTC",
                    "thumbnail": "https://news.example/a.jpg"
                },
                {
                    "highlight": {
                        "title": "Nested story",
                        "link": "https://news.example/b",
                        "source": {"name": "Other"}
                    }
                },
                {"title": "dropped, no link"}
            ]
        }"#;
        Mock::given(method("GET"))
            .and(query_param("engine", "google_news"))
            .and(query_param("gl", "in"))
            .and(query_param("hl", "en"))
            .and(query_param("api_key", "k"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let feed = NewsFeed::new(HttpClient::new().unwrap(), &settings(&server.uri(), true));
        let items = feed.fetch().await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Direct story");
        assert_eq!(items[0].source.as_deref(), Some("Example News"));
        assert_eq!(items[0].source_icon.as_deref(), Some("https://news.example/icon.png"));
        assert_eq!(items[1].title, "Nested story");
        assert_eq!(items[1].link, "https://news.example/b");
    }

    #[tokio::test]
    async fn test_unconfigured_returns_empty_without_request() {
        let feed = NewsFeed::new(
            HttpClient::new().unwrap(),
            &settings("http://127.0.0.1:1", false),
        );
        assert!(feed.fetch().await.unwrap().is_empty());
    }

    #[test]
    fn test_missing_news_results_is_empty() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"search_metadata":{"status":"ok"}}"#).unwrap();
        assert!(parse_news_results(&json).is_empty());
    }
}
