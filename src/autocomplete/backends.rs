//! Autocomplete backend implementations

use crate::network::HttpClient;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Trait for autocomplete backends
#[async_trait]
pub trait AutocompleteBackend: Send + Sync {
    /// Backend name
    fn name(&self) -> &str;

    /// Fetch raw candidate strings for a query prefix. Non-2xx responses
    /// and unrecognized payload shapes yield zero suggestions; transport
    /// and JSON errors surface as `Err` for the caller to absorb.
    async fn suggest(&self, client: &HttpClient, query: &str) -> Result<Vec<String>>;
}

/// Get a backend by name
pub fn get_backend(name: &str) -> Option<Box<dyn AutocompleteBackend>> {
    match name.to_lowercase().as_str() {
        "duckduckgo" | "ddg" => Some(Box::new(DuckDuckGo::new())),
        "google" => Some(Box::new(Google::new())),
        "brave" => Some(Box::new(Brave::new())),
        _ => None,
    }
}

/// List available backends
pub fn list_backends() -> Vec<&'static str> {
    vec!["duckduckgo", "google", "brave"]
}

/// Extract candidate strings from the positional suggest payload
/// `[query, [suggestion, ...], ...]`. Non-string entries are discarded;
/// any other shape yields an empty list.
fn parse_suggest_payload(json: &serde_json::Value) -> Vec<String> {
    json.as_array()
        .and_then(|arr| arr.get(1))
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

/// DuckDuckGo autocomplete backend (the default)
pub struct DuckDuckGo {
    base_url: String,
}

impl DuckDuckGo {
    pub fn new() -> Self {
        Self {
            base_url: "https://ac.duckduckgo.com".to_string(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for DuckDuckGo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AutocompleteBackend for DuckDuckGo {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn suggest(&self, client: &HttpClient, query: &str) -> Result<Vec<String>> {
        let url = format!("{}/ac/", self.base_url);
        let mut params = HashMap::new();
        params.insert("q".to_string(), query.to_string());
        params.insert("type".to_string(), "list".to_string());

        let response = client.get_with_params(&url, params).await?;
        if !response.is_success() {
            return Ok(vec![]);
        }

        let json: serde_json::Value = serde_json::from_str(&response.text)?;
        Ok(parse_suggest_payload(&json))
    }
}

/// Google autocomplete backend
pub struct Google {
    base_url: String,
}

impl Google {
    pub fn new() -> Self {
        Self {
            base_url: "https://www.google.com".to_string(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for Google {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AutocompleteBackend for Google {
    fn name(&self) -> &str {
        "google"
    }

    async fn suggest(&self, client: &HttpClient, query: &str) -> Result<Vec<String>> {
        let url = format!("{}/complete/search", self.base_url);
        let mut params = HashMap::new();
        params.insert("q".to_string(), query.to_string());
        params.insert("client".to_string(), "firefox".to_string());

        let response = client.get_with_params(&url, params).await?;
        if !response.is_success() {
            return Ok(vec![]);
        }

        let json: serde_json::Value = serde_json::from_str(&response.text)?;
        Ok(parse_suggest_payload(&json))
    }
}

/// Brave autocomplete backend
pub struct Brave {
    base_url: String,
}

impl Brave {
    pub fn new() -> Self {
        Self {
            base_url: "https://search.brave.com".to_string(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for Brave {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AutocompleteBackend for Brave {
    fn name(&self) -> &str {
        "brave"
    }

    async fn suggest(&self, client: &HttpClient, query: &str) -> Result<Vec<String>> {
        let url = format!("{}/api/suggest", self.base_url);
        let mut params = HashMap::new();
        params.insert("q".to_string(), query.to_string());

        let response = client.get_with_params(&url, params).await?;
        if !response.is_success() {
            return Ok(vec![]);
        }

        let json: serde_json::Value = serde_json::from_str(&response.text)?;
        Ok(parse_suggest_payload(&json))
    }
}
