//! Autocomplete backends for remote search suggestions
//!
//! The remote half of the suggestion pipeline: thin adapters over public
//! suggest endpoints that all speak the positional
//! `[query, [suggestion, ...], ...]` payload.

mod backends;

pub use backends::{get_backend, list_backends, AutocompleteBackend, Brave, DuckDuckGo, Google};

use crate::metrics;
use crate::network::HttpClient;
use crate::suggest::SuggestionSource;
use anyhow::Result;
use async_trait::async_trait;

/// Fetch autocomplete suggestions from a named backend
pub async fn fetch_suggestions(
    client: &HttpClient,
    backend: &str,
    query: &str,
) -> Result<Vec<String>> {
    let backend = get_backend(backend)
        .ok_or_else(|| anyhow::anyhow!("Unknown autocomplete backend: {}", backend))?;

    metrics::global().record_backend_query(backend.name());
    backend.suggest(client, query).await
}

/// A backend bound to the shared client, usable as the aggregator's
/// remote source
pub struct RemoteSuggestions {
    client: HttpClient,
    backend: Box<dyn AutocompleteBackend>,
}

impl RemoteSuggestions {
    pub fn new(client: HttpClient, backend_name: &str) -> Result<Self> {
        let backend = get_backend(backend_name)
            .ok_or_else(|| anyhow::anyhow!("Unknown autocomplete backend: {}", backend_name))?;
        Ok(Self { client, backend })
    }

    /// Bind an already-constructed backend, mainly for tests
    pub fn with_backend(client: HttpClient, backend: Box<dyn AutocompleteBackend>) -> Self {
        Self { client, backend }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }
}

#[async_trait]
impl SuggestionSource for RemoteSuggestions {
    async fn fetch(&self, query: &str) -> Result<Vec<String>> {
        metrics::global().record_backend_query(self.backend.name());
        self.backend.suggest(&self.client, query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_backends() {
        let backends = list_backends();
        assert!(backends.contains(&"duckduckgo"));
        assert!(backends.contains(&"google"));
        assert!(backends.contains(&"brave"));
    }

    #[test]
    fn test_remote_suggestions_rejects_unknown_backend() {
        let client = HttpClient::new().unwrap();
        assert!(RemoteSuggestions::new(client, "altavista").is_err());
    }

    #[test]
    fn test_remote_suggestions_binds_backend() {
        let client = HttpClient::new().unwrap();
        let remote = RemoteSuggestions::new(client, "ddg").unwrap();
        assert_eq!(remote.backend_name(), "duckduckgo");
    }
}
