//! Settings structures for Omnibox configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub suggest: SuggestSettings,
    pub history: HistorySettings,
    pub websearch: WebSearchSettings,
    pub feed: FeedSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (OMNIBOX_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("OMNIBOX_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("OMNIBOX_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("OMNIBOX_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("OMNIBOX_SUGGEST_BACKEND") {
            self.suggest.backend = val;
        }
        if let Ok(val) = std::env::var("OMNIBOX_HISTORY_PATH") {
            self.history.storage_path = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("OMNIBOX_WEBSEARCH_API_KEY") {
            self.websearch.api_key = Some(val);
        }
        if let Ok(val) = std::env::var("OMNIBOX_WEBSEARCH_CX") {
            self.websearch.cx = Some(val);
        }
        if let Ok(val) = std::env::var("OMNIBOX_FEED_API_KEY") {
            self.feed.api_key = Some(val);
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug mode
    pub debug: bool,
    /// Instance name reported on /health
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "Omnibox".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8777,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Outgoing request settings
///
/// `request_timeout` bounds every remote call, including the suggestion
/// pass's autocomplete request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default request timeout in seconds
    pub request_timeout: f64,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: crate::DEFAULT_TIMEOUT as f64,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Suggestion pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestSettings {
    /// Autocomplete backend (duckduckgo, google, brave)
    pub backend: String,
    /// Quiescence window for the input debouncer in milliseconds
    pub debounce_ms: u64,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self {
            backend: "duckduckgo".to_string(),
            debounce_ms: crate::DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Search history persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Override for the history file location; defaults to the platform
    /// data directory
    pub storage_path: Option<PathBuf>,
    /// Keep history in memory only
    pub ephemeral: bool,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            storage_path: None,
            ephemeral: false,
        }
    }
}

/// Web search (results listing) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebSearchSettings {
    /// Custom Search endpoint
    pub endpoint: String,
    /// API key; listing is empty when unset
    pub api_key: Option<String>,
    /// Search engine id (cx)
    pub cx: Option<String>,
}

impl Default for WebSearchSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://www.googleapis.com/customsearch/v1".to_string(),
            api_key: None,
            cx: None,
        }
    }
}

/// News feed settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// News search endpoint
    pub endpoint: String,
    /// API key; feed is empty when unset
    pub api_key: Option<String>,
    /// Country code passed as gl
    pub gl: String,
    /// Language code passed as hl
    pub hl: String,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://serpapi.com/search.json".to_string(),
            api_key: None,
            gl: "in".to_string(),
            hl: "en".to_string(),
        }
    }
}
