//! Omnibox: the backend of a search-box experience
//!
//! Implements the debounced suggestion pipeline (persisted search history
//! merged with remote autocomplete) plus the JSON fetchers behind the
//! surrounding screens: web search results and the home news feed.

pub mod autocomplete;
pub mod config;
pub mod feed;
pub mod history;
pub mod metrics;
pub mod network;
pub mod suggest;
pub mod web;
pub mod websearch;

pub use config::Settings;
pub use history::HistoryStore;
pub use suggest::{Suggestion, SuggestionBatch, SuggestionOrigin};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for outgoing requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 5;

/// Quiescence window for the input debouncer in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
