//! Suggestion pipeline
//!
//! Keystrokes flow through the debouncer into the aggregator, which merges
//! history matches with remote autocomplete results into one ranked,
//! de-duplicated batch. The session object wires the pieces together the
//! way a search-box UI embeds them.

mod aggregator;
mod debounce;
mod session;

pub use aggregator::{SuggestionAggregator, SuggestionSource, MIN_QUERY_LEN};
pub use debounce::{Debouncer, Pass, PassState};
pub use session::SearchBox;

use serde::{Deserialize, Serialize};

/// Where a suggestion came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionOrigin {
    History,
    Remote,
}

/// A single candidate completion, display-only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub origin: SuggestionOrigin,
}

impl Suggestion {
    pub fn history(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: SuggestionOrigin::History,
        }
    }

    pub fn remote(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: SuggestionOrigin::Remote,
        }
    }
}

/// The ranked, de-duplicated list produced for one query prefix.
///
/// History-derived entries always precede remote-derived ones, and no two
/// entries are case-insensitively equal. Recomputed per debounced
/// keystroke, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionBatch {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
}

impl SuggestionBatch {
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    /// An empty batch means the UI shows its explicit "no suggestions"
    /// state
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }
}
