//! HTTP networking module
//!
//! Provides the shared client used by the autocomplete, web search, and
//! feed adapters.

mod client;
mod user_agent;

pub use client::{HttpClient, HttpResponse};
pub use user_agent::generate_user_agent;
