//! Web server module
//!
//! The JSON API a search-box front end talks to.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
