//! Omnibox: the backend of a search-box experience
//!
//! This is the main entry point for the application.

use anyhow::Result;
use omnibox::{
    config::Settings,
    history::{HistoryBackend, HistoryStore, JsonFileBackend, MemoryBackend},
    network::HttpClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    info!("Starting Omnibox v{}", omnibox::VERSION);

    // Load configuration
    let settings = load_settings()?;
    info!(
        "Loaded configuration for instance: {}",
        settings.general.instance_name
    );

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!("HTTP client initialized");

    // Load search history
    let backend = history_backend(&settings);
    let history = Arc::new(HistoryStore::load(backend).await);
    info!(
        "Loaded search history ({} entries)",
        history.entries().await.len()
    );

    // Create application state
    let state = AppState::new(settings.clone(), client, history)?;
    info!(
        "Suggestion pipeline ready (backend: {})",
        settings.suggest.backend
    );

    // Create router
    let app = create_router(state);

    // Bind address
    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    info!("Starting server on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Pick the history backend from settings
fn history_backend(settings: &Settings) -> Arc<dyn HistoryBackend> {
    if settings.history.ephemeral {
        info!("History is ephemeral, keeping it in memory only");
        return Arc::new(MemoryBackend::new());
    }

    let path = settings
        .history
        .storage_path
        .clone()
        .or_else(JsonFileBackend::default_path)
        .unwrap_or_else(|| PathBuf::from("searchHistory.json"));

    info!("Persisting search history to {}", path.display());
    Arc::new(JsonFileBackend::new(path))
}

/// Load settings from file or use defaults
fn load_settings() -> Result<Settings> {
    // Check environment variable first
    if let Ok(path) = std::env::var("OMNIBOX_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(&path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    // Check for settings file in the usual locations
    let paths = [
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/omnibox/settings.yml"),
        dirs::config_dir()
            .map(|p| p.join("omnibox/settings.yml"))
            .unwrap_or_default(),
    ];

    for path in paths.iter() {
        if path.exists() {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    // Use defaults
    info!("No settings file found, using defaults");
    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}
