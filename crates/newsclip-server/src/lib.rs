//! Newsclip Server
//!
//! Serves the HTTP API: login and session issue, integration and scrap CRUD,
//! persona summarization, and Slack delivery. Single-threaded per request -
//! each handler runs one caller-originated operation to completion, with
//! suspension only at I/O boundaries.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod session;

use config::ServerConfig;
use handlers::{create_router, AppState};
use identity::GoogleIdentityProvider;
use newsclip_slack::SlackClient;
use newsclip_store::SqliteStore;
use newsclip_summarizer::{OpenAiProvider, Summarizer};
use session::SessionManager;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Store initialization error
    #[error("Store error: {0}")]
    Store(#[from] newsclip_store::StoreError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the HTTP server.
///
/// Opens the store, wires the production provider/transport/identity
/// adapters into the shared state, and serves until shutdown.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Newsclip server");
    info!("Bind address: {}", config.bind_addr());
    info!("Database: {}", config.database_path);
    info!("Token expiry: {} seconds", config.token_expiry_secs);
    if config.openai_api_key.is_none() {
        info!("No completion provider key configured; summarization will fail until one is set");
    }

    let store = SqliteStore::new(&config.database_path)?;

    let provider = Arc::new(OpenAiProvider::with_base_url(
        &config.openai_base_url,
        config.openai_api_key.clone(),
    ));

    let state = AppState {
        store: Arc::new(Mutex::new(store)),
        sessions: Arc::new(SessionManager::new(
            &config.jwt_secret,
            config.token_expiry_secs,
        )),
        summarizer: Arc::new(Summarizer::new(provider)),
        slack: Arc::new(SlackClient::new()),
        identity: Arc::new(GoogleIdentityProvider::new()),
    };

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
