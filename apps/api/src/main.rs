mod config;
mod errors;
mod generation;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; missing Azure settings are reported per request, not here
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting prompt-proxy v{}", env!("CARGO_PKG_VERSION"));

    match &config.azure {
        Some(azure) => info!(
            "Azure OpenAI deployment '{}' at {} (api-version {})",
            azure.deployment, azure.endpoint, azure.api_version
        ),
        None => warn!(
            "Azure OpenAI not configured (missing: {}); /api/generate will return 500",
            Config::missing_azure_vars().join(", ")
        ),
    }

    let llm = LlmClient::new()?;
    info!(
        "LLM client initialized (timeout: {}s)",
        llm_client::REQUEST_TIMEOUT.as_secs()
    );

    if config.cors_allowed_origins.is_empty() {
        warn!("CORS allows any origin; set CORS_ALLOWED_ORIGINS to restrict it");
    }
    let cors = cors_layer(&config)?;

    let state = AppState {
        llm,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
