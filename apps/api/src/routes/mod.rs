pub mod health;

use anyhow::{Context, Result};
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::Config;
use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::index_handler))
        .route("/health", get(health::health_handler))
        .route("/api/generate", post(handlers::handle_generate))
        .with_state(state)
}

/// Cross-origin policy for browser and extension callers.
///
/// With no configured origins every origin is mirrored back with credentials
/// allowed. Otherwise only the listed origins are accepted.
pub fn cors_layer(config: &Config) -> Result<CorsLayer> {
    if config.cors_allowed_origins.is_empty() {
        return Ok(CorsLayer::very_permissive());
    }

    let origins = config
        .cors_allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid origin in CORS_ALLOWED_ORIGINS: '{origin}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}
