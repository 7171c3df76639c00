use axum::Json;
use serde_json::{json, Value};

use crate::generation::templates::PromptType;

pub const SERVICE_NAME: &str = "prompt-proxy";

/// GET /health
/// Liveness only: does not look at downstream configuration or reachability.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /
/// Static descriptor of the available endpoints and prompt types.
pub async fn index_handler() -> Json<Value> {
    let types: Vec<&str> = PromptType::ALL.iter().map(|t| t.as_str()).collect();

    Json(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "generate": "POST /api/generate",
            "health": "GET /health"
        },
        "types": types,
        "default_type": PromptType::FALLBACK.as_str()
    }))
}
