use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Each variant is one failure kind of the generate flow; the `detail` string is
/// returned to the caller as-is.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    UpstreamTimeout(String),

    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn config_missing() -> Self {
        AppError::Configuration("Azure OpenAI configuration missing".to_string())
    }

    pub fn context_required() -> Self {
        AppError::Validation("Context is required".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Configuration(_)
            | AppError::Upstream(_)
            | AppError::Network(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
            AppError::UpstreamTimeout(_) => "UPSTREAM_TIMEOUT",
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Timeout => {
                AppError::UpstreamTimeout("Request to Azure OpenAI timed out".to_string())
            }
            LlmError::Network(e) => AppError::Network(format!("Network error: {e}")),
            LlmError::Api { status, body } => {
                AppError::Upstream(format!("Azure OpenAI API error: {status} - {body}"))
            }
            LlmError::NoChoices => AppError::Upstream("No response from Azure OpenAI".to_string()),
            LlmError::EmptyContent => {
                AppError::Upstream("Empty response from Azure OpenAI".to_string())
            }
            LlmError::Decode(e) => AppError::Internal(format!("Internal server error: {e}")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(code = self.code(), "{self}");
        } else {
            tracing::warn!(code = self.code(), "{self}");
        }

        let body = Json(json!({
            "status_code": status.as_u16(),
            "code": self.code(),
            "detail": self.to_string(),
        }));

        (status, body).into_response()
    }
}
