//! Axum route handlers for the Generation API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::errors::AppError;
use crate::generation::generator::{
    generate_prompt, require_settings, GenerateRequest, GenerateResponse,
};
use crate::state::AppState;

/// POST /api/generate
///
/// Body rejections are reported as validation errors, but only after the
/// configuration check so a misconfigured process always answers 500.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            require_settings(&state.config)?;
            return Err(AppError::Validation(format!(
                "Invalid request body: {}",
                rejection.body_text()
            )));
        }
    };

    let response = generate_prompt(&state.config, &state.llm, request).await?;
    Ok(Json(response))
}
