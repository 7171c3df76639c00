//! Prompt generation: the single request/response transform of the service.
//!
//! Flow: configuration check → context validation → template selection →
//!       payload construction → one downstream call → response normalization.
//!
//! Nothing here is retained between calls; every failure leaves as an `AppError`.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{AzureSettings, Config};
use crate::errors::AppError;
use crate::generation::templates::PromptType;
use crate::llm_client::prompts::user_message;
use crate::llm_client::{ChatPayload, LlmClient};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Request body for `POST /api/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    #[serde(rename = "type")]
    pub prompt_type: Option<String>,
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateResponse {
    pub prompt: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Downstream settings, or `ConfigurationError` when any required value is absent.
pub fn require_settings(config: &Config) -> Result<&AzureSettings, AppError> {
    config.azure.as_ref().ok_or_else(AppError::config_missing)
}

/// Builds the two-message conversation for a resolved prompt type.
/// `context` is passed through untrimmed.
pub fn build_payload(prompt_type: PromptType, context: &str) -> ChatPayload {
    let template = prompt_type.template();
    ChatPayload::new(
        template.system_prompt,
        user_message(template.instruction_prefix, context),
    )
}

/// Generates a crafted prompt for the request.
///
/// Steps:
/// 1. Fail with `ConfigurationError` if the downstream settings are incomplete
/// 2. Fail with `ValidationError` if `context` is missing or blank
/// 3. Resolve `type` to a template (unknown → write)
/// 4. Build the chat payload and make exactly one downstream call
/// 5. Return the trimmed content of the first choice
pub async fn generate_prompt(
    config: &Config,
    llm: &LlmClient,
    request: GenerateRequest,
) -> Result<GenerateResponse, AppError> {
    let settings = require_settings(config)?;

    let context = request
        .context
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(AppError::context_required)?;

    let prompt_type = PromptType::resolve(request.prompt_type.as_deref());
    info!(
        "Generating {} prompt (requested type: {:?}, context: {} chars)",
        prompt_type.as_str(),
        request.prompt_type,
        context.chars().count()
    );

    let payload = build_payload(prompt_type, context);
    let completion = llm.chat(settings, &payload).await?;
    let prompt = completion.text()?.to_string();

    Ok(GenerateResponse { prompt })
}
