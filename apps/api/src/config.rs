use anyhow::{Context, Result};

pub const DEFAULT_API_VERSION: &str = "2025-01-01-preview";

/// Application configuration loaded once from environment variables at startup.
///
/// The downstream settings are optional here: a process without them still
/// serves `/health`, and `POST /api/generate` reports a configuration error.
#[derive(Debug, Clone)]
pub struct Config {
    pub azure: Option<AzureSettings>,
    pub port: u16,
    pub rust_log: String,
    /// Empty means any origin (mirrored, credentials allowed).
    pub cors_allowed_origins: Vec<String>,
}

/// Everything needed to reach the Azure OpenAI chat-completions deployment.
#[derive(Clone)]
pub struct AzureSettings {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
}

// Hand-written so the key never reaches a log line.
impl std::fmt::Debug for AzureSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureSettings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl AzureSettings {
    /// Returns `None` unless all three required values are present.
    pub fn resolve(
        endpoint: Option<String>,
        api_key: Option<String>,
        deployment: Option<String>,
        api_version: String,
    ) -> Option<Self> {
        Some(AzureSettings {
            endpoint: endpoint?.trim_end_matches('/').to_string(),
            api_key: api_key?,
            deployment: deployment?,
            api_version,
        })
    }

    /// `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version={version}`
    pub fn chat_completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, self.api_version
        )
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_version = optional_env("AZURE_OPENAI_API_VERSION")
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        Ok(Config {
            azure: AzureSettings::resolve(
                optional_env("AZURE_OPENAI_ENDPOINT"),
                optional_env("AZURE_OPENAI_KEY"),
                optional_env("AZURE_OPENAI_DEPLOYMENT"),
                api_version,
            ),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            cors_allowed_origins: optional_env("CORS_ALLOWED_ORIGINS")
                .map(|raw| parse_origin_list(&raw))
                .unwrap_or_default(),
        })
    }

    /// Names of the required Azure variables that were not provided.
    pub fn missing_azure_vars() -> Vec<&'static str> {
        ["AZURE_OPENAI_ENDPOINT", "AZURE_OPENAI_KEY", "AZURE_OPENAI_DEPLOYMENT"]
            .into_iter()
            .filter(|key| optional_env(key).is_none())
            .collect()
    }
}

/// Reads a variable, treating unset and blank the same way.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
