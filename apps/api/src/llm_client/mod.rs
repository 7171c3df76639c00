/// LLM Client: the single point of entry for Azure OpenAI chat-completion calls.
///
/// No other module talks to the downstream API directly. One call per request,
/// bounded by `REQUEST_TIMEOUT`, never retried.
use std::time::Duration;

use reqwest::{redirect, Client};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::AzureSettings;

pub mod prompts;

/// Hard bound on a downstream call, covering connect, send and body read.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const MAX_TOKENS: u32 = 500;
pub const TEMPERATURE: f64 = 0.7;
pub const TOP_P: f64 = 0.95;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Network(reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("LLM returned no choices")]
    NoChoices,

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Body of a chat-completions request. Built fresh for each call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatPayload {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
}

impl ChatPayload {
    /// System framing plus one user turn, with the fixed sampling parameters.
    pub fn new(system: &str, user: String) -> Self {
        Self {
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: system.to_string(),
                },
                ChatMessage {
                    role: Role::User,
                    content: user,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            top_p: TOP_P,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletion {
    pub choices: Option<Vec<Choice>>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl ChatCompletion {
    /// Trimmed content of the first choice.
    ///
    /// An empty `choices` list and a blank first message are reported separately.
    pub fn text(&self) -> Result<&str, LlmError> {
        let first = self
            .choices
            .as_deref()
            .and_then(<[Choice]>::first)
            .ok_or(LlmError::NoChoices)?;

        let text = first
            .message
            .as_ref()
            .and_then(|m| m.content.as_deref())
            .unwrap_or_default()
            .trim();

        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text)
    }
}

/// Shared HTTP client for the Azure OpenAI deployment.
/// Cheap to clone; the connection pool is shared between clones.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
}

impl LlmClient {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    /// Redirects are never followed: a 3xx is reported as an API error, and the
    /// `api-key` header is only ever sent to the configured endpoint.
    pub fn with_timeout(timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .redirect(redirect::Policy::none())
                .build()?,
        })
    }

    /// Makes exactly one call to the chat-completions endpoint and decodes the result.
    pub async fn chat(
        &self,
        settings: &AzureSettings,
        payload: &ChatPayload,
    ) -> Result<ChatCompletion, LlmError> {
        let response = self
            .client
            .post(settings.chat_completions_url())
            .header("api-key", &settings.api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        debug!("Azure OpenAI responded with {status}");

        if !status.is_success() {
            let body = response.text().await?;
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let completion: ChatCompletion = serde_json::from_slice(&bytes)?;

        if let Some(usage) = &completion.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}, total_tokens={}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_API_VERSION;
    use httpmock::prelude::*;
    use serde_json::json;

    fn settings_for(server: &MockServer) -> AzureSettings {
        AzureSettings {
            endpoint: server.base_url(),
            api_key: "test-key".to_string(),
            deployment: "gpt-test".to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    fn completion(body: serde_json::Value) -> ChatCompletion {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_payload_serializes_expected_shape() {
        let payload = ChatPayload::new("sys", "user text".to_string());
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][0]["content"], "sys");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "user text");
        assert_eq!(value["max_tokens"], 500);
        assert!(value["temperature"].is_number());
        assert!(value["top_p"].is_number());
    }

    #[test]
    fn test_text_trims_content() {
        let c = completion(json!({"choices": [{"message": {"content": "  hello \n"}}]}));
        assert_eq!(c.text().unwrap(), "hello");
    }

    #[test]
    fn test_text_no_choices() {
        assert!(matches!(
            completion(json!({"choices": []})).text(),
            Err(LlmError::NoChoices)
        ));
        assert!(matches!(
            completion(json!({})).text(),
            Err(LlmError::NoChoices)
        ));
        assert!(matches!(
            completion(json!({"choices": null})).text(),
            Err(LlmError::NoChoices)
        ));
    }

    #[test]
    fn test_text_blank_or_missing_content() {
        for body in [
            json!({"choices": [{"message": {"content": "   "}}]}),
            json!({"choices": [{"message": {}}]}),
            json!({"choices": [{}]}),
        ] {
            assert!(matches!(completion(body).text(), Err(LlmError::EmptyContent)));
        }
    }

    #[tokio::test]
    async fn test_chat_sends_key_version_and_payload() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/openai/deployments/gpt-test/chat/completions")
                    .query_param("api-version", DEFAULT_API_VERSION)
                    .header("api-key", "test-key")
                    .json_body(json!({
                        "messages": [
                            {"role": "system", "content": "sys"},
                            {"role": "user", "content": "hi"}
                        ],
                        "max_tokens": MAX_TOKENS,
                        "temperature": TEMPERATURE,
                        "top_p": TOP_P
                    }));
                then.status(200).json_body(json!({
                    "choices": [{"message": {"role": "assistant", "content": "ok"}}],
                    "usage": {"prompt_tokens": 3, "completion_tokens": 1, "total_tokens": 4}
                }));
            })
            .await;

        let client = LlmClient::new().unwrap();
        let payload = ChatPayload::new("sys", "hi".to_string());
        let result = client.chat(&settings_for(&server), &payload).await.unwrap();

        assert_eq!(result.text().unwrap(), "ok");
        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_chat_non_success_is_not_retried() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(429).body("Too Many Requests");
            })
            .await;

        let client = LlmClient::new().unwrap();
        let payload = ChatPayload::new("sys", "hi".to_string());
        let err = client
            .chat(&settings_for(&server), &payload)
            .await
            .unwrap_err();

        match err {
            LlmError::Api { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "Too Many Requests");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn test_chat_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200)
                    .delay(Duration::from_secs(3))
                    .json_body(json!({"choices": []}));
            })
            .await;

        let client = LlmClient::with_timeout(Duration::from_millis(200)).unwrap();
        let payload = ChatPayload::new("sys", "hi".to_string());
        let err = client
            .chat(&settings_for(&server), &payload)
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Timeout));
    }

    #[tokio::test]
    async fn test_chat_connection_refused_is_network_error() {
        let settings = AzureSettings {
            endpoint: "http://127.0.0.1:1".to_string(),
            api_key: "k".to_string(),
            deployment: "d".to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        };

        let client = LlmClient::new().unwrap();
        let payload = ChatPayload::new("sys", "hi".to_string());
        let err = client.chat(&settings, &payload).await.unwrap_err();

        assert!(matches!(err, LlmError::Network(_)));
    }

    #[tokio::test]
    async fn test_chat_invalid_json_is_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200).body("not valid json");
            })
            .await;

        let client = LlmClient::new().unwrap();
        let payload = ChatPayload::new("sys", "hi".to_string());
        let err = client
            .chat(&settings_for(&server), &payload)
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Decode(_)));
    }

    #[test]
    fn test_default_timeout_is_thirty_seconds() {
        assert_eq!(REQUEST_TIMEOUT, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_chat_does_not_follow_redirects() {
        let other = MockServer::start_async().await;
        let other_mock = other
            .mock_async(|when, then| {
                when.any_request();
                then.status(200)
                    .json_body(json!({"choices": [{"message": {"content": "elsewhere"}}]}));
            })
            .await;

        let server = MockServer::start_async().await;
        let location = other.url("/stolen");
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(307)
                    .header("location", location.as_str())
                    .body("moved");
            })
            .await;

        let client = LlmClient::new().unwrap();
        let payload = ChatPayload::new("sys", "hi".to_string());
        let err = client
            .chat(&settings_for(&server), &payload)
            .await
            .unwrap_err();

        match err {
            LlmError::Api { status, body } => {
                assert_eq!(status, 307);
                assert_eq!(body, "moved");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        mock.assert_hits_async(1).await;
        other_mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_chat_timeout_while_reading_error_body() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(
                    b"HTTP/1.1 429 Too Many Requests\r\nContent-Length: 100\r\n\r\npartial",
                )
                .await;
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let settings = AzureSettings {
            endpoint: format!("http://{addr}"),
            api_key: "k".to_string(),
            deployment: "d".to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        };

        let client = LlmClient::with_timeout(Duration::from_millis(300)).unwrap();
        let payload = ChatPayload::new("sys", "hi".to_string());
        let err = client.chat(&settings, &payload).await.unwrap_err();

        assert!(matches!(err, LlmError::Timeout), "got {err:?}");
    }
}
