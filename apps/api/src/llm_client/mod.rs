//! LLM Client: the single point of entry for all text-completion calls.
//!
//! No other module talks to the completion API directly; everything goes
//! through `CompletionClient` so handlers and tests never depend on the wire.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A text-completion service: one system instruction plus one user prompt in,
/// one reply out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// OpenAI-compatible chat-completions client.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
    max_attempts: u32,
}

impl LlmClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key: config.openai_api_key.clone(),
            api_url: config.openai_api_url.clone(),
            model: config.openai_model.clone(),
            max_attempts: config.llm_max_attempts.max(1),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a raw chat-completions call, returning the full response object.
    /// Retries on 429 and 5xx with exponential backoff when more than one
    /// attempt is configured.
    pub async fn call(&self, system: &str, prompt: &str) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                // 1s, 2s, 4s, ...
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1).min(5)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.api_url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: api_error_message(body),
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message: api_error_message(body),
                });
            }

            let chat_response: ChatResponse = response.json().await?;

            if let Some(usage) = &chat_response.usage {
                debug!(
                    "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens, usage.completion_tokens
                );
            }

            return Ok(chat_response);
        }

        Err(last_error.unwrap_or(LlmError::EmptyContent))
    }
}

#[async_trait]
impl CompletionClient for LlmClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(system, prompt).await?;
        let text = response.text().map(str::trim).unwrap_or_default();
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text.to_string())
    }
}

/// Pulls `error.message` out of an API error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<ApiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use super::*;

    fn test_config(api_url: String, max_attempts: u32) -> Config {
        Config {
            openai_api_key: "test-key".to_string(),
            openai_model: crate::config::DEFAULT_MODEL.to_string(),
            openai_api_url: api_url,
            llm_max_attempts: max_attempts,
            database_file: "unused.json".into(),
            cors_allowed_origins: Vec::new(),
            max_upload_bytes: 1024,
            port: 0,
            rust_log: "info".to_string(),
        }
    }

    /// Serves `router` on an ephemeral port and returns its completions URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/v1/chat/completions")
    }

    #[test]
    fn test_response_text_first_choice() {
        let json = r#"{
            "choices": [{"message": {"role": "assistant", "content": "  What is Rust?  "}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 4, "total_tokens": 14}
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("  What is Rust?  "));
        assert_eq!(response.usage.unwrap().completion_tokens, 4);
    }

    #[test]
    fn test_response_without_choices_has_no_text() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_api_error_message_parsing() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(
            api_error_message(body.to_string()),
            "Incorrect API key provided"
        );
        assert_eq!(api_error_message("plain".to_string()), "plain");
    }

    #[tokio::test]
    async fn test_complete_sends_system_and_user_messages() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["model"], crate::config::DEFAULT_MODEL);
                assert_eq!(body["messages"][0]["role"], "system");
                assert_eq!(body["messages"][1]["role"], "user");
                assert_eq!(body["messages"][1]["content"], "the prompt");
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": "\n Tell me about ownership. \n"}}]
                }))
            }),
        );
        let url = serve(router).await;
        let client = LlmClient::new(&test_config(url, 1)).unwrap();

        let text = client.complete("be an interviewer", "the prompt").await.unwrap();
        assert_eq!(text, "Tell me about ownership.");
    }

    #[tokio::test]
    async fn test_complete_reports_auth_failure() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"error": {"message": "Incorrect API key provided"}})),
                )
            }),
        );
        let url = serve(router).await;
        let client = LlmClient::new(&test_config(url, 3)).unwrap();

        let err = client.complete("s", "p").await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_single_attempt_does_not_retry_server_errors() {
        let hits = Arc::new(AtomicU32::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/v1/chat/completions",
            post(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
                }
            }),
        );
        let url = serve(router).await;
        let client = LlmClient::new(&test_config(url, 1)).unwrap();

        let err = client.complete("s", "p").await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 500, .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_content_is_an_error() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({"choices": [{"message": {"content": "   "}}]})) }),
        );
        let url = serve(router).await;
        let client = LlmClient::new(&test_config(url, 1)).unwrap();

        let err = client.complete("s", "p").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }
}
