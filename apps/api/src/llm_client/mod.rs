/// LLM Client — the single point of entry for all chat-completion calls.
///
/// ARCHITECTURAL RULE: No other module may call the completion API directly.
/// Handlers depend on the `CompletionService` trait; `LlmClient` is the production
/// implementation speaking the OpenAI-compatible chat-completions wire format.
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::ErrorKind;

pub mod prompts;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// Deterministic classification of an upstream failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LlmError::Api { status: 429, .. } => ErrorKind::RateLimited,
            LlmError::Api { status: 401, .. } => ErrorKind::AuthFailure,
            LlmError::Api {
                status: 400,
                code,
                message,
            } if mentions_model(code.as_deref(), message) => ErrorKind::ModelConfigError,
            _ => ErrorKind::UpstreamUnavailable,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::Api { status, .. } => Some(*status),
            LlmError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

fn mentions_model(code: Option<&str>, message: &str) -> bool {
    code.is_some_and(|c| c.contains("model")) || message.to_lowercase().contains("model")
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

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Per-task sampling parameters. Fixed per endpoint, never adjusted on retry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f64,
    max_tokens: u32,
    top_p: f64,
    frequency_penalty: f64,
    presence_penalty: f64,
    stream: bool,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
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
    #[serde(default)]
    pub total_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

impl ChatCompletionResponse {
    /// Trimmed content of the first choice, if it has any non-whitespace text.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

/// Outcome of a successful completion. `text` is trimmed and never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResult {
    pub text: String,
    pub tokens_used: Option<u32>,
    pub latency_ms: u64,
}

/// Seam between the request pipeline and the completion provider.
///
/// Carried in `AppState` as `Arc<dyn CompletionService>`.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &SamplingParams,
    ) -> Result<CompletionResult, LlmError>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}

/// The chat-completions client used by all AI endpoints.
/// Applies an explicit request timeout and retries rate-limited calls only.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
    max_attempts: u32,
    retry_base: Duration,
}

impl LlmClient {
    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(config.llm_timeout).build()?;

        Ok(Self {
            client,
            api_url: config.llm_api_url.clone(),
            api_key: config.llm_api_key.clone(),
            model: config.llm_model.clone(),
            timeout: config.llm_timeout,
            max_attempts: config.llm_max_attempts.max(1),
            retry_base: config.llm_retry_base,
        })
    }

    /// Calls the completion API, returning the trimmed text of the first choice.
    /// A 429 is retried with exponential backoff until `max_attempts` is reached;
    /// every other failure is returned after a single attempt.
    pub async fn call(
        &self,
        messages: &[ChatMessage],
        params: &SamplingParams,
    ) -> Result<CompletionResult, LlmError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            top_p: params.top_p,
            frequency_penalty: params.frequency_penalty,
            presence_penalty: params.presence_penalty,
            stream: false,
            messages,
        };

        let started = Instant::now();
        let mut attempt = 1;

        let response = loop {
            match self.send_once(&request_body).await {
                Err(e) if e.kind() == ErrorKind::RateLimited && attempt < self.max_attempts => {
                    // Exponential backoff: base, 2x base, 4x base, ...
                    let delay = self
                        .retry_base
                        .saturating_mul(2u32.saturating_pow(attempt - 1));
                    warn!(
                        "LLM call attempt {} rate limited, retrying after {}ms...",
                        attempt,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => break other?,
            }
        };

        let latency_ms = started.elapsed().as_millis() as u64;
        let text = response.text().ok_or(LlmError::EmptyContent)?.to_string();
        let tokens_used = response.usage.as_ref().map(|u| u.total_tokens);

        debug!(
            "LLM call succeeded: attempts={}, total_tokens={:?}, completion_tokens={:?}, latency_ms={}",
            attempt,
            tokens_used,
            response.usage.as_ref().map(|u| u.completion_tokens),
            latency_ms
        );

        Ok(CompletionResult {
            text,
            tokens_used,
            latency_ms,
        })
    }

    async fn send_once(
        &self,
        request_body: &ChatCompletionRequest<'_>,
    ) -> Result<ChatCompletionResponse, LlmError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(request_body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API returned {}: {}", status, body);
            return Err(parse_api_error(status.as_u16(), body));
        }

        response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout(self.timeout)
        } else {
            LlmError::Http(e)
        }
    }
}

#[async_trait]
impl CompletionService for LlmClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &SamplingParams,
    ) -> Result<CompletionResult, LlmError> {
        self.call(messages, params).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Builds an `LlmError::Api`, preferring the provider's structured error message.
fn parse_api_error(status: u16, body: String) -> LlmError {
    match serde_json::from_str::<ApiErrorEnvelope>(&body) {
        Ok(envelope) => LlmError::Api {
            status,
            code: envelope
                .error
                .code
                .and_then(|c| c.as_str().map(str::to_string)),
            message: envelope.error.message,
        },
        Err(_) => LlmError::Api {
            status,
            code: None,
            message: body,
        },
    }
}
