//! Response envelopes for the AI endpoints.

use serde::Serialize;

use crate::ai::profiles::{Notice, TaskProfile};
use crate::errors::{AppError, ErrorKind};
use crate::llm_client::{CompletionResult, LlmError};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultMetadata {
    pub input_length: usize,
    pub output_length: usize,
    /// Upstream latency in milliseconds.
    pub processing_time: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessEnvelope {
    pub result: String,
    pub metadata: ResultMetadata,
}

/// Wraps a completion for the caller. An empty completion is an upstream
/// failure, never a 200 with an empty `result`.
pub fn success(
    profile: &TaskProfile,
    input: &str,
    completion: CompletionResult,
) -> Result<SuccessEnvelope, AppError> {
    let result = completion.text.trim();
    if result.is_empty() {
        return Err(upstream_failure(profile, &LlmError::EmptyContent));
    }

    Ok(SuccessEnvelope {
        metadata: ResultMetadata {
            input_length: input.chars().count(),
            output_length: result.chars().count(),
            processing_time: completion.latency_ms,
            tokens_used: completion.tokens_used,
        },
        result: result.to_string(),
    })
}

/// Maps a classified upstream failure to the endpoint's wording.
/// The raw upstream message is kept as `details`; `AppError::redact` drops it in production.
pub fn upstream_failure(profile: &TaskProfile, err: &LlmError) -> AppError {
    let kind = err.kind();
    let messages = &profile.messages;
    let notice: Notice = match kind {
        ErrorKind::RateLimited => messages.rate_limited,
        ErrorKind::AuthFailure => messages.auth_failure,
        ErrorKind::ModelConfigError => messages.model_config,
        _ => messages.unavailable,
    };

    let mut error = AppError::new(kind, notice.message).with_details(err.to_string());
    if let Some(suggestion) = notice.suggestion {
        error = error.with_suggestion(suggestion);
    }
    error
}
