use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failure taxonomy shared by every AI endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    InvalidInput,
    TooShort,
    TooLong,
    RateLimited,
    AuthFailure,
    ModelConfigError,
    UpstreamUnavailable,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::InvalidInput
            | ErrorKind::TooShort
            | ErrorKind::TooLong
            | ErrorKind::ModelConfigError => StatusCode::BAD_REQUEST,
            ErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::AuthFailure => StatusCode::UNAUTHORIZED,
            ErrorKind::UpstreamUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Estimated vs. allowed input tokens, surfaced when the token ceiling is hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBudget {
    pub estimated: usize,
    pub allowed: usize,
}

/// Application-level error: the uniform envelope for rejected or failed requests.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
    pub suggestion: Option<String>,
    /// Raw upstream message. Stripped by `redact` in production.
    pub details: Option<String>,
    pub token_budget: Option<TokenBudget>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            suggestion: None,
            details: None,
            token_budget: None,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_token_budget(mut self, budget: TokenBudget) -> Self {
        self.token_budget = Some(budget);
        self
    }

    /// Drops internal diagnostics when running in production.
    pub fn redact(mut self, production: bool) -> Self {
        if production {
            self.details = None;
        }
        self
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: String,
    kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    estimated_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.kind.status();

        // Upstream failures are logged with their cause where they are classified
        tracing::debug!(
            status = status.as_u16(),
            kind = %self.kind,
            "Responding with error: {}",
            self.message
        );

        let body = ErrorBody {
            error: self.message,
            kind: self.kind,
            suggestion: self.suggestion,
            details: self.details,
            estimated_tokens: self.token_budget.map(|b| b.estimated),
            max_tokens: self.token_budget.map(|b| b.allowed),
        };

        (status, Json(body)).into_response()
    }
}
