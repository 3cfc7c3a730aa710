//! Request validation for the AI endpoints.
//!
//! Runs before any upstream call. Lengths are counted in `char`s of the
//! trimmed text.

use serde_json::Value;

use crate::ai::profiles::TaskProfile;
use crate::errors::{AppError, ErrorKind, TokenBudget};

/// Rough token estimate: one token per four characters, rounded up.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Rejection for text over the profile's character limit.
pub fn too_long(profile: &TaskProfile) -> AppError {
    AppError::new(
        ErrorKind::TooLong,
        format!(
            "{} exceeds maximum length of {} characters",
            profile.messages.subject, profile.max_len
        ),
    )
    .with_suggestion(profile.messages.split_suggestion)
}

/// Extracts `text` from the request body and checks it against `profile`.
/// Returns the trimmed text, borrowed from the body.
pub fn validate_text<'a>(body: &'a Value, profile: &TaskProfile) -> Result<&'a str, AppError> {
    let messages = &profile.messages;

    let text = body
        .get("text")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::invalid_input(messages.missing_text))?;

    let trimmed = text.trim();
    let length = trimmed.chars().count();

    if length < profile.min_len {
        return Err(AppError::new(
            ErrorKind::TooShort,
            format!(
                "{} must be at least {} characters",
                messages.subject, profile.min_len
            ),
        ));
    }

    if length > profile.max_len {
        return Err(too_long(profile));
    }

    if let Some(allowed) = profile.max_input_tokens {
        let estimated = estimate_tokens(trimmed);
        if estimated > allowed {
            return Err(
                AppError::new(ErrorKind::TooLong, "Text too long for processing")
                    .with_suggestion(messages.split_suggestion)
                    .with_token_budget(TokenBudget { estimated, allowed }),
            );
        }
    }

    Ok(trimmed)
}
