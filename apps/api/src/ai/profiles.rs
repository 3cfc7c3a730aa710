//! Task profiles — the static, per-endpoint configuration of the AI endpoints.
//!
//! A profile bundles validation bounds, sampling parameters, prompts and the
//! user-facing wording of every failure. Profiles are process-wide constants.

use crate::ai::prompts::{
    GRAMMAR_SYSTEM, GRAMMAR_TEMPLATE, RESUME_SYSTEM, RESUME_TEMPLATE, REWRITE_SYSTEM,
    REWRITE_TEMPLATE,
};
use crate::llm_client::SamplingParams;

/// A user-facing message with an optional actionable hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub message: &'static str,
    pub suggestion: Option<&'static str>,
}

/// Endpoint-specific wording for rejections and upstream failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskMessages {
    /// Noun used in length errors, e.g. "Resume text".
    pub subject: &'static str,
    pub missing_text: &'static str,
    pub split_suggestion: &'static str,
    pub rate_limited: Notice,
    pub auth_failure: Notice,
    pub model_config: Notice,
    pub unavailable: Notice,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskProfile {
    pub name: &'static str,
    /// `event` field of the structured success log line.
    pub event: &'static str,
    pub min_len: usize,
    pub max_len: usize,
    /// Ceiling on `ceil(chars / 4)`, checked after the character bounds.
    pub max_input_tokens: Option<usize>,
    pub sampling: SamplingParams,
    pub system_prompt: &'static str,
    pub user_prompt_template: &'static str,
    pub messages: TaskMessages,
}

const AUTH_FAILURE: Notice = Notice {
    message: "Authentication failed",
    suggestion: Some("Check your API key configuration"),
};

pub static REWRITE: TaskProfile = TaskProfile {
    name: "rewrite",
    event: "rewrite_success",
    min_len: 5,
    max_len: 5000,
    max_input_tokens: Some(1000),
    sampling: SamplingParams {
        max_tokens: 500,
        temperature: 0.3,
        top_p: 0.95,
        frequency_penalty: 0.2,
        presence_penalty: 0.1,
    },
    system_prompt: REWRITE_SYSTEM,
    user_prompt_template: REWRITE_TEMPLATE,
    messages: TaskMessages {
        subject: "Text",
        missing_text: "Invalid input: Text is required",
        split_suggestion: "Please break your text into smaller chunks",
        rate_limited: Notice {
            message: "Rate limit exceeded",
            suggestion: Some("Please wait a moment and try again"),
        },
        auth_failure: AUTH_FAILURE,
        model_config: Notice {
            message: "Model configuration error",
            suggestion: Some("Contact support - model may need updating"),
        },
        unavailable: Notice {
            message: "Text rewriting service unavailable",
            suggestion: Some("Please try again in a few moments"),
        },
    },
};

pub static FIX_GRAMMAR: TaskProfile = TaskProfile {
    name: "fix-grammar",
    event: "grammar_fix_success",
    min_len: 5,
    max_len: 3000,
    max_input_tokens: None,
    sampling: SamplingParams {
        max_tokens: 300,
        temperature: 0.1,
        top_p: 0.95,
        frequency_penalty: 0.1,
        presence_penalty: 0.1,
    },
    system_prompt: GRAMMAR_SYSTEM,
    user_prompt_template: GRAMMAR_TEMPLATE,
    messages: TaskMessages {
        subject: "Text",
        missing_text: "Text input is required and must be a string",
        split_suggestion: "Please process smaller sections at a time",
        rate_limited: Notice {
            message: "Too many requests",
            suggestion: Some("Please wait a moment before trying again"),
        },
        auth_failure: AUTH_FAILURE,
        model_config: Notice {
            message: "Service update required",
            suggestion: Some("Contact support for assistance"),
        },
        unavailable: Notice {
            message: "Grammar checking service unavailable",
            suggestion: Some("Please try again shortly"),
        },
    },
};

pub static RESUME_OPTIMIZE: TaskProfile = TaskProfile {
    name: "resume-optimize",
    event: "resume_optimize_success",
    min_len: 5,
    max_len: 1000,
    max_input_tokens: None,
    sampling: SamplingParams {
        max_tokens: 200,
        temperature: 0.25,
        top_p: 0.9,
        frequency_penalty: 0.15,
        presence_penalty: 0.1,
    },
    system_prompt: RESUME_SYSTEM,
    user_prompt_template: RESUME_TEMPLATE,
    messages: TaskMessages {
        subject: "Resume text",
        missing_text: "Resume text input is required",
        split_suggestion: "Please optimize one bullet point or section at a time",
        rate_limited: Notice {
            message: "Rate limit exceeded for resume optimization",
            suggestion: Some("Please wait 1-2 minutes before trying again"),
        },
        auth_failure: Notice {
            message: "Authentication failed",
            suggestion: Some("Check your API configuration"),
        },
        model_config: Notice {
            message: "Model configuration error",
            suggestion: Some("Contact support - model may need updating"),
        },
        unavailable: Notice {
            message: "Resume optimization service unavailable",
            suggestion: Some("Please try again in a few moments"),
        },
    },
};
