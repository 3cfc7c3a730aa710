//! Presets — named transform chains for common clean-up jobs.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::transforms::{apply_all, TransformOp};

static LEADING_INDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s+").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Flattens pasted chatbot output into clean prose.
    AiCleaner,
    EmailFormat,
    ResumeClean,
    SocialMedia,
    /// Strips indentation from every line.
    CodeFormat,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::AiCleaner,
        Preset::EmailFormat,
        Preset::ResumeClean,
        Preset::SocialMedia,
        Preset::CodeFormat,
    ];

    /// The transform chain behind the preset, in application order.
    /// `CodeFormat` is not expressible as a chain and returns an empty slice.
    pub fn chain(self) -> &'static [TransformOp] {
        match self {
            Preset::AiCleaner => &[
                TransformOp::RemoveLineBreaks,
                TransformOp::RemoveEmojis,
                TransformOp::RemoveExtraSpaces,
                TransformOp::ToSentenceCase,
            ],
            Preset::EmailFormat => &[
                TransformOp::RemoveExtraSpaces,
                TransformOp::RemoveLineBreaks,
            ],
            Preset::ResumeClean => &[
                TransformOp::RemoveLineBreaks,
                TransformOp::RemoveExtraSpaces,
                TransformOp::ToTitleCase,
            ],
            Preset::SocialMedia => &[TransformOp::RemoveExtraSpaces],
            Preset::CodeFormat => &[],
        }
    }

    pub fn apply(self, text: &str) -> String {
        match self {
            Preset::CodeFormat => strip_indentation(text),
            other => apply_all(text, other.chain()),
        }
    }
}

fn strip_indentation(text: &str) -> String {
    LEADING_INDENT.replace_all(text, "").trim().to_string()
}
