//! Deterministic text transforms.
//!
//! Every transform is a total, pure `&str -> String` function: empty input gives
//! empty output and nothing can fail. Callers compose them freely.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

pub mod featured;
pub mod handlers;
pub mod presets;
pub mod stats;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static LINE_BREAK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").expect("valid regex"));
static SENTENCE_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^\s*\w|[.!?]\s*\w)").expect("valid regex"));
static WORD_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w").expect("valid regex"));
static EMOJI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{Emoji_Presentation}\p{Extended_Pictographic}]").expect("valid regex")
});
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("valid regex"));
static SPECIAL_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));
static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]+(.)").expect("valid regex"));

fn uppercase_match(caps: &Captures) -> String {
    caps[0].to_uppercase()
}

/// Collapses every whitespace run to a single space and trims both ends.
pub fn remove_extra_spaces(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Replaces every run of `\n` with a single space.
pub fn remove_line_breaks(text: &str) -> String {
    LINE_BREAK_RUN.replace_all(text, " ").into_owned()
}

pub fn to_upper_case(text: &str) -> String {
    text.to_uppercase()
}

pub fn to_lower_case(text: &str) -> String {
    text.to_lowercase()
}

/// Lowercases, then capitalises the first word character of the text and the
/// first one after each `.`, `!` or `?`.
pub fn to_sentence_case(text: &str) -> String {
    let lower = text.to_lowercase();
    SENTENCE_START
        .replace_all(&lower, uppercase_match)
        .into_owned()
}

/// Lowercases, then capitalises the first character of every word.
pub fn to_title_case(text: &str) -> String {
    let lower = text.to_lowercase();
    WORD_START.replace_all(&lower, uppercase_match).into_owned()
}

/// Lowercases, drops runs of non-alphanumeric ASCII and uppercases the
/// character that follows each run: `"hello big world"` → `"helloBigWorld"`.
pub fn to_camel_case(text: &str) -> String {
    let lower = text.to_lowercase();
    CAMEL_BOUNDARY
        .replace_all(&lower, |caps: &Captures| caps[1].to_uppercase())
        .into_owned()
}

pub fn remove_emojis(text: &str) -> String {
    EMOJI.replace_all(text, "").into_owned()
}

pub fn remove_numbers(text: &str) -> String {
    DIGIT.replace_all(text, "").into_owned()
}

/// Keeps word characters (any script) and whitespace; drops everything else.
pub fn remove_special_chars(text: &str) -> String {
    SPECIAL_CHAR.replace_all(text, "").into_owned()
}

/// Reverses the text by extended grapheme cluster, so combining marks and
/// multi-codepoint emoji survive intact.
pub fn reverse_text(text: &str) -> String {
    text.graphemes(true).rev().collect()
}

/// A single named transform, as exposed over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformOp {
    RemoveExtraSpaces,
    RemoveLineBreaks,
    ToUpperCase,
    ToLowerCase,
    ToSentenceCase,
    ToTitleCase,
    ToCamelCase,
    RemoveEmojis,
    RemoveNumbers,
    RemoveSpecialChars,
    ReverseText,
}

impl TransformOp {
    pub const ALL: [TransformOp; 11] = [
        TransformOp::RemoveExtraSpaces,
        TransformOp::RemoveLineBreaks,
        TransformOp::ToUpperCase,
        TransformOp::ToLowerCase,
        TransformOp::ToSentenceCase,
        TransformOp::ToTitleCase,
        TransformOp::ToCamelCase,
        TransformOp::RemoveEmojis,
        TransformOp::RemoveNumbers,
        TransformOp::RemoveSpecialChars,
        TransformOp::ReverseText,
    ];

    pub fn apply(self, text: &str) -> String {
        match self {
            TransformOp::RemoveExtraSpaces => remove_extra_spaces(text),
            TransformOp::RemoveLineBreaks => remove_line_breaks(text),
            TransformOp::ToUpperCase => to_upper_case(text),
            TransformOp::ToLowerCase => to_lower_case(text),
            TransformOp::ToSentenceCase => to_sentence_case(text),
            TransformOp::ToTitleCase => to_title_case(text),
            TransformOp::ToCamelCase => to_camel_case(text),
            TransformOp::RemoveEmojis => remove_emojis(text),
            TransformOp::RemoveNumbers => remove_numbers(text),
            TransformOp::RemoveSpecialChars => remove_special_chars(text),
            TransformOp::ReverseText => reverse_text(text),
        }
    }
}

/// Applies `ops` left to right.
pub fn apply_all(text: &str, ops: &[TransformOp]) -> String {
    ops.iter()
        .fold(text.to_string(), |current, op| op.apply(&current))
}
