//! Text statistics shown next to the text box.

use serde::Serialize;

const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStats {
    pub words: usize,
    pub characters: usize,
    /// Always at least 1, even for empty text.
    pub lines: usize,
    /// Minutes at 200 words per minute, rounded up.
    pub reading_time: usize,
}

pub fn compute_stats(text: &str) -> TextStats {
    let words = text.split_whitespace().count();

    TextStats {
        words,
        characters: text.chars().count(),
        lines: text.split('\n').count(),
        reading_time: words.div_ceil(WORDS_PER_MINUTE),
    }
}
