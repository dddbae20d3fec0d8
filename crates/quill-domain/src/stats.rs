//! Document statistics shown beside the editor

use serde::{Deserialize, Serialize};

/// Default reading speed used for reading-time estimates.
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Counts derived from a document's markdown source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Whitespace-separated tokens
    pub words: usize,
    /// Unicode scalar values
    pub characters: usize,
    /// Newline-separated lines (an empty document has one line)
    pub lines: usize,
    /// Estimated reading time, rounded up to whole minutes
    pub reading_minutes: usize,
}

impl DocumentStats {
    /// Compute statistics for `content` at `words_per_minute`.
    ///
    /// A `words_per_minute` of zero is treated as the default speed.
    pub fn compute(content: &str, words_per_minute: u32) -> Self {
        let wpm = if words_per_minute == 0 {
            DEFAULT_WORDS_PER_MINUTE
        } else {
            words_per_minute
        } as usize;

        let words = content.split_whitespace().count();
        Self {
            words,
            characters: content.chars().count(),
            lines: content.split('\n').count(),
            reading_minutes: words.div_ceil(wpm),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let stats = DocumentStats::compute("", DEFAULT_WORDS_PER_MINUTE);
        assert_eq!(stats.words, 0);
        assert_eq!(stats.characters, 0);
        assert_eq!(stats.lines, 1);
        assert_eq!(stats.reading_minutes, 0);
    }

    #[test]
    fn test_counts() {
        let stats = DocumentStats::compute("# Title\n\nSome  words here\n", 200);
        assert_eq!(stats.words, 5);
        assert_eq!(stats.lines, 4);
        assert_eq!(stats.reading_minutes, 1);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let text = "word ".repeat(201);
        assert_eq!(DocumentStats::compute(&text, 200).reading_minutes, 2);
        assert_eq!(DocumentStats::compute(&text, 0).reading_minutes, 2);
    }

    #[test]
    fn test_characters_are_not_bytes() {
        assert_eq!(DocumentStats::compute("héllo", 200).characters, 5);
    }
}
