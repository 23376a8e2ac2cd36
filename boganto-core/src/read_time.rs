//! Reading time estimation for post bodies.

use crate::html;
use serde::{Deserialize, Serialize};

/// Reading speed used by the "N min read" label
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Word count and reading estimate of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingStats {
    pub words: usize,
    pub minutes: u32,
}

/// Estimated minutes to read `html`, rounded up
///
/// An empty document takes 0 minutes; any text takes at least 1.
/// A `words_per_minute` of 0 is treated as 1.
///
/// ```
/// use boganto_core::estimate_read_minutes;
///
/// assert_eq!(estimate_read_minutes("", 200), 0);
/// assert_eq!(estimate_read_minutes("<p>just a few words</p>", 200), 1);
/// ```
pub fn estimate_read_minutes(html: &str, words_per_minute: u32) -> u32 {
    reading_stats(html, words_per_minute).minutes
}

/// Count words outside of markup and derive the reading estimate
pub fn reading_stats(html: &str, words_per_minute: u32) -> ReadingStats {
    let words = html::strip_tags_spaced(html).split_whitespace().count();
    let per_minute = words_per_minute.max(1) as usize;
    let minutes = u32::try_from(words.div_ceil(per_minute)).unwrap_or(u32::MAX);

    ReadingStats { words, minutes }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(words: usize) -> String {
        format!("<p>{}</p>", "word ".repeat(words))
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(estimate_read_minutes("", DEFAULT_WORDS_PER_MINUTE), 0);
        assert_eq!(estimate_read_minutes("<p></p><br/>", DEFAULT_WORDS_PER_MINUTE), 0);
        assert_eq!(reading_stats("   \n", 200).words, 0);
    }

    #[test]
    fn test_rounds_up() {
        assert_eq!(estimate_read_minutes(&paragraph(1), 200), 1);
        assert_eq!(estimate_read_minutes(&paragraph(200), 200), 1);
        assert_eq!(estimate_read_minutes(&paragraph(201), 200), 2);
        assert_eq!(estimate_read_minutes(&paragraph(401), 200), 3);
    }

    #[test]
    fn test_tags_separate_words() {
        let stats = reading_stats("<h2>Title</h2><p>one<br>two</p>", 200);
        assert_eq!(stats.words, 3);
    }

    #[test]
    fn test_attributes_are_not_words() {
        let stats = reading_stats(r#"<img src="cover.jpg" alt="a long alt text">"#, 200);
        assert_eq!(stats.words, 0);
    }

    #[test]
    fn test_custom_and_zero_speed() {
        assert_eq!(estimate_read_minutes(&paragraph(300), 100), 3);
        assert_eq!(estimate_read_minutes(&paragraph(3), 0), 3);
    }
}
