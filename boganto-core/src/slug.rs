//! Slug generation for heading anchors.

use crate::html;
use unicode_segmentation::UnicodeSegmentation;

/// Convert heading text to a URL-safe anchor id
///
/// Rules:
/// - Strip markup and decode basic entities
/// - Lowercase
/// - Replace each run of whitespace or non-alphanumeric characters with one hyphen
/// - No leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use boganto_core::slugify;
///
/// assert_eq!(slugify("Chapter 1: The Beginning!"), "chapter-1-the-beginning");
/// assert_eq!(slugify("Rust &amp; <em>Safety</em>"), "rust-safety");
/// assert_eq!(slugify("!!!"), "");
/// ```
pub fn slugify(input: &str) -> String {
    slug_from_plain(&html::plain_text(input))
}

/// Slug of text that is already markup-free
fn slug_from_plain(text: &str) -> String {
    let lowercased = text.to_lowercase();
    let mut slug = String::with_capacity(lowercased.len());
    let mut pending_separator = false;

    // Graphemes keep combining marks attached to their base letter
    for grapheme in lowercased.graphemes(true) {
        let keep = grapheme.chars().next().is_some_and(char::is_alphanumeric);
        if keep {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push_str(grapheme);
        } else {
            pending_separator = true;
        }
    }

    slug
}
