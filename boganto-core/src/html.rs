//! Lightweight text helpers over rendered HTML.
//!
//! These are tag-level scans, not a parser: they are meant for the
//! well-formed markup the CMS produces.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// Remove every tag, joining the surrounding text directly
pub fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

/// Remove every tag, leaving a space where each tag was
///
/// Used for word counting, where `<p>a</p><p>b</p>` is two words.
pub fn strip_tags_spaced(html: &str) -> String {
    TAG_RE.replace_all(html, " ").into_owned()
}

/// Decode the handful of entities a CMS emits in heading text
pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

/// Escape text for use in element content or a quoted attribute
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Plain text of a fragment: tags stripped, entities decoded, whitespace collapsed
pub fn plain_text(html: &str) -> String {
    decode_entities(&strip_tags(html))
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
