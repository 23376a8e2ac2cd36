//! Table-of-contents extraction and heading anchor injection.
//!
//! Both operations are driven by one scan over the document, so every id in
//! the table of contents is exactly the id injected into the body.

use crate::html;
use crate::slug::slugify;
use boganto_types::{HeadingEntry, HeadingLevel};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::ops::Range;

/// `h2`/`h3` element with any attributes; the first `</h2>` or `</h3>` closes it
static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<h([23])(\s[^>]*)?>(.*?)</h[23]\s*>").expect("valid heading regex")
});

/// One `name`, `name=value`, `name="value"` or `name='value'` attribute
static ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([^\s=/>"']+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .expect("valid attribute regex")
});

/// Spans whose contents are not markup: scripts, styles and comments
static RAW_TEXT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<!--.*?-->")
        .expect("valid raw text regex")
});

/// Class added to annotated headings so in-page scrolling clears the sticky header
pub const DEFAULT_SCROLL_CLASS: &str = "scroll-mt-24";

/// How heading ids are generated and injected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingOptions {
    /// Class merged into every annotated heading; empty to skip
    #[serde(default = "default_scroll_class")]
    pub scroll_class: String,

    /// Suffix repeated slugs with `-1`, `-2`, ...
    #[serde(default)]
    pub unique_ids: bool,
}

fn default_scroll_class() -> String {
    DEFAULT_SCROLL_CLASS.to_string()
}

impl Default for HeadingOptions {
    fn default() -> Self {
        Self {
            scroll_class: default_scroll_class(),
            unique_ids: false,
        }
    }
}

/// A heading located in the source document
#[derive(Debug)]
struct ScannedHeading<'a> {
    /// Byte range of the opening tag
    open_tag: Range<usize>,
    level: HeadingLevel,
    attrs: &'a str,
    text: String,
    id: String,
    /// The opening tag already carried an id
    has_id: bool,
}

/// Extract the `h2`/`h3` table of contents of `html` with default options
pub fn extract_headings(html: &str) -> Vec<HeadingEntry> {
    extract_headings_with(html, &HeadingOptions::default())
}

/// Extract the table of contents, in document order
///
/// Headings that already have an `id` attribute report that id. Unclosed
/// headings produce no entry.
pub fn extract_headings_with(html: &str, options: &HeadingOptions) -> Vec<HeadingEntry> {
    scan(html, options)
        .into_iter()
        .map(|h| HeadingEntry {
            level: h.level,
            text: h.text,
            id: h.id,
        })
        .collect()
}

/// Inject anchor ids into every `h2`/`h3` of `html` with default options
pub fn annotate(html: &str) -> String {
    annotate_with(html, &HeadingOptions::default())
}

/// Inject anchor ids and the scroll class into headings
///
/// Only opening tags of headings without an id are rewritten; all other
/// bytes are copied through, so annotating twice is a no-op.
pub fn annotate_with(html: &str, options: &HeadingOptions) -> String {
    let headings = scan(html, options);
    if headings.iter().all(|h| h.has_id) {
        return html.to_string();
    }

    let mut out = String::with_capacity(html.len() + headings.len() * 48);
    let mut last = 0;

    for heading in headings.iter().filter(|h| !h.has_id) {
        out.push_str(&html[last..heading.open_tag.start]);
        // Keep the author's tag-name casing ("<h2" or "<H2")
        out.push_str(&html[heading.open_tag.start..heading.open_tag.start + 3]);
        out.push_str(" id=\"");
        out.push_str(&html::escape(&heading.id));
        out.push('"');
        out.push_str(&with_scroll_class(heading.attrs, &options.scroll_class));
        out.push('>');
        last = heading.open_tag.end;
    }
    out.push_str(&html[last..]);

    tracing::debug!(
        headings = headings.len(),
        "annotated headings with anchor ids"
    );
    out
}

fn scan<'a>(html: &'a str, options: &HeadingOptions) -> Vec<ScannedHeading<'a>> {
    let mut headings = Vec::new();

    for segment in markup_segments(html) {
        let offset = segment.start;
        for caps in HEADING_RE.captures_iter(&html[segment]) {
            let (Some(whole), Some(level), Some(inner)) = (caps.get(0), caps.get(1), caps.get(3))
            else {
                continue;
            };
            let level = if level.as_str() == "2" {
                HeadingLevel::H2
            } else {
                HeadingLevel::H3
            };
            let attrs = caps.get(2).map_or("", |m| m.as_str());
            let text = html::plain_text(inner.as_str());
            let (id, has_id) = match existing_id(attrs) {
                Some(existing) => (existing, true),
                None => (slugify(&text), false),
            };

            headings.push(ScannedHeading {
                open_tag: offset + whole.start()..offset + inner.start(),
                level,
                attrs,
                text,
                id,
                has_id,
            });
        }
    }

    if options.unique_ids {
        // Author-assigned ids win over generated ones wherever they appear
        let mut ids = IdRegistry::default();
        for heading in headings.iter().filter(|h| h.has_id) {
            ids.reserve(&heading.id);
        }
        for heading in headings.iter_mut().filter(|h| !h.has_id) {
            heading.id = ids.claim(std::mem::take(&mut heading.id));
        }
    }

    headings
}

/// Byte ranges of `html` outside scripts, styles and comments
fn markup_segments(html: &str) -> Vec<Range<usize>> {
    let mut segments = Vec::new();
    let mut start = 0;
    for raw in RAW_TEXT_RE.find_iter(html) {
        segments.push(start..raw.start());
        start = raw.end();
    }
    segments.push(start..html.len());
    segments
}

/// An attribute of an opening tag, located within the attribute string
struct Attr<'a> {
    name: &'a str,
    value: Option<&'a str>,
    quote: char,
    span: Range<usize>,
}

fn attributes(attrs: &str) -> impl Iterator<Item = Attr<'_>> {
    ATTR_RE.captures_iter(attrs).filter_map(|caps| {
        let whole = caps.get(0)?;
        let (value, quote) = if let Some(v) = caps.get(2) {
            (Some(v.as_str()), '"')
        } else if let Some(v) = caps.get(3) {
            (Some(v.as_str()), '\'')
        } else {
            (caps.get(4).map(|v| v.as_str()), '"')
        };
        Some(Attr {
            name: caps.get(1)?.as_str(),
            value,
            quote,
            span: whole.range(),
        })
    })
}

fn find_attr<'a>(attrs: &'a str, name: &str) -> Option<Attr<'a>> {
    attributes(attrs).find(|a| a.name.eq_ignore_ascii_case(name))
}

fn existing_id(attrs: &str) -> Option<String> {
    let attr = find_attr(attrs, "id")?;
    Some(html::decode_entities(attr.value.unwrap_or_default()))
}

/// Attributes of an opening tag with `class` added to (or merged into) them
fn with_scroll_class(attrs: &str, class: &str) -> String {
    if class.is_empty() {
        return attrs.to_string();
    }
    let Some(attr) = find_attr(attrs, "class") else {
        return format!(" class=\"{class}\"{attrs}");
    };

    let value = attr.value.unwrap_or_default();
    if value.split_whitespace().any(|c| c == class) {
        return attrs.to_string();
    }

    let quote = attr.quote;
    let merged = if value.trim().is_empty() {
        format!("{}={quote}{class}{quote}", attr.name)
    } else {
        format!("{}={quote}{class} {value}{quote}", attr.name)
    };
    format!(
        "{}{}{}",
        &attrs[..attr.span.start],
        merged,
        &attrs[attr.span.end..]
    )
}

/// Per-document record of ids handed out, for `unique_ids`
#[derive(Debug, Default)]
struct IdRegistry {
    taken: HashSet<String>,
    next_suffix: HashMap<String, usize>,
}

impl IdRegistry {
    fn reserve(&mut self, id: &str) {
        self.taken.insert(id.to_string());
    }

    fn claim(&mut self, slug: String) -> String {
        if slug.is_empty() {
            return slug;
        }
        if self.taken.insert(slug.clone()) {
            return slug;
        }

        let mut suffix = self.next_suffix.get(&slug).copied().unwrap_or(1);
        let id = loop {
            let candidate = format!("{slug}-{suffix}");
            suffix += 1;
            if self.taken.insert(candidate.clone()) {
                break candidate;
            }
        };
        self.next_suffix.insert(slug, suffix);
        id
    }
}
