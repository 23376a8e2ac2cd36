//! Everything the blog detail page derives from a fetched post.

use crate::config::Config;
use crate::headings::{annotate_with, extract_headings_with};
use crate::read_time::reading_stats;
use boganto_types::{BlogPost, HeadingEntry, RelatedBook};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

/// Tags shown in the article footer
pub const MAX_DISPLAY_TAGS: usize = 3;

/// Characters `encodeURIComponent` leaves alone
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Augmented post, ready for a template or JSON output
#[derive(Debug, Clone, Serialize)]
pub struct ArticleView {
    pub title: String,
    pub slug: String,

    /// Body with anchor ids injected into its headings
    pub content_html: String,

    /// Table of contents, in document order
    pub toc: Vec<HeadingEntry>,

    pub words: usize,
    pub read_minutes: u32,

    /// Human readable publish date
    pub published: Option<String>,

    pub featured_image: Option<String>,
    pub tags: Vec<TagLink>,
    pub meta: PageMeta,
    pub share: ShareLinks,
    pub related_books: Vec<RelatedBook>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagLink {
    pub name: String,
    pub url: String,
}

/// Values for the document head
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page_title: String,
    pub description: String,
    pub og_image: String,
    pub canonical_url: String,
    pub published_time: Option<String>,
    pub author: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    pub twitter: String,
    pub facebook: String,
    pub linkedin: String,
    pub whatsapp: String,
}

impl ArticleView {
    pub fn build(post: &BlogPost, config: &Config) -> Self {
        let toc = extract_headings_with(&post.content, &config.headings);
        let content_html = annotate_with(&post.content, &config.headings);
        let stats = reading_stats(&post.content, config.reading.words_per_minute);
        let canonical_url = config.post_url(&post.slug);

        tracing::debug!(
            slug = %post.slug,
            headings = toc.len(),
            words = stats.words,
            "built article view"
        );

        let meta = PageMeta {
            page_title: format!("{} - {}", post.title, config.site.name),
            description: post.description().to_string(),
            og_image: post
                .featured_image
                .clone()
                .filter(|img| !img.trim().is_empty())
                .unwrap_or_else(|| config.site.default_image.clone()),
            canonical_url: canonical_url.clone(),
            published_time: post.created_at.clone(),
            author: config.site.author.clone(),
            tags: post.tags.iter().cloned().collect(),
        };

        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            content_html,
            toc,
            words: stats.words,
            read_minutes: stats.minutes,
            published: post.created_at.as_deref().map(format_date),
            featured_image: post
                .featured_image
                .clone()
                .filter(|img| !img.trim().is_empty()),
            tags: post.tags.iter().map(|t| TagLink::new(t)).collect(),
            share: ShareLinks::new(&post.title, &canonical_url),
            meta,
            related_books: post.related_books.clone(),
        }
    }

    /// Tags shown on the page; the full list stays in the meta tags
    pub fn display_tags(&self) -> &[TagLink] {
        &self.tags[..self.tags.len().min(MAX_DISPLAY_TAGS)]
    }

    /// "N min read" label
    pub fn read_time_label(&self) -> String {
        format!("{} min read", self.read_minutes)
    }
}

impl TagLink {
    pub fn new(tag: &str) -> Self {
        let name = tag.trim().to_string();
        Self {
            url: tag_url(&name),
            name,
        }
    }
}

impl ShareLinks {
    pub fn new(title: &str, url: &str) -> Self {
        let title_enc = encode_component(title);
        let url_enc = encode_component(url);
        let both_enc = encode_component(&format!("{title} {url}"));

        Self {
            twitter: format!("https://twitter.com/intent/tweet?text={title_enc}&url={url_enc}"),
            facebook: format!("https://www.facebook.com/sharer/sharer.php?u={url_enc}"),
            linkedin: format!("https://www.linkedin.com/sharing/share-offsite/?url={url_enc}"),
            whatsapp: format!("https://wa.me/?text={both_enc}"),
        }
    }
}

/// Listing page for a tag
pub fn tag_url(tag: &str) -> String {
    format!("/tag/{}", encode_component(tag.trim()))
}

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Format an API timestamp as "January 15, 2024"
///
/// Values in an unknown format are returned unchanged.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
                .map(|dt| dt.date())
                .ok()
        })
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok());

    match date {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => {
            tracing::warn!("Unrecognized date format: {}", raw);
            raw.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boganto_types::Tags;

    fn sample_post() -> BlogPost {
        BlogPost {
            id: Some(1),
            title: "Reading in Winter".into(),
            slug: "reading-in-winter".into(),
            content: "<p>Intro words here.</p><h2>Cozy Picks</h2><p>More</p><h3>Short &amp; Sweet</h3>"
                .into(),
            excerpt: None,
            tags: Tags::new(["fiction", " cozy reads ", "winter", "classics"]),
            featured_image: Some(String::new()),
            created_at: Some("2024-01-15 10:30:00".into()),
            related_books: vec![],
        }
    }

    #[test]
    fn test_build_view() {
        let view = ArticleView::build(&sample_post(), &Config::default());

        assert_eq!(view.toc.len(), 2);
        assert_eq!(view.toc[1].id, "short-sweet");
        assert!(view
            .content_html
            .contains("<h3 id=\"short-sweet\" class=\"scroll-mt-24\">"));
        assert_eq!(view.read_minutes, 1);
        assert_eq!(view.read_time_label(), "1 min read");
        assert_eq!(view.published.as_deref(), Some("January 15, 2024"));
        assert_eq!(view.featured_image, None);
    }

    #[test]
    fn test_meta_defaults() {
        let config = Config::default();
        let view = ArticleView::build(&sample_post(), &config);

        assert_eq!(view.meta.page_title, "Reading in Winter - Boganto");
        assert_eq!(view.meta.description, "Reading in Winter");
        assert_eq!(view.meta.og_image, config.site.default_image);
        assert_eq!(
            view.meta.canonical_url,
            "https://boganto.com/blog/reading-in-winter"
        );
        assert_eq!(view.meta.tags.len(), 4);
    }

    #[test]
    fn test_display_tags_are_capped() {
        let view = ArticleView::build(&sample_post(), &Config::default());
        let shown = view.display_tags();
        assert_eq!(shown.len(), MAX_DISPLAY_TAGS);
        assert_eq!(shown[1].name, "cozy reads");
        assert_eq!(shown[1].url, "/tag/cozy%20reads");
    }

    #[test]
    fn test_tag_url_encoding() {
        assert_eq!(tag_url(" Sci-Fi & Fantasy "), "/tag/Sci-Fi%20%26%20Fantasy");
        assert_eq!(tag_url("self-help"), "/tag/self-help");
    }

    #[test]
    fn test_share_links() {
        let links = ShareLinks::new("Hello World", "https://boganto.com/blog/hello");
        assert_eq!(
            links.twitter,
            "https://twitter.com/intent/tweet?text=Hello%20World&url=https%3A%2F%2Fboganto.com%2Fblog%2Fhello"
        );
        assert_eq!(
            links.whatsapp,
            "https://wa.me/?text=Hello%20World%20https%3A%2F%2Fboganto.com%2Fblog%2Fhello"
        );
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-05"), "March 5, 2024");
        assert_eq!(format_date("2024-03-05T08:00:00Z"), "March 5, 2024");
        assert_eq!(format_date("2024-03-05T08:00:00"), "March 5, 2024");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_empty_content() {
        let post = BlogPost {
            title: "Empty".into(),
            slug: "empty".into(),
            ..Default::default()
        };
        let view = ArticleView::build(&post, &Config::default());
        assert!(view.toc.is_empty());
        assert_eq!(view.content_html, "");
        assert_eq!(view.read_minutes, 0);
        assert_eq!(view.published, None);
    }
}
