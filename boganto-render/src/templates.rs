//! Askama template definitions.

use crate::toc::render_toc;
use askama::Template;
use boganto_core::article::{ShareLinks, TagLink};
use boganto_core::{ArticleView, Config, RelatedBook};
use chrono::Datelike;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to render template: {0}")]
    Template(#[from] askama::Error),
}

/// A related book card
#[derive(Debug, Clone)]
pub struct BookEntry {
    pub title: String,
    pub price: String,
    pub has_price: bool,
    pub link: String,
    pub has_link: bool,
}

impl From<&RelatedBook> for BookEntry {
    fn from(book: &RelatedBook) -> Self {
        let price = book.price.clone().unwrap_or_default();
        let link = book.purchase_link.clone().unwrap_or_default();
        Self {
            title: book.title.clone(),
            has_price: !price.is_empty(),
            price,
            has_link: !link.is_empty(),
            link,
        }
    }
}

/// Blog detail page template
#[derive(Template)]
#[template(path = "article.html")]
pub struct ArticleTemplate {
    // Head
    pub page_title: String,
    pub description: String,
    pub og_image: String,
    pub canonical_url: String,
    pub published_time: String,
    pub has_published_time: bool,
    pub author: String,
    pub meta_tags: Vec<String>,

    // Article header
    pub title: String,
    pub byline: String,
    pub published: String,
    pub has_published: bool,
    pub read_time: String,
    pub featured_image: String,
    pub has_featured_image: bool,

    // Content
    pub toc_html: String,
    pub has_toc: bool,
    pub content: String,

    // Footer of the article
    pub tags: Vec<TagLink>,
    pub share: ShareLinks,
    pub related_books: Vec<BookEntry>,

    // Site metadata
    pub site_name: String,
    pub year: i32,
}

/// Characters that would end a CSS `url('...')` token or the style attribute
const CSS_URL: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'\\')
    .add(b'<')
    .add(b'>');

fn css_url(url: &str) -> String {
    utf8_percent_encode(url, CSS_URL).to_string()
}

impl ArticleTemplate {
    pub fn new(view: &ArticleView, config: &Config) -> Self {
        let toc_html = render_toc(&view.toc);
        let published_time = view.meta.published_time.clone().unwrap_or_default();
        let published = view.published.clone().unwrap_or_default();
        let featured_image = view.featured_image.as_deref().map(css_url).unwrap_or_default();

        Self {
            page_title: view.meta.page_title.clone(),
            description: view.meta.description.clone(),
            og_image: view.meta.og_image.clone(),
            canonical_url: view.meta.canonical_url.clone(),
            has_published_time: !published_time.is_empty(),
            published_time,
            author: view.meta.author.clone(),
            meta_tags: view.meta.tags.clone(),
            title: view.title.clone(),
            byline: config.site.byline.clone(),
            has_published: !published.is_empty(),
            published,
            read_time: view.read_time_label(),
            has_featured_image: !featured_image.is_empty(),
            featured_image,
            has_toc: toc_html.is_some(),
            toc_html: toc_html.unwrap_or_default(),
            content: view.content_html.clone(),
            tags: view.display_tags().to_vec(),
            share: view.share.clone(),
            related_books: view.related_books.iter().map(BookEntry::from).collect(),
            site_name: config.site.name.clone(),
            year: chrono::Local::now().year(),
        }
    }

    pub fn render_page(&self) -> Result<String, RenderError> {
        Ok(self.render()?)
    }
}

/// Page shown when a post cannot be loaded
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub site_name: String,
    pub message: String,
    pub year: i32,
}

impl ErrorTemplate {
    pub fn new(message: &str, config: &Config) -> Self {
        Self {
            site_name: config.site.name.clone(),
            message: message.to_string(),
            year: chrono::Local::now().year(),
        }
    }

    pub fn render_page(&self) -> Result<String, RenderError> {
        Ok(self.render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boganto_core::{BlogPost, RelatedBook, Tags};

    fn view() -> (ArticleView, Config) {
        let config = Config::default();
        let post = BlogPost {
            id: Some(3),
            title: "Books & Tea".into(),
            slug: "books-and-tea".into(),
            content: "<p>Hello there.</p><h2>First Steps</h2><p>Go.</p>".into(),
            excerpt: Some("A <short> guide".into()),
            tags: Tags::new(["tea", "books", "slow living", "autumn"]),
            featured_image: Some("https://img.example.com/tea.jpg".into()),
            created_at: Some("2024-01-15".into()),
            related_books: vec![RelatedBook {
                id: Some(1),
                title: "The Book of Tea".into(),
                price: Some("$12.00".into()),
                purchase_link: None,
                image: None,
            }],
        };
        (ArticleView::build(&post, &config), config)
    }

    #[test]
    fn test_article_page() {
        let (view, config) = view();
        let html = ArticleTemplate::new(&view, &config).render_page().unwrap();

        assert!(html.contains("<title>Books &amp; Tea - Boganto</title>"));
        assert!(html.contains("content=\"A &lt;short&gt; guide\""));
        assert!(html.contains("<h2 id=\"first-steps\" class=\"scroll-mt-24\">First Steps</h2>"));
        assert!(html.contains("href=\"#first-steps\""));
        assert!(html.contains("1 min read"));
        assert!(html.contains("January 15, 2024"));
        assert!(html.contains("href=\"/tag/slow%20living\""));
        assert!(!html.contains("href=\"/tag/autumn\""));
        assert!(html.contains("property=\"article:tag\" content=\"autumn\""));
        assert!(html.contains("The Book of Tea"));
        assert!(html.contains("$12.00"));
        assert!(html.contains("rel=\"canonical\" href=\"https://boganto.com/blog/books-and-tea\""));
    }

    #[test]
    fn test_article_without_headings_has_no_toc() {
        let (mut view, config) = view();
        view.toc.clear();
        let html = ArticleTemplate::new(&view, &config).render_page().unwrap();
        assert!(!html.contains("toc-nav"));
    }

    #[test]
    fn test_featured_image_cannot_escape_css_url() {
        let (mut view, config) = view();
        view.featured_image = Some("https://img.example.com/it's (1).jpg');color:red;('".into());
        let html = ArticleTemplate::new(&view, &config).render_page().unwrap();

        assert!(html.contains("url('https://img.example.com/it%27s%20%281%29.jpg%27%29;color:red;%28%27')"));
        assert!(!html.contains("it's"));
        assert!(!html.contains("it&#39;s"));
    }

    #[test]
    fn test_error_page() {
        let html = ErrorTemplate::new("Blog post not found", &Config::default())
            .render_page()
            .unwrap();
        assert!(html.contains("Blog post not found"));
        assert!(html.contains("<title>Error - Boganto</title>"));
    }
}
