//! Sources that fetch blog posts by their URL slug.

use async_trait::async_trait;
use boganto_types::{BlogPost, BlogResponse};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Blog post '{0}' not found")]
    NotFound(String),

    #[error("Invalid post slug: {0:?}")]
    InvalidSlug(String),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Request to the blog API failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Blog API responded with status {0}")]
    Status(u16),

    #[error("Failed to decode blog post: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SourceError {
    /// Message shown to readers on the detail page
    pub fn user_message(&self) -> &'static str {
        match self {
            SourceError::NotFound(_) => "Blog post not found",
            _ => "Failed to load blog post. Please try again.",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound(_))
    }
}

/// Something that can look up a post by slug
#[async_trait]
pub trait BlogSource: Send + Sync {
    async fn blog_by_slug(&self, slug: &str) -> Result<BlogPost, SourceError>;
}

/// Either the `{ "blog": ... }` envelope or a bare post
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Envelope(BlogResponse),
    Bare(BlogPost),
}

/// Decode an API payload, filling in the slug when the API omits it
pub fn decode_post(body: &str, slug: &str) -> Result<BlogPost, SourceError> {
    let mut post = match serde_json::from_str::<Payload>(body) {
        Ok(Payload::Envelope(response)) => response.blog,
        Ok(Payload::Bare(post)) => post,
        // Decode again as the envelope for a useful error message
        Err(_) => serde_json::from_str::<BlogResponse>(body)?.blog,
    };
    if post.slug.is_empty() {
        post.slug = slug.to_string();
    }
    Ok(post)
}

fn validate_slug(slug: &str) -> Result<(), SourceError> {
    let valid = !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\'])
        && !slug.chars().any(char::is_control);
    if valid {
        Ok(())
    } else {
        Err(SourceError::InvalidSlug(slug.to_string()))
    }
}

/// Posts stored as `{slug}.json` files in a directory
#[derive(Debug, Clone)]
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl BlogSource for FileSource {
    async fn blog_by_slug(&self, slug: &str) -> Result<BlogPost, SourceError> {
        validate_slug(slug)?;
        let path = self.dir.join(format!("{slug}.json"));
        tracing::debug!("Reading post from {:?}", path);

        let body = match tokio::fs::read_to_string(&path).await {
            Ok(body) => body,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::NotFound(slug.to_string()));
            }
            Err(source) => return Err(SourceError::Io { path, source }),
        };

        decode_post(&body, slug)
    }
}

/// The Boganto PHP API
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/getBlogs.php", self.base_url)
    }
}

#[async_trait]
impl BlogSource for HttpSource {
    async fn blog_by_slug(&self, slug: &str) -> Result<BlogPost, SourceError> {
        validate_slug(slug)?;
        let url = self.endpoint();
        tracing::debug!("GET {} slug={}", url, slug);

        let response = self
            .client
            .get(&url)
            .query(&[("slug", slug)])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(slug.to_string()));
        }
        if !status.is_success() {
            tracing::warn!("Blog API returned {} for {}", status, slug);
            return Err(SourceError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        decode_post(&body, slug)
    }
}
