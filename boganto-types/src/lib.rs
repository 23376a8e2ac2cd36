//! Shared types for boganto
//!
//! This crate holds the blog post model returned by the Boganto API and the
//! table-of-contents entries derived from a post body.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Heading level that takes part in the table of contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HeadingLevel {
    H2,
    H3,
}

impl HeadingLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            2 => Ok(HeadingLevel::H2),
            3 => Ok(HeadingLevel::H3),
            other => Err(format!("unsupported heading level: {other}")),
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.as_u8()
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.as_u8())
    }
}

/// One table-of-contents entry, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingEntry {
    pub level: HeadingLevel,

    /// Heading text with markup stripped
    pub text: String,

    /// Anchor id injected into the rendered body
    pub id: String,
}

/// Blog post as returned by the Boganto API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<u64>,

    pub title: String,

    /// URL identifier (`/blog/{slug}`), not a heading anchor
    #[serde(default)]
    pub slug: String,

    /// Rendered HTML body
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,

    #[serde(default)]
    pub excerpt: Option<String>,

    #[serde(default)]
    pub tags: Tags,

    #[serde(default)]
    pub featured_image: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub related_books: Vec<RelatedBook>,
}

impl BlogPost {
    /// Excerpt if present and non-blank, otherwise the title
    pub fn description(&self) -> &str {
        self.excerpt
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(&self.title)
    }
}

/// `{ "blog": { ... } }` envelope used by the single-post endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogResponse {
    pub blog: BlogPost,
}

/// Book recommended alongside a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedBook {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<u64>,

    pub title: String,

    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<String>,

    #[serde(default)]
    pub purchase_link: Option<String>,

    #[serde(default)]
    pub image: Option<String>,
}

/// Post tags, trimmed with blanks removed
///
/// The API sends either a JSON array or a comma separated string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tags(pub Vec<String>);

impl Tags {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            tags.into_iter()
                .map(|t| t.as_ref().trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        )
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagsRepr {
    List(Vec<String>),
    Joined(String),
}

impl<'de> Deserialize<'de> for Tags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<TagsRepr>::deserialize(deserializer)? {
            Some(TagsRepr::List(list)) => Tags::new(list),
            Some(TagsRepr::Joined(joined)) => Tags::new(joined.split(',')),
            None => Tags::default(),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(u64),
    Float(f64),
    Text(String),
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Int(n)) => Some(n),
        Some(Scalar::Float(f)) if f >= 0.0 && f.fract() == 0.0 => Some(f as u64),
        Some(Scalar::Text(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Int(n)) => Some(n.to_string()),
        Some(Scalar::Float(f)) => Some(f.to_string()),
        Some(Scalar::Text(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
