//! # boganto-core
//!
//! Core library for the Boganto blog front-end.
//!
//! This crate turns the HTML body of a blog post into the pieces the detail
//! page needs: a table of contents, a body whose headings carry matching
//! anchor ids, and a reading-time estimate. It also holds the site
//! configuration and the sources that fetch posts from the Boganto API.

pub mod article;
pub mod config;
pub mod headings;
pub mod html;
pub mod read_time;
pub mod slug;
pub mod source;

pub use article::ArticleView;
pub use config::Config;
pub use headings::{
    annotate, annotate_with, extract_headings, extract_headings_with, HeadingOptions,
};
pub use read_time::{
    estimate_read_minutes, reading_stats, ReadingStats, DEFAULT_WORDS_PER_MINUTE,
};
pub use slug::slugify;
pub use source::{BlogSource, FileSource, HttpSource, SourceError};

pub use boganto_types::{
    BlogPost, BlogResponse, HeadingEntry, HeadingLevel, RelatedBook, Tags,
};
