//! # boganto-render
//!
//! Template rendering library for Boganto.
//!
//! This crate turns an [`ArticleView`](boganto_core::ArticleView) into HTML
//! pages using Askama.

pub mod templates;
pub mod toc;

pub use templates::{ArticleTemplate, BookEntry, ErrorTemplate, RenderError};
pub use toc::render_toc;
