//! CLI command implementations.

pub mod article;
pub mod content;

pub use article::{render_article, ArticleOptions};
pub use content::{print_annotated, print_read_time, print_toc};

use anyhow::{Context, Result};
use boganto_core::Config;
use std::path::Path;

const DEFAULT_CONFIG: &str = "boganto.yml";

/// Load the config file; without `--config`, fall back to defaults when
/// ./boganto.yml does not exist
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG).exists() => Path::new(DEFAULT_CONFIG),
        None => {
            tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG);
            return Ok(Config::default());
        }
    };

    tracing::debug!("Loading config from {:?}", path);
    Config::from_file(path).with_context(|| format!("Failed to load configuration {:?}", path))
}
