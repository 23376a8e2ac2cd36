//! Fetch a post and render its detail page.

use crate::ArticleFormat;
use anyhow::{Context, Result};
use boganto_core::{ArticleView, BlogSource, Config, FileSource, HttpSource};
use boganto_render::{ArticleTemplate, ErrorTemplate};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ArticleOptions {
    pub from: Option<PathBuf>,
    pub api: Option<String>,
    pub format: ArticleFormat,
    pub output: Option<PathBuf>,
}

/// `--from` takes precedence over the API
fn build_source(config: &Config, opts: &ArticleOptions) -> Result<Box<dyn BlogSource>> {
    if let Some(dir) = &opts.from {
        tracing::info!("Reading posts from {:?}", dir);
        return Ok(Box::new(FileSource::new(dir.clone())));
    }

    let base_url = opts.api.as_deref().unwrap_or(&config.api.base_url);
    tracing::info!("Fetching posts from {}", base_url);
    let source = HttpSource::new(base_url, Duration::from_secs(config.api.timeout_secs))
        .context("Failed to create HTTP client")?;
    Ok(Box::new(source))
}

pub async fn render_article(config: &Config, slug: &str, opts: ArticleOptions) -> Result<()> {
    let source = build_source(config, &opts)?;

    let post = match source.blog_by_slug(slug).await {
        Ok(post) => post,
        Err(err) => {
            tracing::error!("Error fetching blog {}: {}", slug, err);
            let message = err.user_message();
            if let (ArticleFormat::Html, Some(path)) = (opts.format, &opts.output) {
                let page = ErrorTemplate::new(message, config)
                    .render_page()
                    .context("Failed to render error page")?;
                write_output(path, page)?;
            }
            return Err(anyhow::Error::new(err).context(message));
        }
    };

    let view = ArticleView::build(&post, config);
    tracing::info!(
        "Built '{}': {} headings, {}",
        view.title,
        view.toc.len(),
        view.read_time_label()
    );

    let rendered = match opts.format {
        ArticleFormat::Html => ArticleTemplate::new(&view, config)
            .render_page()
            .context("Failed to render article page")?,
        ArticleFormat::Json => serde_json::to_string_pretty(&view)?,
    };

    match &opts.output {
        Some(path) => write_output(path, rendered)?,
        None => println!("{}", rendered),
    }

    Ok(())
}

fn write_output(path: &Path, contents: String) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {:?}", parent))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::info!("✓ Output written to {:?}", path);
    Ok(())
}
