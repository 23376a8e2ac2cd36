//! Configuration parsing and management.

use crate::headings::HeadingOptions;
use crate::read_time::DEFAULT_WORDS_PER_MINUTE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

/// Main configuration struct matching the boganto.yml schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub reading: ReadingConfig,

    #[serde(default)]
    pub headings: HeadingOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Public origin used for canonical and share URLs
    #[serde(default = "default_site_url")]
    pub url: String,

    /// Value of the `article:author` meta tag
    #[serde(default = "default_site_name")]
    pub author: String,

    /// Name shown next to the publish date
    #[serde(default = "default_byline")]
    pub byline: String,

    /// `og:image` for posts without a featured image
    #[serde(default = "default_image")]
    pub default_image: String,
}

fn default_site_name() -> String {
    String::from("Boganto")
}

fn default_site_url() -> String {
    String::from("https://boganto.com")
}

fn default_byline() -> String {
    String::from("Literary Desk")
}

fn default_image() -> String {
    String::from("https://images.unsplash.com/photo-1481627834876-b7833e8f5570?ixlib=rb-4.0.3&auto=format&fit=crop&w=1200&q=80")
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            url: default_site_url(),
            author: default_site_name(),
            byline: default_byline(),
            default_image: default_image(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the PHP API
    #[serde(default = "default_api_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    String::from("http://localhost:8000")
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingConfig {
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,
}

fn default_words_per_minute() -> u32 {
    DEFAULT_WORDS_PER_MINUTE
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: default_words_per_minute(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        // An empty file is an empty mapping, not an error
        let config: Config = if contents.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(contents)?
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.reading.words_per_minute == 0 {
            return Err(ConfigError::Invalid {
                field: "reading.words_per_minute".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "api.base_url".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Site origin without a trailing slash ("https://boganto.com")
    pub fn site_origin(&self) -> &str {
        self.site.url.trim().trim_end_matches('/')
    }

    /// Canonical URL of a post page
    pub fn post_url(&self, slug: &str) -> String {
        format!("{}/blog/{}", self.site_origin(), slug)
    }
}
