//! Ripple-Crawl: a polite, bounded single-site crawler
//!
//! This crate walks a website outward from a seed URL, respecting robots.txt and
//! a configurable admission policy, and yields each fetched page as clean
//! markdown together with its raw markup.
//!
//! # Example
//!
//! ```no_run
//! use futures::StreamExt;
//! use ripple_crawl::config::CrawlOptions;
//!
//! # async fn example() -> Result<(), ripple_crawl::CrawlError> {
//! let options = CrawlOptions {
//!     max_pages: 5,
//!     max_depth: 1,
//!     ..CrawlOptions::default()
//! };
//!
//! let mut pages = ripple_crawl::crawl("https://example.com", options).await?;
//! while let Some(page) = pages.next().await {
//!     println!("{} ({} bytes)", page.url, page.markdown.as_deref().unwrap_or("").len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod crawler;
pub mod extract;
pub mod fetch;
pub mod output;
pub mod policy;
pub mod robots;
pub mod url;

use thiserror::Error;

/// Main error type for crawl operations
///
/// Only configuration and setup problems are reported through this type.
/// Failures of individual pages are carried inside [`PageResult::error`].
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid URL pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{CrawlOptions, EngineKind, FetchOptions};
pub use crawler::{crawl, crawl_all, scrape, CrawlStream, Crawler, PageResult, Scraper};
pub use extract::{extract, Extracted};
pub use fetch::{build_engine, FetchEngine, FetchResult};
pub use policy::CrawlPolicy;
pub use robots::RobotsChecker;
pub use url::{normalize_url, DepthTracker};
