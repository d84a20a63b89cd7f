//! Fetch engines
//!
//! A [`FetchEngine`] supplies raw markup for a URL. Two engines exist: a plain
//! HTTP engine built on reqwest, and (with the `browser` feature) a headless
//! Chromium engine that renders JavaScript and can capture screenshots.
//!
//! Engines never return `Err` from a fetch. Every outcome, including transport
//! failures, is described by a [`FetchResult`] variant.

mod http;

#[cfg(feature = "browser")]
mod browser;

pub use http::{build_http_client, is_html_content_type, HttpEngine, MAX_REDIRECTS};

#[cfg(feature = "browser")]
pub use browser::BrowserEngine;

use crate::config::{EngineKind, FetchOptions};
use crate::CrawlError;
use async_trait::async_trait;
use std::sync::Arc;

/// Status reported for fetches that ran out of time
pub const TIMEOUT_STATUS: u16 = 408;

/// Status reported for transport failures without an HTTP response
pub const NETWORK_ERROR_STATUS: u16 = 500;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value, if the server sent one
        content_type: Option<String>,
        /// Page body content
        body: String,
        /// PNG screenshot, when requested and supported by the engine
        screenshot: Option<Vec<u8>>,
        /// Page title as reported by the engine
        title: Option<String>,
    },

    /// Page is not HTML (Content-Type mismatch)
    ContentMismatch {
        /// HTTP status code
        status_code: u16,
        /// The actual Content-Type received
        content_type: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// The request did not complete within the configured timeout
    Timeout {
        /// Timeout that elapsed, in milliseconds
        timeout_ms: u64,
    },

    /// Network error (connection refused, TLS failure, too many redirects, ...)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchResult::Success { .. })
    }

    /// Status code to report for this outcome
    pub fn status_code(&self) -> u16 {
        match self {
            FetchResult::Success { status_code, .. }
            | FetchResult::ContentMismatch { status_code, .. }
            | FetchResult::HttpError { status_code } => *status_code,
            FetchResult::Timeout { .. } => TIMEOUT_STATUS,
            FetchResult::NetworkError { .. } => NETWORK_ERROR_STATUS,
        }
    }

    /// Human readable failure description, `None` on success
    pub fn error_message(&self) -> Option<String> {
        match self {
            FetchResult::Success { .. } => None,
            FetchResult::ContentMismatch { content_type, .. } => {
                Some(format!("Unsupported content type: {}", content_type))
            }
            FetchResult::HttpError { status_code } => Some(format!("HTTP status {}", status_code)),
            FetchResult::Timeout { timeout_ms } => {
                Some(format!("Request timeout after {}ms", timeout_ms))
            }
            FetchResult::NetworkError { error } => Some(error.clone()),
        }
    }
}

/// A source of raw page markup
#[async_trait]
pub trait FetchEngine: Send + Sync {
    /// Which engine this is, recorded in page metadata
    fn kind(&self) -> EngineKind;

    /// Fetches a single URL
    async fn fetch(&self, url: &str, options: &FetchOptions) -> FetchResult;

    /// Releases engine resources
    ///
    /// Called once when a crawl finishes or is abandoned. The default does
    /// nothing.
    async fn close(&self) {}
}

/// Builds the engine selected by `options.engine`
///
/// Selecting the browser engine in a build without the `browser` feature is
/// a configuration error.
pub async fn build_engine(options: &FetchOptions) -> Result<Arc<dyn FetchEngine>, CrawlError> {
    match options.engine {
        EngineKind::Http => Ok(Arc::new(HttpEngine::new(options)?)),
        EngineKind::Browser => build_browser_engine(options).await,
    }
}

#[cfg(feature = "browser")]
async fn build_browser_engine(options: &FetchOptions) -> Result<Arc<dyn FetchEngine>, CrawlError> {
    Ok(Arc::new(BrowserEngine::launch(options).await?))
}

#[cfg(not(feature = "browser"))]
async fn build_browser_engine(_options: &FetchOptions) -> Result<Arc<dyn FetchEngine>, CrawlError> {
    Err(crate::ConfigError::Validation(
        "the browser engine requires building with the `browser` feature".to_string(),
    )
    .into())
}
