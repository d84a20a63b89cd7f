//! Plain HTTP fetch engine
//!
//! Fetches pages with a single GET request. JavaScript is not executed.

use super::{FetchEngine, FetchResult};
use crate::config::{EngineKind, FetchOptions};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::time::Duration;

/// Maximum number of redirects followed for one request
pub const MAX_REDIRECTS: usize = 10;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds an HTTP client for the given fetch options
///
/// The per-request timeout is applied on each request rather than here, so a
/// single client can serve calls with different options.
pub fn build_http_client(options: &FetchOptions) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(options.user_agent.as_str())
        .connect_timeout(CONNECT_TIMEOUT)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Returns true for content types that may hold HTML markup
///
/// A missing header is given the benefit of the doubt.
pub fn is_html_content_type(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return true;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    mime.is_empty() || mime.starts_with("text/") || mime.contains("html")
}

/// Engine that fetches pages over plain HTTP
#[derive(Debug, Clone)]
pub struct HttpEngine {
    client: Client,
}

impl HttpEngine {
    pub fn new(options: &FetchOptions) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(options)?,
        })
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl FetchEngine for HttpEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Http
    }

    async fn fetch(&self, url: &str, options: &FetchOptions) -> FetchResult {
        tracing::debug!("Fetching URL via HTTP: {}", url);

        let mut request = self.client.get(url).timeout(options.timeout());
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return classify_error(e, options),
        };

        let status = response.status();
        let final_url = response.url().to_string();

        if !status.is_success() {
            return FetchResult::HttpError {
                status_code: status.as_u16(),
            };
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if !is_html_content_type(content_type.as_deref()) {
            return FetchResult::ContentMismatch {
                status_code: status.as_u16(),
                content_type: content_type.unwrap_or_default(),
            };
        }

        match response.text().await {
            Ok(body) => FetchResult::Success {
                final_url,
                status_code: status.as_u16(),
                content_type,
                body,
                screenshot: None,
                title: None,
            },
            Err(e) => classify_error(e, options),
        }
    }
}

fn classify_error(error: reqwest::Error, options: &FetchOptions) -> FetchResult {
    if error.is_timeout() {
        FetchResult::Timeout {
            timeout_ms: options.timeout_ms,
        }
    } else {
        FetchResult::NetworkError {
            error: error.to_string(),
        }
    }
}
