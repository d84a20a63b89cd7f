//! Single-page fetch and conversion
//!
//! A [`Scraper`] pairs a fetch engine with fetch options and turns one URL into
//! a [`PageResult`]. The crawl coordinator uses it for every page; it is also
//! usable on its own for one-off scrapes.

use crate::config::{validate_fetch_options, FetchOptions};
use crate::crawler::PageResult;
use crate::extract::extract;
use crate::fetch::{build_engine, FetchEngine, FetchResult};
use crate::url::parse_http_url;
use crate::CrawlError;
use base64::Engine as _;
use chrono::Utc;
use serde_json::{json, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Status reported for URLs that cannot be fetched at all
const INVALID_URL_STATUS: u16 = 400;

/// A scraped page together with the links discovered on it
#[derive(Debug, Clone)]
pub struct ScrapedPage {
    pub result: PageResult,

    /// Absolute http(s) links, resolved against the final URL
    pub links: BTreeSet<String>,
}

/// Fetches single pages and converts them to [`PageResult`]s
#[derive(Clone)]
pub struct Scraper {
    engine: Arc<dyn FetchEngine>,
    options: FetchOptions,
}

impl Scraper {
    pub fn new(engine: Arc<dyn FetchEngine>, options: FetchOptions) -> Self {
        Self { engine, options }
    }

    /// Creates a scraper with the engine selected by `options`
    pub async fn from_options(options: FetchOptions) -> Result<Self, CrawlError> {
        validate_fetch_options(&options)?;
        let engine = build_engine(&options).await?;
        Ok(Self::new(engine, options))
    }

    pub fn engine(&self) -> &Arc<dyn FetchEngine> {
        &self.engine
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Scrapes one URL
    ///
    /// Never fails; problems are reported through [`PageResult::error`].
    pub async fn scrape(&self, url: &str) -> PageResult {
        self.scrape_page(url, None).await.result
    }

    /// Scrapes several URLs concurrently, returning results in input order
    pub async fn scrape_many(&self, urls: &[String]) -> Vec<PageResult> {
        futures::future::join_all(urls.iter().map(|url| self.scrape(url))).await
    }

    /// Releases the engine's resources
    pub async fn close(&self) {
        self.engine.close().await;
    }

    /// Scrapes one URL and also returns its outbound links
    ///
    /// `depth` is recorded in metadata when the page is part of a crawl.
    pub async fn scrape_page(&self, url: &str, depth: Option<usize>) -> ScrapedPage {
        if let Err(e) = parse_http_url(url) {
            return ScrapedPage {
                result: PageResult::failure(url, INVALID_URL_STATUS, format!("Invalid URL: {}", e)),
                links: BTreeSet::new(),
            };
        }

        let fetched = self.engine.fetch(url, &self.options).await;
        let status_code = fetched.status_code();
        let error = fetched.error_message();

        let FetchResult::Success {
            final_url,
            content_type,
            body,
            screenshot,
            title,
            ..
        } = fetched
        else {
            return ScrapedPage {
                result: PageResult::failure(
                    url,
                    status_code,
                    error.unwrap_or_else(|| "Fetch failed".to_string()),
                ),
                links: BTreeSet::new(),
            };
        };

        let extracted = extract(&body, &final_url, self.options.only_main_content);

        let mut metadata: BTreeMap<String, Value> = BTreeMap::new();
        metadata.insert("engine".into(), json!(self.engine.kind().as_str()));
        metadata.insert("final-url".into(), json!(final_url));
        metadata.insert("content-type".into(), json!(content_type.unwrap_or_default()));
        metadata.insert("content-length".into(), json!(body.len()));
        metadata.insert("fetched-at".into(), json!(Utc::now().to_rfc3339()));
        if let Some(title) = title.or(extracted.title) {
            metadata.insert("title".into(), json!(title));
        }
        if let Some(depth) = depth {
            metadata.insert("depth".into(), json!(depth));
        }

        let screenshot =
            screenshot.map(|bytes| base64::engine::general_purpose::STANDARD.encode(bytes));

        ScrapedPage {
            result: PageResult {
                url: url.to_string(),
                markdown: Some(extracted.markdown),
                raw_html: Some(body),
                screenshot,
                status_code,
                error: None,
                metadata,
            },
            links: extracted.links,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineKind;
    use async_trait::async_trait;

    struct StaticEngine {
        body: &'static str,
    }

    #[async_trait]
    impl FetchEngine for StaticEngine {
        fn kind(&self) -> EngineKind {
            EngineKind::Http
        }

        async fn fetch(&self, url: &str, _options: &FetchOptions) -> FetchResult {
            if url.ends_with("/down") {
                return FetchResult::Timeout { timeout_ms: 30_000 };
            }
            FetchResult::Success {
                final_url: format!("{}/", url),
                status_code: 200,
                content_type: Some("text/html".into()),
                body: self.body.to_string(),
                screenshot: Some(vec![1, 2, 3]),
                title: None,
            }
        }
    }

    fn scraper() -> Scraper {
        let engine = Arc::new(StaticEngine {
            body: r#"<html><head><title>Hello</title></head>
                <body><main><h1>Hi</h1><a href="next">Next</a></main></body></html>"#,
        });
        Scraper::new(engine, FetchOptions::default())
    }

    #[tokio::test]
    async fn test_scrape_success() {
        let page = scraper().scrape_page("https://example.com/docs", Some(1)).await;
        let result = page.result;

        assert!(result.success());
        assert_eq!(result.url, "https://example.com/docs");
        assert_eq!(result.status_code, 200);
        assert!(result.markdown.as_deref().unwrap().contains("Hi"));
        assert!(result.raw_html.as_deref().unwrap().contains("<main>"));
        assert_eq!(result.screenshot.as_deref(), Some("AQID"));
        assert_eq!(result.metadata_str("engine"), Some("http"));
        assert_eq!(result.metadata_str("final-url"), Some("https://example.com/docs/"));
        assert_eq!(result.metadata_str("title"), Some("Hello"));
        assert_eq!(result.metadata["depth"], json!(1));
        assert!(result.metadata.contains_key("fetched-at"));

        // Links resolve against the final URL
        assert!(page.links.contains("https://example.com/docs/next"));
    }

    #[tokio::test]
    async fn test_scrape_timeout_maps_to_408() {
        let result = scraper().scrape("https://example.com/down").await;
        assert!(!result.success());
        assert_eq!(result.status_code, 408);
        assert!(result.error.unwrap().contains("timeout"));
    }

    #[tokio::test]
    async fn test_scrape_invalid_url() {
        let result = scraper().scrape("not-a-url").await;
        assert_eq!(result.status_code, 400);
        assert!(result.error.is_some());
        assert!(result.markdown.is_none());
    }

    #[tokio::test]
    async fn test_scrape_many_keeps_order() {
        let urls = vec![
            "https://example.com/a".to_string(),
            "https://example.com/down".to_string(),
            "https://example.com/b".to_string(),
        ];
        let results = scraper().scrape_many(&urls).await;
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].url, "https://example.com/a");
        assert!(!results[1].success());
        assert_eq!(results[2].url, "https://example.com/b");
    }

    #[tokio::test]
    async fn test_from_options_rejects_bad_header_value() {
        let mut options = FetchOptions::default();
        options
            .headers
            .insert("x-token".to_string(), "a\nb".to_string());
        let result = Scraper::from_options(options).await;
        assert!(matches!(result, Err(CrawlError::Config(_))));
    }
}
