//! Headless Chromium fetch engine
//!
//! Renders pages in a real browser so script-generated content is captured.
//! One browser process is shared by all fetches of an engine; each fetch
//! opens its own tab and closes it when done.

use super::{FetchEngine, FetchResult};
use crate::config::{EngineKind, FetchOptions};
use crate::CrawlError;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Status reported for rendered pages; the browser does not expose one
const RENDERED_STATUS: u16 = 200;

/// Engine that renders pages in headless Chromium
pub struct BrowserEngine {
    browser: Mutex<Option<Browser>>,
    handler: Mutex<Option<JoinHandle<()>>>,
}

impl BrowserEngine {
    /// Launches a headless browser
    pub async fn launch(options: &FetchOptions) -> Result<Self, CrawlError> {
        let config = BrowserConfig::builder()
            .arg(format!("--user-agent={}", options.user_agent))
            .window_size(1920, 1080)
            .build()
            .map_err(CrawlError::Browser)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| CrawlError::Browser(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler event error: {}", e);
                }
            }
        });

        tracing::info!("Launched headless browser");

        Ok(Self {
            browser: Mutex::new(Some(browser)),
            handler: Mutex::new(Some(handler_task)),
        })
    }

    async fn open_page(&self) -> Result<Page, String> {
        let guard = self.browser.lock().await;
        let browser = guard.as_ref().ok_or("browser already closed")?;
        browser
            .new_page("about:blank")
            .await
            .map_err(|e| e.to_string())
    }

    async fn render(page: &Page, url: &str, options: &FetchOptions) -> Result<FetchResult, String> {
        page.goto(url).await.map_err(|e| e.to_string())?;
        page.wait_for_navigation().await.map_err(|e| e.to_string())?;

        if let Some(wait) = options.wait_for() {
            tracing::debug!("Waiting {:?} after page load", wait);
            tokio::time::sleep(wait).await;
        }

        let body = page.content().await.map_err(|e| e.to_string())?;
        let title = page.get_title().await.ok().flatten();
        let final_url = page
            .url()
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| url.to_string());

        let screenshot = if options.screenshot {
            let params = ScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .full_page(false)
                .build();
            Some(page.screenshot(params).await.map_err(|e| e.to_string())?)
        } else {
            None
        };

        Ok(FetchResult::Success {
            final_url,
            status_code: RENDERED_STATUS,
            content_type: Some("text/html".to_string()),
            body,
            screenshot,
            title,
        })
    }
}

#[async_trait]
impl FetchEngine for BrowserEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Browser
    }

    async fn fetch(&self, url: &str, options: &FetchOptions) -> FetchResult {
        tracing::debug!("Fetching URL via browser: {}", url);

        let page = match self.open_page().await {
            Ok(page) => page,
            Err(error) => return FetchResult::NetworkError { error },
        };

        let outcome = tokio::time::timeout(options.timeout(), Self::render(&page, url, options)).await;

        if let Err(e) = page.close().await {
            tracing::debug!("Failed to close page for {}: {}", url, e);
        }

        match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(error)) => FetchResult::NetworkError {
                error: format!("Browser error: {}", error),
            },
            Err(_) => FetchResult::Timeout {
                timeout_ms: options.timeout_ms,
            },
        }
    }

    async fn close(&self) {
        if let Some(mut browser) = self.browser.lock().await.take() {
            if let Err(e) = browser.close().await {
                tracing::warn!("Failed to close browser: {}", e);
            }
            if let Err(e) = browser.wait().await {
                tracing::debug!("Browser process did not exit cleanly: {}", e);
            }
        }

        if let Some(handler) = self.handler.lock().await.take() {
            handler.abort();
        }

        tracing::info!("Closed headless browser");
    }
}
