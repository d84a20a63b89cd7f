//! Crawler module for page fetching and crawl orchestration
//!
//! This module contains the core crawling logic, including:
//! - The bounded frontier and the visited set
//! - Single-page scraping into [`PageResult`]s
//! - Overall crawl coordination as a lazy stream

mod coordinator;
mod frontier;
mod result;
mod scraper;

pub use coordinator::{CrawlStream, Crawler};
pub use result::PageResult;
pub use scraper::{ScrapedPage, Scraper};

use crate::config::{validate, CrawlOptions, FetchOptions};
use crate::fetch::build_engine;
use crate::url::parse_http_url;
use crate::CrawlError;
use futures::StreamExt;

/// Starts a crawl with the engine selected by `options.fetch`
///
/// This is the main entry point for crawling. It will:
/// 1. Validate the options and the seed URL
/// 2. Build the fetch engine
/// 3. Fetch robots.txt for the seed's origin (on first poll)
/// 4. Fetch, filter and follow pages breadth-first
///
/// # Arguments
///
/// * `seed` - Absolute http(s) URL to start from
/// * `options` - Crawl options
///
/// # Returns
///
/// * `Ok(CrawlStream)` - Lazily produced pages; dropping it ends the crawl
/// * `Err(CrawlError)` - Invalid options, invalid seed or engine setup failure
pub async fn crawl(seed: &str, options: CrawlOptions) -> Result<CrawlStream, CrawlError> {
    validate(&options)?;
    parse_http_url(seed)?;
    let engine = build_engine(&options.fetch).await?;
    Crawler::new(engine).crawl(seed, options)
}

/// Runs a crawl to completion and collects every page
pub async fn crawl_all(seed: &str, options: CrawlOptions) -> Result<Vec<PageResult>, CrawlError> {
    Ok(crawl(seed, options).await?.collect().await)
}

/// Scrapes a single URL with the engine selected by `options`
///
/// Fetch failures are reported in the returned page, not as `Err`.
pub async fn scrape(url: &str, options: FetchOptions) -> Result<PageResult, CrawlError> {
    let scraper = Scraper::from_options(options).await?;
    let page = scraper.scrape(url).await;
    scraper.close().await;
    Ok(page)
}
