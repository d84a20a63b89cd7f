//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator drives one crawl:
//! - Fetching robots.txt once for the seed's origin
//! - Managing the frontier queue and the visited set
//! - Filtering candidates through robots rules and the crawl policy
//! - Dispatching fetches, bounded by the configured concurrency
//! - Yielding successful pages as a lazy stream
//! - Enqueueing newly discovered links
//!
//! Frontier, visited set and page counter are owned by the single driver
//! that runs inside the stream; workers only fetch and extract.

use crate::config::{validate, CrawlOptions};
use crate::crawler::frontier::{CrawlTarget, Frontier, VisitedSet};
use crate::crawler::scraper::{ScrapedPage, Scraper};
use crate::crawler::PageResult;
use crate::fetch::{build_http_client, FetchEngine};
use crate::policy::CrawlPolicy;
use crate::robots::RobotsChecker;
use crate::url::{normalize_url, parse_http_url};
use crate::CrawlError;
use futures::future::BoxFuture;
use futures::stream::{BoxStream, FuturesUnordered};
use futures::{FutureExt, StreamExt};
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

/// Lazy, single-pass sequence of crawled pages
pub type CrawlStream = BoxStream<'static, PageResult>;

type InFlight = BoxFuture<'static, (CrawlTarget, ScrapedPage)>;

/// Orchestrates a crawl over a fetch engine
pub struct Crawler {
    engine: Arc<dyn FetchEngine>,
    robots: Option<RobotsChecker>,
    robots_client: Option<Client>,
}

impl Crawler {
    /// Creates a crawler that fetches pages with `engine`
    ///
    /// The engine is closed when the crawl stream is exhausted or dropped.
    pub fn new(engine: Arc<dyn FetchEngine>) -> Self {
        Self {
            engine,
            robots: None,
            robots_client: None,
        }
    }

    /// Uses a preloaded robots policy instead of fetching one
    pub fn with_robots(mut self, robots: RobotsChecker) -> Self {
        self.robots = Some(robots);
        self
    }

    /// Uses `client` for the robots.txt request
    pub fn with_robots_client(mut self, client: Client) -> Self {
        self.robots_client = Some(client);
        self
    }

    /// Starts a crawl from `seed`
    ///
    /// Options, the seed URL and the patterns are validated before anything is
    /// fetched; only those problems are returned as `Err`. Pages that fail to
    /// fetch are logged and left out of the stream.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlStream)` - Pages in discovery order (strictly breadth-first
    ///   when `max_concurrency` is 1)
    /// * `Err(CrawlError)` - Invalid options or seed URL
    pub fn crawl(self, seed: &str, options: CrawlOptions) -> Result<CrawlStream, CrawlError> {
        // Closes the engine on every early return below
        let engine = EngineGuard::new(self.engine.clone());

        validate(&options)?;

        let seed = normalize_url(parse_http_url(seed)?.as_str());
        let seed_url = Url::parse(&seed)?;
        let policy = CrawlPolicy::new(&seed_url, &options)?;

        let robots = self
            .robots
            .unwrap_or_else(|| RobotsChecker::new(&seed_url));
        let robots_client = match self.robots_client {
            Some(client) => client,
            None => build_http_client(&options.fetch)?,
        };

        let scraper = Arc::new(Scraper::new(self.engine.clone(), options.fetch.clone()));
        let run = CrawlRun {
            seed,
            options,
            policy,
            robots,
            robots_client,
            scraper,
            engine,
        };

        Ok(run.into_stream())
    }
}

/// State of one crawl, moved into its stream
struct CrawlRun {
    seed: String,
    options: CrawlOptions,
    policy: CrawlPolicy,
    robots: RobotsChecker,
    robots_client: Client,
    scraper: Arc<Scraper>,
    engine: EngineGuard,
}

impl CrawlRun {
    fn into_stream(self) -> CrawlStream {
        let CrawlRun {
            seed,
            options,
            policy,
            mut robots,
            robots_client,
            scraper,
            mut engine,
        } = self;

        let stream = async_stream::stream! {
            tracing::info!(
                "Starting crawl of {} (max pages {}, max depth {})",
                seed,
                options.max_pages,
                options.max_depth
            );

            if !robots.is_ready() {
                robots.fetch(&robots_client).await;
            }

            let mut frontier = Frontier::new(options.frontier_capacity);
            let mut visited = VisitedSet::new();
            let mut discovered: HashSet<String> = HashSet::new();
            let mut in_flight: FuturesUnordered<InFlight> = FuturesUnordered::new();
            let mut scraped = 0usize;

            discovered.insert(seed.clone());
            frontier.push(CrawlTarget {
                url: seed.clone(),
                depth: 0,
            });

            loop {
                // Dispatch while workers and page budget allow
                while in_flight.len() < options.max_concurrency
                    && scraped + in_flight.len() < options.max_pages
                {
                    let Some(target) = frontier.pop() else {
                        break;
                    };

                    if visited.contains(&target.url) {
                        continue;
                    }

                    if !robots.is_allowed(&target.url, &options.robots_user_agent) {
                        tracing::debug!("URL {} disallowed by robots.txt", target.url);
                        continue;
                    }

                    if let Err(reason) = policy.evaluate(&target.url) {
                        tracing::debug!("Skipping {}: {}", target.url, reason);
                        continue;
                    }

                    visited.insert(&target.url);
                    in_flight.push(dispatch(scraper.clone(), target));
                }

                let Some((target, page)) = in_flight.next().await else {
                    break;
                };

                if let Some(error) = &page.result.error {
                    tracing::warn!("Skipping failed page {}: {}", target.url, error);
                    continue;
                }

                scraped += 1;
                tracing::debug!(
                    "Crawled {} (depth {}, {} of {})",
                    target.url,
                    target.depth,
                    scraped,
                    options.max_pages
                );
                yield page.result;

                for link in page.links {
                    let url = normalize_url(&link);
                    if visited.contains(&url) || discovered.contains(&url) {
                        continue;
                    }

                    if frontier.is_full() {
                        tracing::trace!("Frontier full, dropping {}", url);
                        continue;
                    }

                    let depth = policy.depth(&url).unwrap_or(target.depth + 1);
                    discovered.insert(url.clone());
                    frontier.push(CrawlTarget { url, depth });
                }
            }

            tracing::info!(
                "Crawl of {} complete: {} pages yielded, {} URLs visited",
                seed,
                scraped,
                visited.len()
            );

            engine.close().await;
        };

        stream.boxed()
    }
}

fn dispatch(scraper: Arc<Scraper>, target: CrawlTarget) -> InFlight {
    async move {
        let page = scraper.scrape_page(&target.url, Some(target.depth)).await;
        (target, page)
    }
    .boxed()
}

/// Closes the fetch engine exactly once
///
/// If the stream is dropped before it finishes, the close runs on a spawned
/// task when a tokio runtime is available.
struct EngineGuard {
    engine: Option<Arc<dyn FetchEngine>>,
}

impl EngineGuard {
    fn new(engine: Arc<dyn FetchEngine>) -> Self {
        Self {
            engine: Some(engine),
        }
    }

    async fn close(&mut self) {
        if let Some(engine) = self.engine.take() {
            engine.close().await;
        }
    }
}

impl Drop for EngineGuard {
    fn drop(&mut self) {
        if let Some(engine) = self.engine.take() {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(async move { engine.close().await });
                }
                Err(_) => tracing::debug!("No runtime available to close fetch engine"),
            }
        }
    }
}
