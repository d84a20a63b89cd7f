use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Default user agent presented by both fetch engines
pub const DEFAULT_USER_AGENT: &str =
    concat!("Mozilla/5.0 (compatible; RippleCrawl/", env!("CARGO_PKG_VERSION"), ")");

/// Which fetch engine retrieves page markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineKind {
    /// Plain HTTP GET; no script execution
    #[default]
    Http,
    /// Headless Chromium; renders scripts and can capture screenshots
    Browser,
}

impl EngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Browser => "browser",
        }
    }
}

/// Options for fetching and converting a single page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FetchOptions {
    /// Engine used to retrieve markup
    pub engine: EngineKind,

    /// Per-request timeout (milliseconds)
    pub timeout_ms: u64,

    /// Extra wait after page load (milliseconds, browser engine only)
    pub wait_for_ms: Option<u64>,

    /// Capture a rendered screenshot (browser engine only)
    pub screenshot: bool,

    /// Keep only the main content region when converting to markdown
    pub only_main_content: bool,

    /// Additional request headers
    pub headers: BTreeMap<String, String>,

    /// User-Agent header value
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            engine: EngineKind::Http,
            timeout_ms: 30_000,
            wait_for_ms: None,
            screenshot: false,
            only_main_content: true,
            headers: BTreeMap::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn wait_for(&self) -> Option<Duration> {
        self.wait_for_ms.map(Duration::from_millis)
    }
}

/// Options for a whole crawl
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlOptions {
    /// Maximum number of pages yielded
    pub max_pages: usize,

    /// Maximum depth (path segments beyond the seed path)
    pub max_depth: usize,

    /// Regex patterns; when non-empty a URL must match at least one
    pub include_patterns: Vec<String>,

    /// Regex patterns; a URL matching any of them is skipped
    pub exclude_patterns: Vec<String>,

    /// Allow leaving the seed's path prefix
    pub allow_backwards: bool,

    /// Number of concurrent fetches (1 gives strict breadth-first output)
    pub max_concurrency: usize,

    /// Maximum queued URLs; further discoveries are dropped
    pub frontier_capacity: usize,

    /// User agent used for robots.txt queries
    pub robots_user_agent: String,

    /// Per-page fetch options
    pub fetch: FetchOptions,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_pages: 10,
            max_depth: 2,
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            allow_backwards: false,
            max_concurrency: 1,
            frontier_capacity: 10_000,
            robots_user_agent: "*".to_string(),
            fetch: FetchOptions::default(),
        }
    }
}
