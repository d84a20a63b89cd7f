use crate::config::{compile_patterns, CrawlOptions};
use crate::policy::extensions::has_excluded_extension;
use crate::url::{authority, DepthTracker};
use crate::ConfigError;
use regex::Regex;
use std::fmt;
use url::Url;

/// Why a candidate URL was not admitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Not an absolute URL
    Malformed,
    /// Scheme other than http or https
    Scheme,
    /// Host (and port) differ from the seed's
    Domain,
    /// Deeper than `max_depth`
    Depth,
    /// Outside the seed's path prefix while backwards crawling is off
    Backwards,
    /// Include patterns are set and none matched
    NotIncluded,
    /// An exclude pattern matched
    Excluded,
    /// Path ends in a non-content file extension
    FileType,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Malformed => "malformed URL",
            Self::Scheme => "unsupported scheme",
            Self::Domain => "different domain",
            Self::Depth => "too deep",
            Self::Backwards => "outside seed path",
            Self::NotIncluded => "no include pattern matched",
            Self::Excluded => "matched exclude pattern",
            Self::FileType => "non-content file type",
        };
        f.write_str(reason)
    }
}

/// Immutable admission policy for one crawl
///
/// Built once from the seed URL and the caller's options, then shared
/// read-only by every fetch attempt. Depth results are memoized inside.
#[derive(Debug)]
pub struct CrawlPolicy {
    base_domain: String,
    base_path: String,
    allow_backwards: bool,
    max_depth: usize,
    include: Vec<Regex>,
    exclude: Vec<Regex>,
    depths: DepthTracker,
}

impl CrawlPolicy {
    /// Creates a policy scoped to the seed's host and path
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlPolicy)` - Ready-to-use policy
    /// * `Err(ConfigError)` - The seed has no host or a pattern is invalid
    pub fn new(seed: &Url, options: &CrawlOptions) -> Result<Self, ConfigError> {
        let base_domain = authority(seed).ok_or_else(|| {
            ConfigError::InvalidUrl(format!("Seed URL has no host: {}", seed))
        })?;
        let base_path = seed.path().to_string();

        Ok(Self {
            base_domain,
            depths: DepthTracker::new(&base_path),
            base_path,
            allow_backwards: options.allow_backwards,
            max_depth: options.max_depth,
            include: compile_patterns("include", &options.include_patterns)?,
            exclude: compile_patterns("exclude", &options.exclude_patterns)?,
        })
    }

    /// The host (plus non-default port) every admitted URL must share
    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    /// The seed's path; admitted URLs stay under it unless backwards crawling is on
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Depth of `url` relative to the seed path (memoized)
    pub fn depth(&self, url: &str) -> Option<usize> {
        self.depths.depth(url)
    }

    /// Returns true if `url` may be crawled
    pub fn admit(&self, url: &str) -> bool {
        self.evaluate(url).is_ok()
    }

    /// Checks every admission rule, returning the first one that fails
    ///
    /// Evaluation is side-effect free apart from depth memoization; malformed
    /// input yields a rejection rather than an error.
    pub fn evaluate(&self, url: &str) -> Result<(), Rejection> {
        let parsed = Url::parse(url).map_err(|_| Rejection::Malformed)?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Rejection::Scheme);
        }

        if authority(&parsed).as_deref() != Some(self.base_domain.as_str()) {
            return Err(Rejection::Domain);
        }

        let depth = self.depth(url).ok_or(Rejection::Malformed)?;
        if depth > self.max_depth {
            return Err(Rejection::Depth);
        }

        if !self.allow_backwards && !parsed.path().starts_with(&self.base_path) {
            return Err(Rejection::Backwards);
        }

        if !self.include.is_empty() && !self.include.iter().any(|p| p.is_match(url)) {
            return Err(Rejection::NotIncluded);
        }

        if self.exclude.iter().any(|p| p.is_match(url)) {
            return Err(Rejection::Excluded);
        }

        if has_excluded_extension(parsed.path()) {
            return Err(Rejection::FileType);
        }

        Ok(())
    }
}
