//! Robots.txt parser implementation
//!
//! This module provides functionality for parsing robots.txt content using the
//! robotstxt crate, which implements longest-match-wins allow/disallow rules.

use robotstxt::DefaultMatcher;
use std::panic::{self, AssertUnwindSafe};

/// Parsed robots.txt data
///
/// This is a wrapper around the robotstxt crate's matcher, providing a
/// simplified interface for checking if URLs are allowed.
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    /// Raw robots.txt content (empty string means allow all)
    content: String,
    /// Whether to allow all (true = allow all, false = parse content)
    allow_all: bool,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            allow_all: false,
        }
    }

    /// Creates a permissive ParsedRobots that allows everything
    ///
    /// This is used when robots.txt is missing or cannot be fetched.
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            allow_all: true,
        }
    }

    /// Returns the raw robots.txt content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns true if no rules apply at all
    pub fn is_unrestricted(&self) -> bool {
        self.allow_all || self.content.trim().is_empty()
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to check (absolute, or a path such as "/page.html")
    /// * `user_agent` - The user agent product token, `*` for the wildcard group
    ///
    /// # Returns
    ///
    /// * `true` - If the URL is allowed, or the rules could not be evaluated
    /// * `false` - If the URL is disallowed
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.is_unrestricted() {
            return true;
        }

        // robotstxt can panic on malformed input; treat that as allowed
        panic::catch_unwind(AssertUnwindSafe(|| {
            let mut matcher = DefaultMatcher::default();
            matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
        }))
        .unwrap_or(true)
    }
}
