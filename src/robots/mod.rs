//! Robots.txt handling module
//!
//! A [`RobotsChecker`] is scoped to one origin and moves through two states:
//! unfetched, then ready. The policy is fetched at most once per crawl; a
//! missing file, a non-200 response or a transport failure all leave the
//! checker ready with no restrictions (fail-open).

mod parser;

pub use parser::ParsedRobots;

use crate::url::robots_url;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Timeout for the single robots.txt request
pub const ROBOTS_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
enum RobotsState {
    Unfetched,
    Ready(ParsedRobots),
}

/// Robots.txt policy for one crawl's origin
#[derive(Debug, Clone)]
pub struct RobotsChecker {
    robots_url: Option<Url>,
    state: RobotsState,
}

impl RobotsChecker {
    /// Creates an unfetched checker for the origin of `seed`
    pub fn new(seed: &Url) -> Self {
        Self {
            robots_url: robots_url(seed),
            state: RobotsState::Unfetched,
        }
    }

    /// Creates a ready checker from robots.txt content that is already known
    ///
    /// No request is made when a crawl is given a checker built this way.
    pub fn from_content(seed: &Url, content: &str) -> Self {
        Self {
            robots_url: robots_url(seed),
            state: RobotsState::Ready(ParsedRobots::from_content(content)),
        }
    }

    /// Creates a ready checker with no restrictions
    pub fn allow_all() -> Self {
        Self {
            robots_url: None,
            state: RobotsState::Ready(ParsedRobots::allow_all()),
        }
    }

    /// URL the policy is (or would be) fetched from
    pub fn robots_url(&self) -> Option<&Url> {
        self.robots_url.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, RobotsState::Ready(_))
    }

    /// Fetches and parses robots.txt, moving the checker to the ready state
    ///
    /// Does nothing if the checker is already ready. Never fails: anything
    /// other than a 200 response yields an empty ruleset.
    pub async fn fetch(&mut self, client: &Client) {
        if self.is_ready() {
            return;
        }

        let rules = match &self.robots_url {
            Some(url) => fetch_rules(client, url).await,
            None => ParsedRobots::allow_all(),
        };

        self.state = RobotsState::Ready(rules);
    }

    /// Checks if a URL may be crawled by `user_agent`
    ///
    /// Returns true while the checker is still unfetched.
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        match &self.state {
            RobotsState::Unfetched => true,
            RobotsState::Ready(rules) => rules.is_allowed(url, user_agent),
        }
    }
}

async fn fetch_rules(client: &Client, url: &Url) -> ParsedRobots {
    tracing::debug!("Fetching robots.txt from {}", url);

    let response = match client.get(url.clone()).timeout(ROBOTS_TIMEOUT).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Could not fetch robots.txt from {}: {}", url, e);
            return ParsedRobots::allow_all();
        }
    };

    if response.status() != StatusCode::OK {
        tracing::info!(
            "No robots.txt at {} (status {}), allowing all paths",
            url,
            response.status().as_u16()
        );
        return ParsedRobots::allow_all();
    }

    match response.text().await {
        Ok(body) => {
            tracing::info!("Fetched robots.txt from {}", url);
            ParsedRobots::from_content(&body)
        }
        Err(e) => {
            tracing::warn!("Could not read robots.txt body from {}: {}", url, e);
            ParsedRobots::allow_all()
        }
    }
}
