//! Crawl frontier and visited set
//!
//! Both structures belong to a single crawl and are owned by its driver; they
//! are never shared between tasks or exposed outside the crate.

use std::collections::{HashSet, VecDeque};

/// A URL waiting to be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CrawlTarget {
    /// Normalized URL
    pub url: String,

    /// Depth relative to the seed path
    pub depth: usize,
}

/// Bounded FIFO queue of pending URLs
///
/// Discoveries beyond the capacity are refused rather than queued.
#[derive(Debug)]
pub(crate) struct Frontier {
    queue: VecDeque<CrawlTarget>,
    capacity: usize,
}

impl Frontier {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            capacity,
        }
    }

    /// Enqueues a target, returning false if the frontier is full
    pub(crate) fn push(&mut self, target: CrawlTarget) -> bool {
        if self.is_full() {
            return false;
        }
        self.queue.push_back(target);
        true
    }

    /// Dequeues the oldest target
    pub(crate) fn pop(&mut self) -> Option<CrawlTarget> {
        self.queue.pop_front()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.queue.len() >= self.capacity
    }
}

/// Normalized URLs already dispatched for fetching
///
/// Membership is checked and recorded by the crawl driver alone, so a URL is
/// dispatched at most once per crawl.
#[derive(Debug, Default)]
pub(crate) struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records a URL, returning false if it was already present
    pub(crate) fn insert(&mut self, url: &str) -> bool {
        self.urls.insert(url.to_string())
    }

    pub(crate) fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub(crate) fn len(&self) -> usize {
        self.urls.len()
    }
}
