//! Crawl statistics
//!
//! Collects per-page figures while a crawl runs and prints a short report at
//! the end.

use crate::crawler::PageResult;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// One yielded page as recorded in the summary
#[derive(Debug, Clone, PartialEq)]
pub struct PageEntry {
    pub url: String,
    pub title: Option<String>,
    pub depth: Option<u64>,
    pub bytes: usize,
    /// File the page was written to, if any
    pub file: Option<String>,
}

/// Summary statistics for a crawl
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    pub seed: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    pub pages: Vec<PageEntry>,
    pub total_bytes: usize,

    // Depth breakdown (depth -> count)
    pub depth_breakdown: BTreeMap<u64, u64>,
}

impl CrawlSummary {
    /// Creates an empty summary for a crawl starting now
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            started_at: Utc::now(),
            finished_at: None,
            pages: Vec::new(),
            total_bytes: 0,
            depth_breakdown: BTreeMap::new(),
        }
    }

    /// Adds a yielded page
    pub fn record(&mut self, page: &PageResult, file: Option<String>) {
        let bytes = page.markdown.as_deref().map(str::len).unwrap_or(0);
        let depth = page.metadata.get("depth").and_then(|v| v.as_u64());

        if let Some(depth) = depth {
            *self.depth_breakdown.entry(depth).or_insert(0) += 1;
        }
        self.total_bytes += bytes;
        self.pages.push(PageEntry {
            url: page.url.clone(),
            title: page.metadata_str("title").map(str::to_string),
            depth,
            bytes,
            file,
        });
    }

    /// Marks the crawl as finished now
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    /// Wall-clock duration, once finished
    pub fn duration_seconds(&self) -> Option<f64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds() as f64 / 1000.0)
    }
}

/// Prints crawl statistics to stdout
pub fn print_statistics(summary: &CrawlSummary) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Seed: {}", summary.seed);
    println!("  Pages crawled: {}", summary.total_pages());
    println!("  Markdown bytes: {}", summary.total_bytes);
    if let Some(duration) = summary.duration_seconds() {
        println!("  Duration: {:.2}s", duration);
    }
    println!();

    if !summary.depth_breakdown.is_empty() {
        println!("Pages by Depth:");
        for (depth, count) in &summary.depth_breakdown {
            println!("  {}: {}", depth, count);
        }
        println!();
    }
}
