//! Output module for writing crawl results
//!
//! This module handles:
//! - Writing pages as markdown files with an index summary
//! - Streaming pages as JSON lines
//! - Recording crawl statistics

mod json;
mod markdown;
pub mod stats;
mod traits;

pub use json::JsonLinesOutput;
pub use markdown::{format_markdown_summary, format_page, slugify, MarkdownDirectory, INDEX_FILE};
pub use stats::{print_statistics, CrawlSummary, PageEntry};
pub use traits::{OutputError, OutputHandler, OutputResult};
