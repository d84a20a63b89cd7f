//! Crawl admission policy
//!
//! This module combines the same-site, path-scope, depth, include/exclude
//! pattern and file-type rules into a single admission decision for a
//! candidate URL.

mod extensions;
mod filter;

pub use extensions::{has_excluded_extension, EXCLUDED_EXTENSIONS};
pub use filter::{CrawlPolicy, Rejection};
