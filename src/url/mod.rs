//! URL handling module
//!
//! This module provides URL normalization, host/origin extraction and crawl
//! depth computation relative to the seed's base path.

mod depth;
mod domain;
mod normalize;

// Re-export main functions
pub use depth::{path_segment_count, DepthTracker};
pub use domain::{authority, extract_domain, parse_http_url, robots_url};
pub use normalize::normalize_url;
