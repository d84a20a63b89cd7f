//! Configuration module
//!
//! This module defines crawl and fetch options and handles loading them from
//! TOML files and validating them before a crawl starts.
//!
//! # Example
//!
//! ```no_run
//! use ripple_crawl::config::load_config;
//! use std::path::Path;
//!
//! let options = load_config(Path::new("crawl.toml")).unwrap();
//! println!("Crawler will use max depth: {}", options.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CrawlOptions, EngineKind, FetchOptions, DEFAULT_USER_AGENT};

// Re-export parser and validation functions
pub use parser::{load_config, parse_config};
pub use validation::{compile_patterns, validate, validate_fetch_options};
