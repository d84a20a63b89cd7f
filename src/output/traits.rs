//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the
//! errors they report.

use crate::crawler::PageResult;
use crate::output::stats::CrawlSummary;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for output handlers
///
/// Output handlers receive every page a crawl yields, in order, and are
/// told once when the crawl has finished.
pub trait OutputHandler {
    /// Records one yielded page
    ///
    /// # Arguments
    ///
    /// * `page` - The page as yielded by the crawl
    ///
    /// # Returns
    ///
    /// The file name the page was written to, for handlers that write files
    fn write_page(&mut self, page: &PageResult) -> OutputResult<Option<String>>;

    /// Finalizes output after the last page
    ///
    /// # Arguments
    ///
    /// * `summary` - Statistics gathered over the whole crawl
    fn finish(&mut self, _summary: &CrawlSummary) -> OutputResult<()> {
        Ok(())
    }
}
