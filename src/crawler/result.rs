//! Per-page crawl results

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Outcome of fetching and converting one URL
///
/// Produced once per fetched URL and never modified afterwards. Serializes
/// with camelCase field names plus a derived `success` flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResult {
    /// URL that was requested
    pub url: String,

    /// Markdown rendering of the page content
    pub markdown: Option<String>,

    /// Raw markup as returned by the fetch engine
    pub raw_html: Option<String>,

    /// Base64-encoded PNG screenshot
    pub screenshot: Option<String>,

    /// HTTP (or synthesized) status code
    pub status_code: u16,

    /// Failure description; absent on success
    pub error: Option<String>,

    /// Free-form page metadata (engine, final URL, title, ...)
    pub metadata: BTreeMap<String, Value>,
}

impl PageResult {
    /// Builds a failed result
    pub fn failure(url: impl Into<String>, status_code: u16, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status_code,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// True when there is no error and some content was captured
    pub fn success(&self) -> bool {
        self.error.is_none() && (self.markdown.is_some() || self.raw_html.is_some())
    }

    /// Looks up a metadata entry as a string
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }
}

impl Serialize for PageResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PageResult", 8)?;
        state.serialize_field("url", &self.url)?;
        state.serialize_field("markdown", &self.markdown)?;
        state.serialize_field("rawHtml", &self.raw_html)?;
        state.serialize_field("screenshot", &self.screenshot)?;
        state.serialize_field("statusCode", &self.status_code)?;
        state.serialize_field("error", &self.error)?;
        state.serialize_field("metadata", &self.metadata)?;
        state.serialize_field("success", &self.success())?;
        state.end()
    }
}
