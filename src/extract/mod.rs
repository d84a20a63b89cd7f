//! Content extraction
//!
//! Turns raw page markup into a markdown rendering of its main content and the
//! set of outbound http(s) links. Extraction never fails: malformed markup
//! yields whatever could be recovered, possibly empty text and no links.

mod content;
mod links;
mod markdown;

pub use content::{strip_non_content, MAIN_CONTENT_SELECTORS, NON_MAIN_CONTENT_SELECTORS, REMOVE_TAGS};
pub use links::{extract_links, extract_title, resolve_link};
pub use markdown::{clean_markdown, html_to_markdown};

use scraper::Html;
use std::collections::BTreeSet;
use url::Url;

/// Output of one extraction pass over a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    /// Cleaned markdown of the retained content
    pub markdown: String,

    /// Absolute http(s) link targets found in anchors
    pub links: BTreeSet<String>,

    /// Text of the `<title>` element, if any
    pub title: Option<String>,
}

/// Extracts markdown, links and title from raw markup
///
/// Links are resolved against `base_url`; if it does not parse, the link set
/// is empty. With `only_main_content` set, page chrome (navigation, headers,
/// footers, sidebars, banners) is dropped and the first main-content container
/// is rendered instead of the whole body.
///
/// The result is a pure function of the inputs.
pub fn extract(raw: &str, base_url: &str, only_main_content: bool) -> Extracted {
    let mut document = Html::parse_document(raw);

    let links = match Url::parse(base_url) {
        Ok(base) => extract_links(&document, &base),
        Err(e) => {
            tracing::debug!("Base URL {} unusable for link resolution: {}", base_url, e);
            BTreeSet::new()
        }
    };
    let title = extract_title(&document);

    let retained = strip_non_content(&mut document, only_main_content);
    let markdown = html_to_markdown(&retained);

    Extracted {
        markdown,
        links,
        title,
    }
}
