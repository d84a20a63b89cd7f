//! Non-content stripping and main-content selection

use scraper::{Html, Selector};

/// Elements that never carry readable content
pub const REMOVE_TAGS: &[&str] = &[
    "script", "style", "noscript", "iframe", "template", "svg", "meta", "link", "head",
];

/// Page chrome dropped when only the main content is wanted
pub const NON_MAIN_CONTENT_SELECTORS: &[&str] = &[
    "nav",
    "footer",
    "header",
    "aside",
    "[role='navigation']",
    "[role='complementary']",
    "[role='banner']",
    "[role='contentinfo']",
    ".sidebar",
    ".navigation",
    ".footer",
    ".header",
    "#sidebar",
    "#navigation",
    "#footer",
    "#header",
    ".menu",
    ".breadcrumb",
    ".pagination",
    ".cookie-banner",
    ".cookie-consent",
    ".popup",
    ".modal",
    "ins",
    ".ads",
    ".advertisement",
];

/// Containers tried in order when picking the main content
pub const MAIN_CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    "#main",
    "#content",
    ".content",
    "[role='main']",
    "body",
];

/// Removes non-content elements from `document` and returns the HTML to render
///
/// Without `only_main_content` the whole `<body>` is returned after the
/// unconditional removals.
pub fn strip_non_content(document: &mut Html, only_main_content: bool) -> String {
    remove_matching(document, REMOVE_TAGS);

    if !only_main_content {
        return select_first(document, &["body"]).unwrap_or_else(|| document.root_element().html());
    }

    remove_matching(document, NON_MAIN_CONTENT_SELECTORS);
    select_first(document, MAIN_CONTENT_SELECTORS).unwrap_or_else(|| document.root_element().html())
}

fn remove_matching(document: &mut Html, selectors: &[&str]) {
    let mut doomed = Vec::new();
    for selector in selectors.iter().filter_map(|s| Selector::parse(s).ok()) {
        doomed.extend(document.select(&selector).map(|element| element.id()));
    }

    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

fn select_first(document: &Html, selectors: &[&str]) -> Option<String> {
    selectors
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .find_map(|selector| document.select(&selector).next().map(|el| el.html()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_selectors_parse() {
        for s in REMOVE_TAGS
            .iter()
            .chain(NON_MAIN_CONTENT_SELECTORS)
            .chain(MAIN_CONTENT_SELECTORS)
        {
            assert!(Selector::parse(s).is_ok(), "selector {} should parse", s);
        }
    }

    #[test]
    fn test_prefers_main_over_article() {
        let mut doc = Html::parse_document(
            "<body><article>side story</article><main><p>core</p></main></body>",
        );
        let html = strip_non_content(&mut doc, true);
        assert!(html.starts_with("<main>"));
        assert!(html.contains("core"));
        assert!(!html.contains("side story"));
    }

    #[test]
    fn test_falls_back_to_body() {
        let mut doc = Html::parse_document(
            "<body><div class=\"sidebar\">links</div><p>plain text</p></body>",
        );
        let html = strip_non_content(&mut doc, true);
        assert!(html.contains("plain text"));
        assert!(!html.contains("links"));
    }

    #[test]
    fn test_role_main_container() {
        let mut doc = Html::parse_document(
            "<body><div>outside</div><div role=\"main\">inside</div></body>",
        );
        let html = strip_non_content(&mut doc, true);
        assert!(html.contains("inside"));
        assert!(!html.contains("outside"));
    }

    #[test]
    fn test_nested_removals() {
        let mut doc = Html::parse_document(
            "<body><main><nav><script>x()</script>menu</nav><p>text</p></main></body>",
        );
        let html = strip_non_content(&mut doc, true);
        assert!(!html.contains("menu"));
        assert!(!html.contains("x()"));
        assert!(html.contains("text"));
    }
}
