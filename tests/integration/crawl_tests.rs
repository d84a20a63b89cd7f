//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end with the HTTP engine.

use futures::StreamExt;
use ripple_crawl::config::{CrawlOptions, FetchOptions};
use ripple_crawl::{crawl, crawl_all, scrape, CrawlError, PageResult};
use std::collections::BTreeSet;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// An HTML response
fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into(), "text/html")
}

/// A page whose main content names it and links to `links`
fn page(title: &str, links: &[&str]) -> ResponseTemplate {
    let anchors: String = links
        .iter()
        .map(|l| format!("<li><a href=\"{}\">{}</a></li>", l, l))
        .collect();
    html(format!(
        "<html><head><title>{title}</title></head><body>\
         <nav><a href=\"/\">Home</a></nav>\
         <main><h1>{title}</h1><p>Content of {title}.</p><ul>{anchors}</ul></main>\
         <footer>Footer text</footer></body></html>"
    ))
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_robots(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Asserts a route is never requested (checked when the server drops)
async fn mount_unreachable(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html("<p>should not be fetched</p>"))
        .expect(0)
        .mount(server)
        .await;
}

fn paths(server: &MockServer, pages: &[PageResult]) -> BTreeSet<String> {
    pages
        .iter()
        .map(|p| p.url.trim_start_matches(&server.uri()).to_string())
        .collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount(
        &server,
        "/",
        page("Home", &["/page1", "/page2", "#top", "mailto:a@b.c"]),
    )
    .await;
    mount(&server, "/page1", page("Page 1", &["/page2"])).await;
    mount(&server, "/page2", page("Page 2", &[])).await;

    let pages = crawl_all(&server.uri(), CrawlOptions::default()).await.unwrap();

    assert_eq!(paths(&server, &pages), set(&["", "/page1", "/page2"]));
    assert_eq!(pages[0].url, server.uri());
    for page in &pages {
        assert!(page.success());
        assert_eq!(page.status_code, 200);
        assert_eq!(page.metadata_str("engine"), Some("http"));
        let markdown = page.markdown.as_deref().unwrap();
        assert!(markdown.contains("Content of"));
        assert!(!markdown.contains("Footer text"));
        assert!(page.raw_html.as_deref().unwrap().contains("<footer>"));
    }
}

#[tokio::test]
async fn test_robots_txt_respect() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nDisallow: /private").await;
    mount(&server, "/", page("Home", &["/private/secret", "/public"])).await;
    mount(&server, "/public", page("Public", &[])).await;
    mount_unreachable(&server, "/private/secret").await;

    let pages = crawl_all(&server.uri(), CrawlOptions::default()).await.unwrap();

    assert_eq!(paths(&server, &pages), set(&["", "/public"]));
}

#[tokio::test]
async fn test_missing_robots_allows_everything() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    mount(&server, "/", page("Home", &["/admin", "/private"])).await;
    mount(&server, "/admin", page("Admin", &[])).await;
    mount(&server, "/private", page("Private", &[])).await;

    let pages = crawl_all(&server.uri(), CrawlOptions::default()).await.unwrap();

    assert_eq!(paths(&server, &pages), set(&["", "/admin", "/private"]));
}

#[tokio::test]
async fn test_crawl_with_depth_limit() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount(&server, "/", page("Home", &["/about"])).await;
    mount(&server, "/about", page("About", &["/about/team"])).await;
    mount_unreachable(&server, "/about/team").await;

    let options = CrawlOptions {
        max_depth: 1,
        max_pages: 5,
        ..CrawlOptions::default()
    };
    let pages = crawl_all(&server.uri(), options).await.unwrap();

    assert_eq!(paths(&server, &pages), set(&["", "/about"]));
    let depths: Vec<u64> = pages
        .iter()
        .map(|p| p.metadata["depth"].as_u64().unwrap())
        .collect();
    assert_eq!(depths, vec![0, 1]);
}

#[tokio::test]
async fn test_other_domains_are_not_followed() {
    let server = MockServer::start().await;
    let other = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;
    let elsewhere = format!("{}/elsewhere", other.uri());
    mount(&server, "/", page("Home", &[elsewhere.as_str(), "/local"])).await;
    mount(&server, "/local", page("Local", &[])).await;
    mount_unreachable(&other, "/elsewhere").await;

    let pages = crawl_all(&server.uri(), CrawlOptions::default()).await.unwrap();

    assert_eq!(paths(&server, &pages), set(&["", "/local"]));
}

#[tokio::test]
async fn test_scope_stays_under_seed_path() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount(&server, "/docs", page("Docs", &["/docs/intro", "/blog"])).await;
    mount(&server, "/docs/intro", page("Intro", &[])).await;
    mount_unreachable(&server, "/blog").await;

    let seed = format!("{}/docs/", server.uri());
    let pages = crawl_all(&seed, CrawlOptions::default()).await.unwrap();

    assert_eq!(paths(&server, &pages), set(&["/docs", "/docs/intro"]));
}

#[tokio::test]
async fn test_failed_pages_are_skipped() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount(&server, "/", page("Home", &["/broken", "/gone", "/ok"])).await;
    mount(&server, "/broken", ResponseTemplate::new(500)).await;
    mount(&server, "/gone", ResponseTemplate::new(404)).await;
    mount(&server, "/ok", page("Ok", &[])).await;

    let pages = crawl_all(&server.uri(), CrawlOptions::default()).await.unwrap();

    assert_eq!(paths(&server, &pages), set(&["", "/ok"]));
    assert!(pages.iter().all(|p| p.error.is_none()));
}

#[tokio::test]
async fn test_content_type_handling() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount(&server, "/", page("Home", &["/feed", "/files/report.pdf"])).await;
    mount(
        &server,
        "/feed",
        ResponseTemplate::new(200).set_body_raw("{\"items\": []}", "application/json"),
    )
    .await;
    mount_unreachable(&server, "/files/report.pdf").await;

    let pages = crawl_all(&server.uri(), CrawlOptions::default()).await.unwrap();

    assert_eq!(paths(&server, &pages), set(&[""]));
}

#[tokio::test]
async fn test_page_budget_and_streaming() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount(&server, "/", page("Home", &["/a", "/b", "/c", "/d"])).await;
    for route in ["/a", "/b", "/c", "/d"] {
        mount(&server, route, page(route, &[])).await;
    }

    let options = CrawlOptions {
        max_pages: 2,
        max_concurrency: 3,
        ..CrawlOptions::default()
    };
    let mut stream = crawl(&server.uri(), options).await.unwrap();

    let first = stream.next().await.unwrap();
    assert_eq!(first.url, server.uri());
    let second = stream.next().await.unwrap();
    assert!(second.url.starts_with(&server.uri()));
    assert!(stream.next().await.is_none());

    let requests = server.received_requests().await.unwrap();
    let page_requests = requests
        .iter()
        .filter(|r| r.url.path() != "/robots.txt")
        .count();
    assert_eq!(page_requests, 2);
}

#[tokio::test]
async fn test_redirects_are_followed() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount(&server, "/", page("Home", &["/old"])).await;
    mount(
        &server,
        "/old",
        ResponseTemplate::new(301).insert_header("location", format!("{}/new", server.uri()).as_str()),
    )
    .await;
    mount(&server, "/new", page("New", &[])).await;

    let pages = crawl_all(&server.uri(), CrawlOptions::default()).await.unwrap();

    assert_eq!(pages.len(), 2);
    let moved = &pages[1];
    assert_eq!(moved.url, format!("{}/old", server.uri()));
    assert_eq!(
        moved.metadata_str("final-url"),
        Some(format!("{}/new", server.uri()).as_str())
    );
    assert!(moved.markdown.as_deref().unwrap().contains("Content of New"));
}

#[tokio::test]
async fn test_include_and_exclude_patterns() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nAllow: /").await;
    mount(&server, "/", page("Home", &["/guide/one", "/guide/draft-two", "/news"])).await;
    mount(&server, "/guide/one", page("One", &[])).await;
    mount_unreachable(&server, "/guide/draft-two").await;
    mount_unreachable(&server, "/news").await;

    let options = CrawlOptions {
        include_patterns: vec!["/guide/".to_string(), "^http://127\\.0\\.0\\.1:\\d+$".to_string()],
        exclude_patterns: vec!["draft".to_string()],
        ..CrawlOptions::default()
    };
    let pages = crawl_all(&server.uri(), options).await.unwrap();

    assert_eq!(paths(&server, &pages), set(&["", "/guide/one"]));
}

#[tokio::test]
async fn test_invalid_configuration_is_rejected() {
    let result = crawl("ftp://example.com/", CrawlOptions::default()).await;
    assert!(matches!(result, Err(CrawlError::Url(_))));

    let options = CrawlOptions {
        max_pages: 0,
        ..CrawlOptions::default()
    };
    let result = crawl("https://example.com/", options).await;
    assert!(matches!(result, Err(CrawlError::Config(_))));

    let options = CrawlOptions {
        exclude_patterns: vec!["(".to_string()],
        ..CrawlOptions::default()
    };
    let result = crawl("https://example.com/", options).await;
    assert!(matches!(result, Err(CrawlError::Config(_))));
}

#[tokio::test]
async fn test_bad_header_value_fails_before_fetching() {
    let server = MockServer::start().await;
    mount(&server, "/", page("Home", &[])).await;

    let mut options = CrawlOptions::default();
    options
        .fetch
        .headers
        .insert("x-token".to_string(), "a\nb".to_string());

    let result = crawl(&server.uri(), options.clone()).await;
    assert!(matches!(result, Err(CrawlError::Config(_))));

    let result = scrape(&server.uri(), options.fetch).await;
    assert!(matches!(result, Err(CrawlError::Config(_))));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_scrape_single_page() {
    let server = MockServer::start().await;
    mount(&server, "/article", page("Article", &["/other"])).await;

    let options = FetchOptions {
        only_main_content: false,
        ..FetchOptions::default()
    };
    let result = scrape(&format!("{}/article", server.uri()), options)
        .await
        .unwrap();

    assert!(result.success());
    assert_eq!(result.metadata_str("title"), Some("Article"));
    let markdown = result.markdown.unwrap();
    assert!(markdown.contains("Content of Article"));
    assert!(markdown.contains("Footer text"));
}

#[tokio::test]
async fn test_scrape_failure_is_reported_in_result() {
    let server = MockServer::start().await;
    mount(&server, "/down", ResponseTemplate::new(503)).await;

    let result = scrape(&format!("{}/down", server.uri()), FetchOptions::default())
        .await
        .unwrap();

    assert!(!result.success());
    assert_eq!(result.status_code, 503);
    assert!(result.error.is_some());
}
