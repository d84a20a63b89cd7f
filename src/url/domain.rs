use crate::{UrlError, UrlResult};
use url::Url;

/// Parses a string as an absolute http(s) URL with a host
///
/// # Returns
///
/// * `Ok(Url)` - A crawlable URL
/// * `Err(UrlError)` - The string is malformed, uses another scheme, or has no host
///
/// # Examples
///
/// ```
/// use ripple_crawl::url::parse_http_url;
///
/// assert!(parse_http_url("https://example.com/docs").is_ok());
/// assert!(parse_http_url("ftp://example.com/file").is_err());
/// assert!(parse_http_url("not a url").is_err());
/// ```
pub fn parse_http_url(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use ripple_crawl::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the host plus any non-default port, e.g. `example.com:8080`
///
/// This is what the policy filter compares against the seed so that two
/// servers on one host but different ports count as different sites.
pub fn authority(url: &Url) -> Option<String> {
    let host = extract_domain(url)?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}

/// Builds the robots.txt URL for the origin (scheme + host + port) of `url`
pub fn robots_url(url: &Url) -> Option<Url> {
    url.join("/robots.txt").ok()
}
