use url::Url;

/// Normalizes a URL for equality comparisons within a crawl
///
/// # Normalization Steps
///
/// 1. Parse the URL (lowercases the host, fills in an empty path as `/`)
/// 2. Remove the fragment (everything after #)
/// 3. Remove a single trailing slash
///
/// Query strings are kept as-is. Input that does not parse as an absolute URL
/// is still normalized textually, so the function never fails; such strings
/// are rejected later by the policy filter.
///
/// # Examples
///
/// ```
/// use ripple_crawl::url::normalize_url;
///
/// assert_eq!(normalize_url("https://x.com/a/"), normalize_url("https://x.com/a"));
/// assert_eq!(normalize_url("https://x.com/a#frag"), "https://x.com/a");
/// ```
pub fn normalize_url(url_str: &str) -> String {
    let trimmed = url_str.trim();

    let mut normalized = match Url::parse(trimmed) {
        Ok(mut url) => {
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => match trimmed.split_once('#') {
            Some((head, _)) => head.to_string(),
            None => trimmed.to_string(),
        },
    };

    if normalized.ends_with('/') {
        normalized.pop();
    }

    normalized
}
