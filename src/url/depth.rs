use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

/// Counts the non-empty segments of a URL path
///
/// `/` and the empty path both count as zero segments.
pub fn path_segment_count(path: &str) -> usize {
    path.split('/').filter(|segment| !segment.is_empty()).count()
}

/// Computes crawl depth relative to a base path, memoizing per URL
///
/// Depth is the number of path segments in a URL beyond the number of
/// segments in the base path, floored at zero. Results are a pure function of
/// the URL and the base path, so they are cached for the life of one crawl.
#[derive(Debug)]
pub struct DepthTracker {
    base_segments: usize,
    memo: Mutex<HashMap<String, usize>>,
}

impl DepthTracker {
    /// Creates a tracker for the given base path (e.g. the seed URL's path)
    pub fn new(base_path: &str) -> Self {
        Self {
            base_segments: path_segment_count(base_path),
            memo: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the depth of `url`, or `None` if it is not an absolute URL
    pub fn depth(&self, url: &str) -> Option<usize> {
        let mut memo = self.memo.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(depth) = memo.get(url) {
            return Some(*depth);
        }

        let parsed = Url::parse(url).ok()?;
        let depth = path_segment_count(parsed.path()).saturating_sub(self.base_segments);
        memo.insert(url.to_string(), depth);
        Some(depth)
    }

    /// Number of memoized URLs
    pub fn cached(&self) -> usize {
        self.memo.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
