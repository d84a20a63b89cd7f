//! Markdown file output
//!
//! Writes each page to its own `.md` file in an output directory and, when the
//! crawl finishes, an `index.md` summary linking to them.

use crate::crawler::PageResult;
use crate::output::stats::CrawlSummary;
use crate::output::traits::{OutputHandler, OutputResult};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name of the summary file written on finish
pub const INDEX_FILE: &str = "index.md";

const MAX_SLUG_LEN: usize = 120;

/// Writes pages as markdown files into a directory
#[derive(Debug)]
pub struct MarkdownDirectory {
    dir: PathBuf,
    used: HashSet<String>,
}

impl MarkdownDirectory {
    /// Creates the output directory if needed
    pub fn create(dir: impl AsRef<Path>) -> OutputResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            used: HashSet::from([INDEX_FILE.to_string()]),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn unique_name(&mut self, url: &str) -> String {
        let slug = slugify(url);
        let mut name = format!("{}.md", slug);
        let mut n = 2;
        while self.used.contains(&name) {
            name = format!("{}-{}.md", slug, n);
            n += 1;
        }
        self.used.insert(name.clone());
        name
    }
}

impl OutputHandler for MarkdownDirectory {
    fn write_page(&mut self, page: &PageResult) -> OutputResult<Option<String>> {
        let name = self.unique_name(&page.url);
        let mut file = File::create(self.dir.join(&name))?;
        file.write_all(format_page(page).as_bytes())?;

        tracing::debug!("Wrote {} to {}", page.url, name);
        Ok(Some(name))
    }

    fn finish(&mut self, summary: &CrawlSummary) -> OutputResult<()> {
        let mut file = File::create(self.dir.join(INDEX_FILE))?;
        file.write_all(format_markdown_summary(summary).as_bytes())?;
        Ok(())
    }
}

/// Turns a URL into a file-name-safe slug
///
/// The scheme is dropped; every run of characters other than ASCII letters
/// and digits becomes a single `-`.
pub fn slugify(url: &str) -> String {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);

    let mut slug = String::with_capacity(without_scheme.len());
    let mut dash = false;
    for c in without_scheme.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            dash = false;
        } else if !dash && !slug.is_empty() {
            slug.push('-');
            dash = true;
        }
    }

    let mut slug = slug.trim_end_matches('-').to_string();
    if slug.len() > MAX_SLUG_LEN {
        slug.truncate(MAX_SLUG_LEN);
        slug = slug.trim_end_matches('-').to_string();
    }
    if slug.is_empty() {
        slug.push_str("page");
    }
    slug
}

/// Formats a page as a markdown document with a small front matter block
pub fn format_page(page: &PageResult) -> String {
    let mut md = String::new();

    md.push_str("---\n");
    md.push_str(&format!("url: {}\n", page.url));
    if let Some(title) = page.metadata_str("title") {
        md.push_str(&format!("title: {}\n", title.replace('\n', " ")));
    }
    md.push_str(&format!("status: {}\n", page.status_code));
    if let Some(fetched_at) = page.metadata_str("fetched-at") {
        md.push_str(&format!("fetched-at: {}\n", fetched_at));
    }
    md.push_str("---\n\n");

    md.push_str(page.markdown.as_deref().unwrap_or(""));
    md.push('\n');
    md
}

/// Formats a crawl summary as markdown
pub fn format_markdown_summary(summary: &CrawlSummary) -> String {
    let mut md = String::new();

    md.push_str("# Crawl Summary\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Seed**: {}\n", summary.seed));
    md.push_str(&format!("- **Started**: {}\n", summary.started_at.to_rfc3339()));
    if let Some(finished) = &summary.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished.to_rfc3339()));
    }
    if let Some(duration) = summary.duration_seconds() {
        md.push_str(&format!("- **Duration**: {:.2} seconds\n", duration));
    }
    md.push_str(&format!("- **Pages**: {}\n", summary.total_pages()));
    md.push_str(&format!("- **Markdown Bytes**: {}\n\n", summary.total_bytes));

    if !summary.depth_breakdown.is_empty() {
        md.push_str("## Depth Breakdown\n\n");
        md.push_str("| Depth | Pages |\n");
        md.push_str("|-------|-------|\n");
        for (depth, count) in &summary.depth_breakdown {
            md.push_str(&format!("| {} | {} |\n", depth, count));
        }
        md.push('\n');
    }

    if !summary.pages.is_empty() {
        md.push_str("## Pages\n\n");
        for entry in &summary.pages {
            let label = entry.title.as_deref().unwrap_or(&entry.url);
            match &entry.file {
                Some(file) => md.push_str(&format!("- [{}]({}) - {}\n", label, file, entry.url)),
                None => md.push_str(&format!("- {} - {}\n", label, entry.url)),
            }
        }
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn page(url: &str, markdown: &str) -> PageResult {
        let mut page = PageResult {
            url: url.to_string(),
            markdown: Some(markdown.to_string()),
            raw_html: Some("<p></p>".to_string()),
            status_code: 200,
            ..PageResult::default()
        };
        page.metadata.insert("title".into(), json!("Example"));
        page.metadata.insert("depth".into(), json!(1));
        page
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("https://example.com"), "example-com");
        assert_eq!(slugify("https://example.com/docs/Intro/"), "example-com-docs-intro");
        assert_eq!(slugify("http://x.com/a?b=c&d"), "x-com-a-b-c-d");
        assert_eq!(slugify("://"), "page");
        assert!(slugify(&format!("https://x.com/{}", "a".repeat(500))).len() <= MAX_SLUG_LEN);
    }

    #[test]
    fn test_format_page() {
        let md = format_page(&page("https://example.com/a", "# Hello"));
        assert!(md.starts_with("---\nurl: https://example.com/a\ntitle: Example\n"));
        assert!(md.ends_with("# Hello\n"));
    }

    #[test]
    fn test_directory_output() {
        let temp_dir = TempDir::new().unwrap();
        let mut output = MarkdownDirectory::create(temp_dir.path().join("out")).unwrap();

        let first = output.write_page(&page("https://example.com/a", "first")).unwrap();
        assert_eq!(first.as_deref(), Some("example-com-a.md"));
        // Same slug twice gets a suffix
        let second = output.write_page(&page("https://example.com/a/", "second")).unwrap();
        assert_eq!(second.as_deref(), Some("example-com-a-2.md"));

        let mut summary = CrawlSummary::new("https://example.com/a");
        summary.record(&page("https://example.com/a", "first"), Some("example-com-a.md".into()));
        summary.finish();
        output.finish(&summary).unwrap();

        let first = fs::read_to_string(output.dir().join("example-com-a.md")).unwrap();
        assert!(first.contains("first"));
        let second = fs::read_to_string(output.dir().join("example-com-a-2.md")).unwrap();
        assert!(second.contains("second"));

        let index = fs::read_to_string(output.dir().join(INDEX_FILE)).unwrap();
        assert!(index.contains("# Crawl Summary"));
        assert!(index.contains("[Example](example-com-a.md)"));
        assert!(index.contains("| 1 | 1 |"));
    }
}
