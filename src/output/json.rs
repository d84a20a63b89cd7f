//! JSON lines output
//!
//! Each page becomes one line holding its serialized [`PageResult`].

use crate::crawler::PageResult;
use crate::output::traits::{OutputHandler, OutputResult};
use std::io::Write;

/// Writes pages as JSON lines to any writer
pub struct JsonLinesOutput<W: Write> {
    writer: W,
    include_html: bool,
}

impl<W: Write> JsonLinesOutput<W> {
    /// Creates a JSON lines writer
    ///
    /// Raw markup is left out unless `include_html` is set.
    pub fn new(writer: W, include_html: bool) -> Self {
        Self {
            writer,
            include_html,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputHandler for JsonLinesOutput<W> {
    fn write_page(&mut self, page: &PageResult) -> OutputResult<Option<String>> {
        if self.include_html || page.raw_html.is_none() {
            serde_json::to_writer(&mut self.writer, page)?;
        } else {
            let trimmed = PageResult {
                raw_html: None,
                ..page.clone()
            };
            serde_json::to_writer(&mut self.writer, &trimmed)?;
        }
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_writes_one_line_per_page() {
        let mut output = JsonLinesOutput::new(Vec::new(), false);
        for url in ["https://example.com", "https://example.com/a"] {
            let page = PageResult {
                url: url.to_string(),
                markdown: Some("text".into()),
                raw_html: Some("<p>text</p>".into()),
                status_code: 200,
                ..PageResult::default()
            };
            output.write_page(&page).unwrap();
        }

        let bytes = output.into_inner();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["url"], "https://example.com");
        assert_eq!(first["rawHtml"], Value::Null);
        assert_eq!(first["success"], true);
    }

    #[test]
    fn test_include_html() {
        let mut output = JsonLinesOutput::new(Vec::new(), true);
        let page = PageResult {
            url: "https://example.com".into(),
            raw_html: Some("<p>x</p>".into()),
            status_code: 200,
            ..PageResult::default()
        };
        output.write_page(&page).unwrap();

        let value: Value = serde_json::from_slice(&output.into_inner()).unwrap();
        assert_eq!(value["rawHtml"], "<p>x</p>");
    }
}
