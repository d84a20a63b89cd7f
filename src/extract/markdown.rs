//! Markup to markdown conversion and whitespace post-processing

const FENCE: &str = "```";

/// Converts an HTML fragment to cleaned markdown
///
/// Conversion failures produce an empty string.
pub fn html_to_markdown(html: &str) -> String {
    match htmd::convert(html) {
        Ok(markdown) => clean_markdown(&markdown),
        Err(e) => {
            tracing::debug!("Markdown conversion failed: {}", e);
            String::new()
        }
    }
}

/// Normalizes whitespace in converted markdown
///
/// Every line is trimmed, runs of blank lines collapse to a single blank line,
/// and runs of spaces collapse to one space except between fence lines.
pub fn clean_markdown(markdown: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut in_fence = false;
    let mut previous_blank = false;

    for raw in markdown.lines() {
        let line = raw.trim();

        if line.is_empty() {
            if !previous_blank {
                lines.push(String::new());
            }
            previous_blank = true;
            continue;
        }
        previous_blank = false;

        if line.starts_with(FENCE) {
            in_fence = !in_fence;
        }

        if in_fence {
            lines.push(line.to_string());
        } else {
            lines.push(collapse_spaces(line));
        }
    }

    lines.join("\n").trim().to_string()
}

fn collapse_spaces(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut last_space = false;
    for c in line.chars() {
        if c == ' ' {
            if !last_space {
                out.push(c);
            }
            last_space = true;
        } else {
            out.push(c);
            last_space = false;
        }
    }
    out
}
