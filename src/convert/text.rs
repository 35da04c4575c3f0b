//! Plain text as escaped paragraphs.

use super::DocumentConverter;
use crate::error::Result;
use crate::escape::escape_html;
use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]*\n").unwrap());

/// Converts plain text into one `<p>` per blank-line-separated block.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextConverter;

impl PlainTextConverter {
    /// Create a plain-text converter.
    pub fn new() -> Self {
        Self
    }

    /// Convert plain text to escaped paragraphs.
    pub fn convert(&self, source: &str) -> String {
        let source = source.replace("\r\n", "\n");
        BLANK_LINES
            .split(&source)
            .map(str::trim)
            .filter(|block| !block.is_empty())
            .map(|block| format!("<p>{}</p>", escape_html(block)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl DocumentConverter for PlainTextConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn name(&self) -> &str {
        "text"
    }

    fn convert_source(&self, source: &str) -> Result<String> {
        Ok(self.convert(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_become_paragraphs() {
        let html = PlainTextConverter::new()
            .convert_source("one\ntwo\n\n\n  three & four  \n \n")
            .unwrap();
        assert_eq!(html, "<p>one\ntwo</p>\n<p>three &amp; four</p>");
    }

    #[test]
    fn test_empty() {
        assert_eq!(PlainTextConverter::new().convert(" \n\n"), "");
    }
}
