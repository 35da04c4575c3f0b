//! Markdown detection by path, content type and content.

use crate::error::Result;
use once_cell::sync::Lazy;
use regex::RegexSet;
use std::fs;
use std::path::Path;

/// File extensions treated as Markdown (lowercase, no dot).
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "mkd", "mkdn"];

/// Content types treated as Markdown.
pub const MARKDOWN_CONTENT_TYPES: &[&str] = &["text/markdown", "text/x-markdown"];

/// Content heuristics; any single match is enough.
static MARKDOWN_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?m)^#{1,6}\s+",      // headers
        r"\*\*[^*]+\*\*",       // bold
        r"\*[^*]+\*",           // italic
        r"\[.+\]\(.+\)",        // links
        r"!\[.*\]\(.+\)",       // images
        r"(?m)^[*\-+]\s+",      // unordered lists
        r"(?m)^\d+\.\s+",       // ordered lists
        r"(?m)^>\s+",           // blockquotes
        r"(?s)```.*```",        // fenced code
        r"`[^`]+`",             // inline code
        r"(?m)^\|.+\|$",        // table rows
    ])
    .unwrap()
});

/// Why a source was classified as Markdown (or not).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionReason {
    /// File or URL suffix
    Extension,
    /// Declared content type
    ContentType,
    /// Content heuristics
    Content,
    /// Nothing matched
    None,
}

/// Result of Markdown detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// Whether the source should be treated as Markdown
    pub is_markdown: bool,
    /// What decided it
    pub reason: DetectionReason,
}

impl Detection {
    fn markdown(reason: DetectionReason) -> Self {
        Self {
            is_markdown: true,
            reason,
        }
    }

    fn not_markdown() -> Self {
        Self {
            is_markdown: false,
            reason: DetectionReason::None,
        }
    }
}

impl std::fmt::Display for Detection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reason {
            DetectionReason::Extension => write!(f, "Markdown (file extension)"),
            DetectionReason::ContentType => write!(f, "Markdown (content type)"),
            DetectionReason::Content => write!(f, "Markdown (content)"),
            DetectionReason::None => write!(f, "not Markdown"),
        }
    }
}

/// Check if text looks like Markdown.
///
/// # Example
/// ```
/// use bionic_preview::detect::is_markdown;
///
/// assert!(is_markdown("# Title"));
/// assert!(!is_markdown("Just a plain sentence."));
/// ```
pub fn is_markdown(text: &str) -> bool {
    !text.is_empty() && MARKDOWN_PATTERNS.is_match(text)
}

/// Check if an extension (without the dot) is a Markdown extension.
pub fn is_markdown_extension(ext: &str) -> bool {
    let ext = ext.to_ascii_lowercase();
    MARKDOWN_EXTENSIONS.contains(&ext.as_str())
}

/// Check a filesystem path by its extension.
pub fn is_markdown_path<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(is_markdown_extension)
}

/// Check a URL by the suffix of its path component.
///
/// Query strings and fragments are ignored.
pub fn is_markdown_url(url: &str) -> bool {
    let path = url
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let file = path.rsplit('/').next().unwrap_or_default();
    match file.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => is_markdown_extension(ext),
        _ => false,
    }
}

/// Check a `Content-Type` value, ignoring parameters such as `charset`.
pub fn is_markdown_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    MARKDOWN_CONTENT_TYPES.contains(&mime.as_str())
}

/// Decide whether a page is a Markdown file from its URL and content type.
///
/// Content heuristics are not consulted here; rendered pages routinely
/// contain `*` and `[..](..)` sequences.
pub fn is_markdown_resource(url: &str, content_type: Option<&str>) -> Detection {
    if is_markdown_url(url) {
        return Detection::markdown(DetectionReason::Extension);
    }
    if content_type.is_some_and(is_markdown_content_type) {
        return Detection::markdown(DetectionReason::ContentType);
    }
    Detection::not_markdown()
}

/// Classify in-memory text, optionally with a file name for the extension check.
pub fn detect_from_str(name: Option<&str>, text: &str) -> Detection {
    if name.is_some_and(is_markdown_url) {
        return Detection::markdown(DetectionReason::Extension);
    }
    if is_markdown(text) {
        return Detection::markdown(DetectionReason::Content);
    }
    Detection::not_markdown()
}

/// Classify a file by extension, falling back to its content.
pub fn detect_from_path<P: AsRef<Path>>(path: P) -> Result<Detection> {
    let path = path.as_ref();
    if is_markdown_path(path) {
        return Ok(Detection::markdown(DetectionReason::Extension));
    }
    let text = fs::read_to_string(path)?;
    Ok(detect_from_str(None, &text))
}
