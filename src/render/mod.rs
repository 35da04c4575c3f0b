//! Standalone reader pages.
//!
//! [`render_document`] turns Markdown or plain text into a complete HTML
//! document with bionic emphasis and gradient tints applied and the reader
//! stylesheet embedded.

mod batch;
mod json;
mod options;
mod result;
mod stylesheet;

pub use batch::{output_path, render_batch};
pub use json::{to_json, JsonFormat};
pub use options::{MarkdownMode, RenderOptions};
pub use result::{ConversionStats, RenderResult};
pub use stylesheet::STYLESHEET;

use crate::apply::{apply_bionic, apply_gradient};
use crate::convert::{ConverterRegistry, PlainTextConverter};
use crate::detect;
use crate::error::Result;
use crate::escape::escape_html;
use crate::markdown::MarkdownConverter;
use crate::model::Element;
use crate::parser::parse_fragment;
use crate::session::{CONTAINER_CLASS, CONTENT_CLASS, ENABLED_CLASS, PREVIEW_CLASS};
use once_cell::sync::Lazy;
use std::fs;
use std::path::Path;

/// Body class marking a dark-mode page.
pub const DARK_CLASS: &str = "bionic-dark";

/// Title used when the content has no heading.
pub const DEFAULT_TITLE: &str = "Untitled";

static REGISTRY: Lazy<ConverterRegistry> = Lazy::new(ConverterRegistry::with_defaults);

/// Render source text into a reader page.
///
/// With [`MarkdownMode::Auto`] the content heuristics decide.
pub fn render_document(source: &str, options: &RenderOptions) -> RenderResult {
    render_source(None, source, options)
}

/// Render source text whose file name is known.
///
/// With [`MarkdownMode::Auto`] a registered extension picks the converter;
/// anything else falls back to content detection.
pub fn render_source(name: Option<&str>, source: &str, options: &RenderOptions) -> RenderResult {
    let is_markdown = resolve_markdown(name, source, options.markdown);
    let fragment = if is_markdown {
        MarkdownConverter::with_options(options.convert).convert(source)
    } else {
        PlainTextConverter::new().convert(source)
    };
    log::debug!(
        "render: {} as {} ({} bytes)",
        name.unwrap_or("<input>"),
        if is_markdown { "markdown" } else { "text" },
        source.len()
    );
    build_document(&fragment, is_markdown, options)
}

/// Read and render a file.
pub fn render_file<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<RenderResult> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)?;
    Ok(render_source(path.to_str(), &source, options))
}

/// Read a file asynchronously and render it.
#[cfg(feature = "async")]
pub async fn render_file_async<P: AsRef<Path>>(
    path: P,
    options: &RenderOptions,
) -> Result<RenderResult> {
    let path = path.as_ref();
    let source = tokio::fs::read_to_string(path).await?;
    Ok(render_source(path.to_str(), &source, options))
}

/// Convert Markdown and count what the output contains.
pub fn to_html_with_stats(markdown: &str) -> (String, ConversionStats) {
    let html = MarkdownConverter::new().convert(markdown);
    let stats = ConversionStats::from_html(&html);
    (html, stats)
}

fn resolve_markdown(name: Option<&str>, source: &str, mode: MarkdownMode) -> bool {
    match mode {
        MarkdownMode::Always => true,
        MarkdownMode::Never => false,
        MarkdownMode::Auto => {
            let by_extension = name.and_then(|n| REGISTRY.get_for_path(Path::new(n)));
            match by_extension {
                Some(converter) => converter.name() == "markdown",
                None => detect::is_markdown(source),
            }
        }
    }
}

fn build_document(fragment: &str, is_markdown: bool, options: &RenderOptions) -> RenderResult {
    let mut article = Element::new("article").with_class(CONTENT_CLASS);
    article.children = parse_fragment(fragment);

    let stats = ConversionStats::from_element(&article);
    let title = options
        .title
        .clone()
        .or_else(|| first_heading(&article))
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    apply_bionic(&mut article, &options.bionic);
    apply_gradient(&mut article, options.theme, options.dark_mode);

    let mut body = Element::new("body").with_class(ENABLED_CLASS);
    if is_markdown {
        body.add_class(PREVIEW_CLASS);
    }
    if options.dark_mode {
        body.add_class(DARK_CLASS);
    }
    body.children
        .push(Element::new("div").with_class(CONTAINER_CLASS).with_child(article).into());

    let style = if options.include_stylesheet {
        format!("<style>\n{}</style>\n", STYLESHEET)
    } else {
        String::new()
    };

    let html = format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n{}</head>\n{}\n</html>\n",
        escape_html(&title),
        style,
        body.to_html()
    );

    RenderResult {
        html,
        title,
        is_markdown,
        stats,
    }
}

fn first_heading(root: &Element) -> Option<String> {
    root.find(&|el: &Element| matches!(el.tag.as_str(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6"))
        .map(|h| h.text_content().trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::GradientTheme;

    #[test]
    fn test_render_markdown_document() {
        let result = render_document("# Guide\n\nSome **bold** words.", &RenderOptions::new());
        assert!(result.is_markdown);
        assert_eq!(result.title, "Guide");
        assert_eq!(result.stats.headings, 1);
        assert_eq!(result.stats.paragraphs, 1);
        assert!(result.html.starts_with("<!DOCTYPE html>"));
        assert!(result.html.contains("<title>Guide</title>"));
        assert!(result.html.contains(".bionic-dim"));
        assert!(result.html.contains(r#"<b class="bionic-bold">Gu</b>"#));
        assert!(result
            .html
            .contains(r#"<body class="bionic-reading-enabled bionic-markdown-preview">"#));
    }

    #[test]
    fn test_render_plain_text() {
        let options = RenderOptions::new()
            .with_markdown_mode(MarkdownMode::Never)
            .with_title("Notes")
            .with_stylesheet(false);
        let result = render_document("# not a heading", &options);
        assert!(!result.is_markdown);
        assert_eq!(result.stats.headings, 0);
        assert_eq!(result.stats.paragraphs, 1);
        assert!(!result.html.contains("<style>"));
        assert!(result.html.contains("<title>Notes</title>"));
    }

    #[test]
    fn test_extension_decides_before_content() {
        let options = RenderOptions::new();
        assert!(!render_source(Some("notes.txt"), "# Title", &options).is_markdown);
        assert!(render_source(Some("notes.md"), "plain", &options).is_markdown);
        assert!(render_source(Some("notes"), "# Title", &options).is_markdown);
    }

    #[test]
    fn test_gradient_and_dark_mode() {
        let options = RenderOptions::new()
            .with_theme(GradientTheme::Ocean)
            .with_dark_mode(true);
        let result = render_document("# A\n\ntext", &options);
        assert!(result.html.contains("bionic-dark"));
        assert!(result.html.contains("--gradient-color: hsl(200, 80%, 75%)"));
    }

    #[test]
    fn test_to_html_with_stats() {
        let (html, stats) = to_html_with_stats("- a\n- b");
        assert_eq!(html, "<ul><li>a</li><li>b</li></ul>");
        assert_eq!(stats.lists, 1);
        assert_eq!(stats.list_items, 2);
    }

    #[test]
    fn test_render_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.markdown");
        fs::write(&path, "text only").unwrap();
        let result = render_file(&path, &RenderOptions::new()).unwrap();
        assert!(result.is_markdown);
        assert_eq!(result.title, DEFAULT_TITLE);
        assert!(render_file(dir.path().join("missing.md"), &RenderOptions::new()).is_err());
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_render_file_async() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "first\n\nsecond").unwrap();
        let result = render_file_async(&path, &RenderOptions::new()).await.unwrap();
        assert!(!result.is_markdown);
        assert_eq!(result.stats.paragraphs, 2);
    }
}
