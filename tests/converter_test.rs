//! Integration tests for the Markdown converter and the converter registry.

use std::path::Path;
use std::sync::Arc;

use bionic_preview::convert::{ConverterRegistry, DocumentConverter, PlainTextConverter};
use bionic_preview::error::Result;
use bionic_preview::markdown::{ConvertOptions, MarkdownConverter, Stage};
use bionic_preview::{is_markdown, parse};

/// Mock converter for testing.
struct MockConverter {
    extensions: Vec<&'static str>,
    name: &'static str,
}

impl MockConverter {
    fn new(extensions: Vec<&'static str>, name: &'static str) -> Self {
        Self { extensions, name }
    }
}

impl DocumentConverter for MockConverter {
    fn supported_extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn name(&self) -> &str {
        self.name
    }

    fn convert_source(&self, source: &str) -> Result<String> {
        Ok(format!("Converted {} bytes by {}", source.len(), self.name))
    }
}

#[test]
fn test_parse_empty() {
    assert_eq!(parse(""), "");
}

#[test]
fn test_parse_header() {
    assert_eq!(parse("# Hello"), "<h1>Hello</h1>");
    assert_eq!(parse("###### Six"), "<h6>Six</h6>");
    assert_eq!(parse("#NoSpace"), "<p>#NoSpace</p>");
}

#[test]
fn test_parse_emphasis_paragraph() {
    assert_eq!(
        parse("**bold** and *italic*"),
        "<p><strong>bold</strong> and <em>italic</em></p>"
    );
    assert_eq!(
        parse("***both***"),
        "<p><strong><em>both</em></strong></p>"
    );
    assert_eq!(parse("~~gone~~"), "<p><del>gone</del></p>");
}

#[test]
fn test_parse_list_without_stray_paragraph() {
    assert_eq!(parse("- a\n- b"), "<ul><li>a</li><li>b</li></ul>");
    assert_eq!(parse("1. one\n2. two"), "<ol><li>one</li><li>two</li></ol>");
}

#[test]
fn test_parse_list_kind_switch() {
    assert_eq!(
        parse("- a\n1. b"),
        "<ul><li>a</li></ul>\n<ol><li>b</li></ol>"
    );
}

#[test]
fn test_parse_table() {
    assert_eq!(
        parse("| a | b |\n|---|---|\n| 1 | 2 |"),
        "<table><thead><tr><th>a</th><th>b</th></tr></thead>\
         <tbody><tr><td>1</td><td>2</td></tr></tbody></table>"
    );
}

#[test]
fn test_table_cells_escaped() {
    let html = parse("| a < b | **x** |\n|---|---|");
    assert!(html.contains("<th>a &lt; b</th>"));
    assert!(html.contains("<th><strong>x</strong></th>"));
}

#[test]
fn test_fenced_code_verbatim() {
    assert_eq!(
        parse("```\n**not bold**\n```"),
        "<pre><code>**not bold**</code></pre>"
    );
    assert_eq!(
        parse("```rust\nlet x = a < b;\n```"),
        "<pre><code class=\"language-rust\">let x = a &lt; b;</code></pre>"
    );
}

#[test]
fn test_inline_code_not_reinterpreted() {
    assert_eq!(
        parse("use `*ptr*` here"),
        "<p>use <code>*ptr*</code> here</p>"
    );
}

#[test]
fn test_links_and_images() {
    assert_eq!(
        parse("[site](https://x.io)"),
        "<p><a href=\"https://x.io\" target=\"_blank\" rel=\"noopener noreferrer\">site</a></p>"
    );
    assert_eq!(
        parse("![logo](a.png)"),
        "<img src=\"a.png\" alt=\"logo\">"
    );
}

#[test]
fn test_paragraphs_join_lines() {
    assert_eq!(
        parse("first line\nsecond line\n\nnext"),
        "<p>first line second line</p>\n<p>next</p>"
    );
}

#[test]
fn test_raw_block_tag_does_not_swallow_later_paragraphs() {
    assert_eq!(
        parse("a\n\n<blockquote>open\nnext para\n\nmore"),
        "<p>a</p>\n<blockquote>open\n<p>next para</p>\n<p>more</p>"
    );
}

#[test]
fn test_multiline_quote_then_paragraph() {
    assert_eq!(
        parse("> one\n> two\n\nafter"),
        "<blockquote>one\ntwo</blockquote>\n<p>after</p>"
    );
}

#[test]
fn test_non_ascii_passes_through() {
    assert_eq!(parse("e\u{301}"), "<p>e\u{301}</p>");
    assert_eq!(
        parse("# Über\n\nnaïve café 日本語"),
        "<h1>Über</h1>\n<p>naïve café 日本語</p>"
    );
}

#[test]
fn test_horizontal_rule() {
    assert_eq!(parse("a\n\n---\n\nb"), "<p>a</p>\n<hr>\n<p>b</p>");
}

#[test]
fn test_is_markdown_heuristics() {
    assert!(is_markdown("# Title"));
    assert!(is_markdown("some `code` here"));
    assert!(is_markdown("> quoted"));
    assert!(!is_markdown("Just some plain prose, nothing else."));
    assert!(!is_markdown(""));
}

#[test]
fn test_converter_options() {
    let converter =
        MarkdownConverter::with_options(ConvertOptions::new().with_tables(false));
    assert_eq!(converter.convert("| a |"), "<p>| a |</p>");
    assert_eq!(Stage::ALL.len(), 12);
    assert_eq!(Stage::ALL[0], Stage::FencedCode);
    assert_eq!(Stage::ALL[11], Stage::Paragraphs);
}

#[test]
fn test_converter_is_thread_safe() {
    let converter = Arc::new(MarkdownConverter::new());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let converter = Arc::clone(&converter);
            std::thread::spawn(move || converter.convert(&format!("# Title {}", i)))
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("<h1>Title {}</h1>", i));
    }
}

#[test]
fn test_converter_registry_new() {
    let registry = ConverterRegistry::new();
    assert!(!registry.supports("md"));
    assert!(registry.supported_extensions().is_empty());
}

#[test]
fn test_converter_registry_register() {
    let mut registry = ConverterRegistry::new();
    registry.register(Arc::new(MockConverter::new(vec!["rst", "rest"], "rst")));

    assert!(registry.supports("rst"));
    assert!(registry.supports("REST"));
    assert_eq!(
        registry.convert_bytes(b"abc", "rst").unwrap(),
        "Converted 3 bytes by rst"
    );
    assert!(registry.get_by_name("RST").is_some());
}

#[test]
fn test_converter_registry_override() {
    let mut registry = ConverterRegistry::with_defaults();
    registry.register(Arc::new(MockConverter::new(vec!["md"], "mock")));
    assert_eq!(registry.get_by_extension("md").unwrap().name(), "mock");
    assert_eq!(registry.get_by_extension("markdown").unwrap().name(), "markdown");
}

#[test]
fn test_converter_supports_extension() {
    let converter = MarkdownConverter::new();
    assert!(converter.supports_extension("MD"));
    assert!(converter.supports_extension("mkdn"));
    assert!(!converter.supports_extension("txt"));
    assert!(PlainTextConverter::new().supports_extension("TXT"));
}

#[test]
fn test_registry_convert_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.md");
    std::fs::write(&path, "## Sub").unwrap();

    let registry = ConverterRegistry::with_defaults();
    assert_eq!(registry.convert(&path).unwrap(), "<h2>Sub</h2>");
    assert!(registry.convert(Path::new("missing.md")).is_err());
}
