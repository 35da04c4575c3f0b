//! Lightweight Markdown to HTML conversion.
//!
//! The converter is a fixed, line-oriented regex pipeline. It is not a
//! CommonMark implementation: there are no nested lists, reference links or
//! footnotes, and inline HTML in prose passes through untouched.
//!
//! # Example
//!
//! ```
//! use bionic_preview::markdown::parse;
//!
//! assert_eq!(parse("# Hello"), "<h1>Hello</h1>");
//! assert_eq!(
//!     parse("**bold** and *italic*"),
//!     "<p><strong>bold</strong> and <em>italic</em></p>"
//! );
//! ```

mod block;
mod inline;
mod stash;

pub use block::{escape_cell, process_lists, process_tables, wrap_paragraphs, LineKind, ListKind};

use std::fmt;

use unicode_normalization::UnicodeNormalization;

use stash::CodeStash;

/// Options for Markdown conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Normalize input to Unicode NFC before conversion (off by default)
    pub normalize_unicode: bool,

    /// Convert pipe tables
    pub tables: bool,

    /// Convert `~~strikethrough~~`
    pub strikethrough: bool,
}

impl ConvertOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable NFC normalization.
    pub fn with_normalize_unicode(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Enable or disable table conversion.
    pub fn with_tables(mut self, tables: bool) -> Self {
        self.tables = tables;
        self
    }

    /// Enable or disable strikethrough conversion.
    pub fn with_strikethrough(mut self, strikethrough: bool) -> Self {
        self.strikethrough = strikethrough;
        self
    }

    fn enables(&self, stage: Stage) -> bool {
        match stage {
            Stage::Tables => self.tables,
            Stage::Strikethrough => self.strikethrough,
            _ => true,
        }
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            normalize_unicode: false,
            tables: true,
            strikethrough: true,
        }
    }
}

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    FencedCode,
    InlineCode,
    Headers,
    HorizontalRules,
    Emphasis,
    Strikethrough,
    Images,
    Links,
    Blockquotes,
    Lists,
    Tables,
    Paragraphs,
}

impl Stage {
    /// Every stage in the order the converter runs them.
    pub const ALL: [Stage; 12] = [
        Stage::FencedCode,
        Stage::InlineCode,
        Stage::Headers,
        Stage::HorizontalRules,
        Stage::Emphasis,
        Stage::Strikethrough,
        Stage::Images,
        Stage::Links,
        Stage::Blockquotes,
        Stage::Lists,
        Stage::Tables,
        Stage::Paragraphs,
    ];

    /// Short lower-case name, used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Stage::FencedCode => "fenced-code",
            Stage::InlineCode => "inline-code",
            Stage::Headers => "headers",
            Stage::HorizontalRules => "horizontal-rules",
            Stage::Emphasis => "emphasis",
            Stage::Strikethrough => "strikethrough",
            Stage::Images => "images",
            Stage::Links => "links",
            Stage::Blockquotes => "blockquotes",
            Stage::Lists => "lists",
            Stage::Tables => "tables",
            Stage::Paragraphs => "paragraphs",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Markdown to HTML converter.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownConverter {
    options: ConvertOptions,
}

impl MarkdownConverter {
    /// Create a converter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom options.
    pub fn with_options(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Get the converter options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert Markdown to an HTML fragment.
    ///
    /// Never fails; text no stage recognizes ends up in a paragraph.
    pub fn convert(&self, markdown: &str) -> String {
        if markdown.is_empty() {
            return String::new();
        }

        let mut html = self.normalize(markdown);
        let mut stash = CodeStash::new();

        for stage in Stage::ALL {
            if !self.options.enables(stage) {
                log::trace!("markdown: skipping stage {}", stage);
                continue;
            }
            html = run_stage(stage, &html, &mut stash);
            log::trace!("markdown: after {} ({} bytes)", stage, html.len());
        }

        let html = stash.restore(&html);
        log::debug!(
            "markdown: converted {} bytes into {} bytes ({} code fragments)",
            markdown.len(),
            html.len(),
            stash.len()
        );
        html
    }

    fn normalize(&self, markdown: &str) -> String {
        // NUL is reserved for code placeholders.
        let text = markdown.replace("\r\n", "\n").replace('\0', "\u{FFFD}");
        if self.options.normalize_unicode {
            text.nfc().collect()
        } else {
            text
        }
    }
}

fn run_stage(stage: Stage, html: &str, stash: &mut CodeStash) -> String {
    match stage {
        Stage::FencedCode => inline::fenced_code(html, stash),
        Stage::InlineCode => inline::inline_code(html, stash),
        Stage::Headers => inline::headers(html),
        Stage::HorizontalRules => inline::horizontal_rules(html),
        Stage::Emphasis => inline::emphasis(html),
        Stage::Strikethrough => inline::strikethrough(html),
        Stage::Images => inline::images(html),
        Stage::Links => inline::links(html),
        Stage::Blockquotes => inline::blockquotes(html),
        Stage::Lists => process_lists(html),
        Stage::Tables => process_tables(html),
        Stage::Paragraphs => wrap_paragraphs(html),
    }
}

/// Convert Markdown to HTML with default options.
pub fn parse(markdown: &str) -> String {
    MarkdownConverter::new().convert(markdown)
}
