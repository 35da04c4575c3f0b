//! # bionic-preview
//!
//! Bionic reading and Markdown preview for text documents.
//!
//! The crate converts Markdown into an HTML fragment, splits words into a
//! bold prefix and a dimmed suffix, tints block text with rotating gradient
//! palettes and renders the result into standalone reader pages.
//!
//! ## Quick Start
//!
//! ```
//! use bionic_preview::{parse, process_text};
//!
//! assert_eq!(parse("# Hello"), "<h1>Hello</h1>");
//! assert_eq!(
//!     process_text("reading", 3),
//!     r#"<b class="bionic-bold">rea</b><span class="bionic-dim">ding</span>"#
//! );
//! ```
//!
//! Rendering a whole page:
//!
//! ```no_run
//! use bionic_preview::{BionicPreview, GradientTheme};
//!
//! fn main() -> bionic_preview::Result<()> {
//!     let page = BionicPreview::new()
//!         .with_theme(GradientTheme::Ocean)
//!         .render_file("README.md")?;
//!     std::fs::write("README.html", page.html)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Markdown conversion**: headings, emphasis, code, links, images, lists,
//!   tables and blockquotes
//! - **Bionic segmentation**: Unicode-aware, five fixation levels
//! - **Page effects**: in-place bionic wrapping and gradient tints over a
//!   node tree, fully reversible
//! - **Reader sessions**: the enable/disable/update state machine with JSON
//!   messages and persisted settings
//! - **Parallel batch rendering**: uses Rayon across files

pub mod apply;
pub mod bionic;
pub mod convert;
pub mod detect;
pub mod error;
pub mod escape;
pub mod markdown;
pub mod model;
pub mod parser;
pub mod render;
pub mod session;
pub mod settings;
pub mod theme;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types
pub use apply::{apply_bionic, apply_gradient, remove_bionic, remove_gradient, BionicOptions};
pub use bionic::{process_text, process_word, BionicSegmenter, BoldFormula, FixationLevel};
pub use convert::{ConverterRegistry, DocumentConverter, PlainTextConverter};
pub use detect::{is_markdown, Detection, DetectionReason};
pub use error::{Error, Result};
pub use markdown::{parse, ConvertOptions, MarkdownConverter};
pub use model::{Element, Node, Page};
pub use render::{
    render_document, ConversionStats, JsonFormat, MarkdownMode, RenderOptions, RenderResult,
};
pub use session::{Message, PreviewSession, Response, SessionState};
pub use settings::{Settings, SettingsPatch, SettingsStore, StoredState};
pub use theme::{GradientTheme, Hsl};

use std::path::{Path, PathBuf};

/// Builder API for rendering reader pages.
///
/// # Example
///
/// ```
/// use bionic_preview::{BionicPreview, FixationLevel};
///
/// let page = BionicPreview::new()
///     .with_fixation(FixationLevel::clamped(5))
///     .with_title("Notes")
///     .render("Plain words here");
/// assert!(page.html.contains("<title>Notes</title>"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BionicPreview {
    options: RenderOptions,
}

impl BionicPreview {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from persisted settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            options: RenderOptions::from_settings(settings),
        }
    }

    /// Set the fixation level.
    pub fn with_fixation(mut self, fixation: FixationLevel) -> Self {
        self.options = self.options.with_fixation(fixation);
        self
    }

    /// Set the bold-length formula.
    pub fn with_formula(mut self, formula: BoldFormula) -> Self {
        self.options = self.options.with_formula(formula);
        self
    }

    /// Set the dim opacity.
    pub fn with_dim_opacity(mut self, opacity: f32) -> Self {
        self.options = self.options.with_dim_opacity(opacity);
        self
    }

    /// Set the gradient theme.
    pub fn with_theme(mut self, theme: GradientTheme) -> Self {
        self.options = self.options.with_theme(theme);
        self
    }

    /// Use dark-background palettes.
    pub fn dark(mut self) -> Self {
        self.options = self.options.with_dark_mode(true);
        self
    }

    /// Set Markdown handling.
    pub fn with_markdown_mode(mut self, mode: MarkdownMode) -> Self {
        self.options = self.options.with_markdown_mode(mode);
        self
    }

    /// Set the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options = self.options.with_title(title);
        self
    }

    /// Omit the embedded stylesheet.
    pub fn without_stylesheet(mut self) -> Self {
        self.options = self.options.with_stylesheet(false);
        self
    }

    /// The accumulated render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render source text.
    pub fn render(&self, source: &str) -> RenderResult {
        render::render_document(source, &self.options)
    }

    /// Read and render a file.
    pub fn render_file<P: AsRef<Path>>(&self, path: P) -> Result<RenderResult> {
        render::render_file(path, &self.options)
    }

    /// Render many files in parallel, keeping input order.
    pub fn render_batch<P>(&self, paths: &[P]) -> Vec<(PathBuf, Result<RenderResult>)>
    where
        P: AsRef<Path> + Sync,
    {
        render::render_batch(paths, &self.options)
    }
}
