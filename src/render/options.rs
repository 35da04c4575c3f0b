//! Document rendering options.

use crate::apply::BionicOptions;
use crate::bionic::{BoldFormula, FixationLevel};
use crate::markdown::ConvertOptions;
use crate::settings::Settings;
use crate::theme::GradientTheme;

/// When to treat the source as Markdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkdownMode {
    /// Decide by file extension, then by content heuristics
    #[default]
    Auto,
    /// Always convert as Markdown
    Always,
    /// Never convert; render as plain text
    Never,
}

/// Options for rendering a standalone reader page.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Bionic emphasis settings
    pub bionic: BionicOptions,

    /// Gradient theme
    pub theme: GradientTheme,

    /// Pick palette variants for a dark background
    pub dark_mode: bool,

    /// Markdown handling
    pub markdown: MarkdownMode,

    /// Document title; defaults to the first heading
    pub title: Option<String>,

    /// Embed the reader stylesheet
    pub include_stylesheet: bool,

    /// Markdown converter options
    pub convert: ConvertOptions,
}

impl RenderOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from persisted settings.
    ///
    /// `auto_markdown = false` maps to [`MarkdownMode::Never`].
    pub fn from_settings(settings: &Settings) -> Self {
        let markdown = if settings.auto_markdown {
            MarkdownMode::Auto
        } else {
            MarkdownMode::Never
        };
        Self::new()
            .with_fixation(settings.fixation())
            .with_dim_opacity(settings.dim_opacity)
            .with_theme(settings.theme())
            .with_markdown_mode(markdown)
    }

    /// Set the fixation level.
    pub fn with_fixation(mut self, fixation: FixationLevel) -> Self {
        self.bionic = self.bionic.with_fixation(fixation);
        self
    }

    /// Set the bold-length formula.
    pub fn with_formula(mut self, formula: BoldFormula) -> Self {
        self.bionic = self.bionic.with_formula(formula);
        self
    }

    /// Set the dim opacity (clamped into 0.0-1.0).
    pub fn with_dim_opacity(mut self, opacity: f32) -> Self {
        self.bionic = self.bionic.with_dim_opacity(opacity);
        self
    }

    /// Set the gradient theme.
    pub fn with_theme(mut self, theme: GradientTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Use dark-background palette variants.
    pub fn with_dark_mode(mut self, dark: bool) -> Self {
        self.dark_mode = dark;
        self
    }

    /// Set Markdown handling.
    pub fn with_markdown_mode(mut self, mode: MarkdownMode) -> Self {
        self.markdown = mode;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Embed or omit the stylesheet.
    pub fn with_stylesheet(mut self, include: bool) -> Self {
        self.include_stylesheet = include;
        self
    }

    /// Set the Markdown converter options.
    pub fn with_convert_options(mut self, convert: ConvertOptions) -> Self {
        self.convert = convert;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            bionic: BionicOptions::default(),
            theme: GradientTheme::None,
            dark_mode: false,
            markdown: MarkdownMode::Auto,
            title: None,
            include_stylesheet: true,
            convert: ConvertOptions::default(),
        }
    }
}
