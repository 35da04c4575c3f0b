//! Page-level types.

use super::{Element, Node};
use crate::detect;
use crate::parser;
use crate::theme::is_dark_background;
use serde::{Deserialize, Serialize};

/// A loaded page: its location, declared type and body tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page URL or file path
    pub url: String,

    /// Declared content type, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Computed body background color (`rgb(..)`/`rgba(..)`), if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    /// The `<body>` element
    pub body: Element,
}

impl Page {
    /// Create a page with an empty body.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content_type: None,
            background_color: None,
            body: Element::new("body"),
        }
    }

    /// Create a page from HTML markup.
    ///
    /// A full document contributes its `<body>`; a fragment becomes the body
    /// content.
    pub fn from_html(url: impl Into<String>, html: &str) -> Self {
        Self {
            body: parser::parse_document(html),
            ..Self::new(url)
        }
    }

    /// Create a page the way browsers show a raw text file: one `<pre>`.
    pub fn from_text(url: impl Into<String>, text: &str) -> Self {
        let mut page = Self::new(url);
        page.body
            .children
            .push(Element::new("pre").with_text(text).into());
        page
    }

    /// Set the declared content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the computed background color.
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Whether the page is a raw Markdown file, judged by URL and content type.
    pub fn is_markdown_file(&self) -> bool {
        detect::is_markdown_resource(&self.url, self.content_type.as_deref()).is_markdown
    }

    /// Whether the background is dark. Unknown backgrounds count as light.
    pub fn is_dark(&self) -> bool {
        self.background_color
            .as_deref()
            .is_some_and(is_dark_background)
    }

    /// Raw source text: the first `<pre>`, else the whole body.
    pub fn raw_text(&self) -> String {
        match self.body.find_tag("pre") {
            Some(pre) => pre.text_content(),
            None => self.body.text_content(),
        }
    }

    /// Replace the body content.
    pub fn set_body_content(&mut self, children: Vec<Node>) {
        self.body.children = children;
    }

    /// Serialize the body element to HTML.
    pub fn to_html(&self) -> String {
        self.body.to_html()
    }
}
