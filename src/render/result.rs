//! Rendering result and content statistics.

use crate::model::{Element, Node};
use crate::parser::parse_fragment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rendered reader page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// Complete HTML document
    pub html: String,

    /// Document title
    pub title: String,

    /// Whether the source was converted as Markdown
    pub is_markdown: bool,

    /// Counts taken from the converted content
    pub stats: ConversionStats,
}

impl RenderResult {
    /// Length of the HTML in bytes.
    pub fn html_len(&self) -> usize {
        self.html.len()
    }
}

/// Element counts of a converted fragment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// `h1`-`h6`
    pub headings: u32,
    pub paragraphs: u32,
    /// `ul` and `ol`
    pub lists: u32,
    pub list_items: u32,
    pub tables: u32,
    pub table_rows: u32,
    /// `pre` blocks
    pub code_blocks: u32,
    pub blockquotes: u32,
    pub images: u32,
    pub links: u32,
    /// Whitespace-separated words of visible text
    pub words: u32,
}

impl ConversionStats {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the elements of an HTML fragment.
    pub fn from_html(html: &str) -> Self {
        let mut stats = Self::new();
        for node in parse_fragment(html) {
            stats.count_node(&node);
        }
        stats
    }

    /// Count the descendants of `root` (root excluded).
    pub fn from_element(root: &Element) -> Self {
        let mut stats = Self::new();
        for child in &root.children {
            stats.count_node(child);
        }
        stats
    }

    fn count_node(&mut self, node: &Node) {
        match node {
            Node::Text(text) => self.words += text.split_whitespace().count() as u32,
            Node::Element(el) => {
                match el.tag.as_str() {
                    "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => self.headings += 1,
                    "p" => self.paragraphs += 1,
                    "ul" | "ol" => self.lists += 1,
                    "li" => self.list_items += 1,
                    "table" => self.tables += 1,
                    "tr" => self.table_rows += 1,
                    "pre" => self.code_blocks += 1,
                    "blockquote" => self.blockquotes += 1,
                    "img" => self.images += 1,
                    "a" => self.links += 1,
                    _ => {}
                }
                for child in &el.children {
                    self.count_node(child);
                }
            }
        }
    }

    /// Add another set of counts.
    pub fn merge(&mut self, other: &ConversionStats) {
        self.headings += other.headings;
        self.paragraphs += other.paragraphs;
        self.lists += other.lists;
        self.list_items += other.list_items;
        self.tables += other.tables;
        self.table_rows += other.table_rows;
        self.code_blocks += other.code_blocks;
        self.blockquotes += other.blockquotes;
        self.images += other.images;
        self.links += other.links;
        self.words += other.words;
    }
}

impl fmt::Display for ConversionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} headings, {} paragraphs, {} lists ({} items), {} tables ({} rows), \
             {} code blocks, {} blockquotes, {} images, {} links, {} words",
            self.headings,
            self.paragraphs,
            self.lists,
            self.list_items,
            self.tables,
            self.table_rows,
            self.code_blocks,
            self.blockquotes,
            self.images,
            self.links,
            self.words
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_fragment() {
        let stats = ConversionStats::from_html(
            "<h1>Title here</h1>\n<p>See <a href=\"x\">link</a></p>\n\
             <ul><li>a</li><li>b</li></ul>\n\
             <table><thead><tr><th>h</th></tr></thead><tbody><tr><td>c</td></tr></tbody></table>",
        );
        assert_eq!(stats.headings, 1);
        assert_eq!(stats.paragraphs, 1);
        assert_eq!(stats.links, 1);
        assert_eq!(stats.lists, 1);
        assert_eq!(stats.list_items, 2);
        assert_eq!(stats.tables, 1);
        assert_eq!(stats.table_rows, 2);
        // Title here / See link / a b / h c
        assert_eq!(stats.words, 8);
    }

    #[test]
    fn test_merge() {
        let mut total = ConversionStats::from_html("<p>one two</p>");
        total.merge(&ConversionStats::from_html("<p>three</p><pre>x</pre>"));
        assert_eq!(total.paragraphs, 2);
        assert_eq!(total.code_blocks, 1);
        assert_eq!(total.words, 4);
    }
}
