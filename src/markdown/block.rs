//! Line-oriented block stages: lists, tables and paragraph wrapping.

use once_cell::sync::Lazy;
use regex::Regex;

use super::inline::QUOTE_CONTINUATION;
use crate::escape::escape_html;

static UNORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[*\-+][ \t]+(.+)$").unwrap());
static ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.[ \t]+(.+)$").unwrap());
static TABLE_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\|[\s\-:|]+\|$").unwrap());

/// Tags the converter itself injects into inline content.
static GENERATED_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"</?(?:strong|em|del|code)>",
        r#"|<a href="[^"]*" target="_blank" rel="noopener noreferrer">|</a>"#,
        r#"|<img src="[^"]*" alt="[^"]*">"#,
    ))
    .unwrap()
});

const BLOCK_TAGS: &str =
    "h1|h2|h3|h4|h5|h6|p|ul|ol|li|pre|code|blockquote|hr|table|thead|tbody|tr|th|td|img";

static BLOCK_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)^<(?:{})[\s>]", BLOCK_TAGS)).unwrap());
static BLOCK_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)^</(?:{})>", BLOCK_TAGS)).unwrap());

/// Kind of list a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `*`, `-` or `+` bullets
    Unordered,
    /// `1.` style numbering
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

/// Classification of a single line for the block stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace-only
    Blank,
    /// List item with its content
    ListItem(ListKind, &'a str),
    /// `|---|:--|` alignment row
    TableSeparator,
    /// `| a | b |` row, holding the trimmed line
    TableRow(&'a str),
    /// Starts with an opening or closing block-level tag
    BlockTag,
    /// Anything else
    Text,
}

impl<'a> LineKind<'a> {
    /// Classify a line.
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return LineKind::Blank;
        }
        if let Some(item) = list_item(line) {
            return LineKind::ListItem(item.0, item.1);
        }
        if is_table_row(trimmed) {
            if TABLE_SEPARATOR.is_match(trimmed) {
                return LineKind::TableSeparator;
            }
            return LineKind::TableRow(trimmed);
        }
        if is_block_tag(trimmed) {
            return LineKind::BlockTag;
        }
        LineKind::Text
    }
}

fn list_item(line: &str) -> Option<(ListKind, &str)> {
    if let Some(caps) = UNORDERED_ITEM.captures(line) {
        return caps.get(1).map(|m| (ListKind::Unordered, m.as_str()));
    }
    ORDERED_ITEM
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| (ListKind::Ordered, m.as_str()))
}

fn is_table_row(trimmed: &str) -> bool {
    trimmed.len() >= 2 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

fn is_block_tag(trimmed: &str) -> bool {
    BLOCK_OPEN.is_match(trimmed) || BLOCK_CLOSE.is_match(trimmed)
}

/// Group consecutive list items into `<ul>`/`<ol>` runs.
///
/// Each run is emitted as a single line. Switching between bullet and
/// numbered items closes the current list and opens the other kind.
pub fn process_lists(html: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    let mut open: Option<(ListKind, String)> = None;

    for line in html.split('\n') {
        match list_item(line) {
            Some((kind, content)) => {
                if open.as_ref().is_some_and(|(current, _)| *current != kind) {
                    close_list(&mut open, &mut result);
                }
                let (_, buffer) =
                    open.get_or_insert_with(|| (kind, format!("<{}>", kind.tag())));
                buffer.push_str("<li>");
                buffer.push_str(content);
                buffer.push_str("</li>");
            }
            None => {
                close_list(&mut open, &mut result);
                result.push(line.to_string());
            }
        }
    }
    close_list(&mut open, &mut result);

    result.join("\n")
}

fn close_list(open: &mut Option<(ListKind, String)>, result: &mut Vec<String>) {
    if let Some((kind, mut buffer)) = open.take() {
        buffer.push_str("</");
        buffer.push_str(kind.tag());
        buffer.push('>');
        result.push(buffer);
    }
}

/// Table under construction.
struct TableBuilder {
    html: String,
    has_body: bool,
}

impl TableBuilder {
    fn with_header(cells: &[String]) -> Self {
        let mut html = String::from("<table><thead><tr>");
        for cell in cells {
            html.push_str("<th>");
            html.push_str(cell);
            html.push_str("</th>");
        }
        html.push_str("</tr></thead>");
        Self {
            html,
            has_body: false,
        }
    }

    fn push_row(&mut self, cells: &[String]) {
        if !self.has_body {
            self.html.push_str("<tbody>");
            self.has_body = true;
        }
        self.html.push_str("<tr>");
        for cell in cells {
            self.html.push_str("<td>");
            self.html.push_str(cell);
            self.html.push_str("</td>");
        }
        self.html.push_str("</tr>");
    }

    fn finish(mut self) -> String {
        if self.has_body {
            self.html.push_str("</tbody>");
        }
        self.html.push_str("</table>");
        self.html
    }
}

/// Turn runs of `| … |` rows into HTML tables.
///
/// The first row of a run is the header; separator rows are dropped wherever
/// they appear, so they never split a run. Each table is emitted as a single
/// line.
pub fn process_tables(html: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    let mut table: Option<TableBuilder> = None;

    for line in html.split('\n') {
        let trimmed = line.trim();
        if !is_table_row(trimmed) {
            if let Some(done) = table.take() {
                result.push(done.finish());
            }
            result.push(line.to_string());
            continue;
        }
        if TABLE_SEPARATOR.is_match(trimmed) {
            continue;
        }

        let cells = split_cells(trimmed);
        match table.as_mut() {
            Some(builder) => builder.push_row(&cells),
            None => table = Some(TableBuilder::with_header(&cells)),
        }
    }
    if let Some(done) = table.take() {
        result.push(done.finish());
    }

    result.join("\n")
}

fn split_cells(row: &str) -> Vec<String> {
    let inner = &row[1..row.len() - 1];
    inner.split('|').map(|cell| escape_cell(cell.trim())).collect()
}

/// Escape cell text while keeping inline tags produced by earlier stages.
pub fn escape_cell(cell: &str) -> String {
    let mut result = String::with_capacity(cell.len());
    let mut last = 0;
    for tag in GENERATED_TAG.find_iter(cell) {
        result.push_str(&escape_html(&cell[last..tag.start()]));
        result.push_str(tag.as_str());
        last = tag.end();
    }
    result.push_str(&escape_html(&cell[last..]));
    result
}

/// Wrap loose text lines in `<p>` elements.
///
/// Consecutive text lines are trimmed and joined with single spaces. Blank
/// lines end a paragraph and are dropped; block-tag lines end a paragraph and
/// are kept as-is, as are the continuation lines the blockquote stage merged
/// into a multi-line quote.
pub fn wrap_paragraphs(html: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();

    for line in html.split('\n') {
        if let Some(quoted) = line.strip_prefix(QUOTE_CONTINUATION) {
            flush_paragraph(&mut paragraph, &mut result);
            result.push(quoted.to_string());
            continue;
        }

        match LineKind::classify(line) {
            LineKind::Blank => flush_paragraph(&mut paragraph, &mut result),
            LineKind::BlockTag => {
                flush_paragraph(&mut paragraph, &mut result);
                result.push(line.to_string());
            }
            _ => paragraph.push(line.trim()),
        }
    }
    flush_paragraph(&mut paragraph, &mut result);

    result.join("\n")
}

fn flush_paragraph(paragraph: &mut Vec<&str>, result: &mut Vec<String>) {
    if paragraph.is_empty() {
        return;
    }
    let content = paragraph.join(" ");
    paragraph.clear();
    let content = content.trim();
    if !content.is_empty() {
        result.push(format!("<p>{}</p>", content));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_lines() {
        assert_eq!(LineKind::classify("   "), LineKind::Blank);
        assert_eq!(
            LineKind::classify("- item"),
            LineKind::ListItem(ListKind::Unordered, "item")
        );
        assert_eq!(
            LineKind::classify("12. twelve"),
            LineKind::ListItem(ListKind::Ordered, "twelve")
        );
        assert_eq!(LineKind::classify("|---|:-:|"), LineKind::TableSeparator);
        assert_eq!(LineKind::classify(" | a | b | "), LineKind::TableRow("| a | b |"));
        assert_eq!(LineKind::classify("<h1>x</h1>"), LineKind::BlockTag);
        assert_eq!(LineKind::classify("</UL>"), LineKind::BlockTag);
        assert_eq!(LineKind::classify("<strong>x</strong>"), LineKind::Text);
        assert_eq!(LineKind::classify("-item"), LineKind::Text);
    }

    #[test]
    fn test_lists_single_line_runs() {
        assert_eq!(process_lists("- a\n- b"), "<ul><li>a</li><li>b</li></ul>");
        assert_eq!(
            process_lists("1. one\n2. two\ntext"),
            "<ol><li>one</li><li>two</li></ol>\ntext"
        );
    }

    #[test]
    fn test_lists_switch_kind() {
        assert_eq!(
            process_lists("* a\n1. b\n+ c"),
            "<ul><li>a</li></ul>\n<ol><li>b</li></ol>\n<ul><li>c</li></ul>"
        );
    }

    #[test]
    fn test_lists_blank_line_splits_runs() {
        assert_eq!(
            process_lists("- a\n\n- b"),
            "<ul><li>a</li></ul>\n\n<ul><li>b</li></ul>"
        );
    }

    #[test]
    fn test_table_header_and_body() {
        assert_eq!(
            process_tables("| a | b |\n|---|---|\n| 1 | 2 |"),
            "<table><thead><tr><th>a</th><th>b</th></tr></thead><tbody><tr><td>1</td><td>2</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_table_header_only() {
        assert_eq!(
            process_tables("| only |\nafter"),
            "<table><thead><tr><th>only</th></tr></thead></table>\nafter"
        );
    }

    #[test]
    fn test_tables_separated_by_text() {
        let html = process_tables("| a |\n| 1 |\ntext\n| b |");
        assert_eq!(html.matches("<table>").count(), 2);
        assert_eq!(html.matches("<thead>").count(), 2);
    }

    #[test]
    fn test_escape_cell_keeps_generated_tags() {
        assert_eq!(
            escape_cell("<strong>a</strong> & <b>"),
            "<strong>a</strong> &amp; &lt;b&gt;"
        );
        assert_eq!(
            escape_cell(r#"<img src="x.png" alt="y">"#),
            r#"<img src="x.png" alt="y">"#
        );
    }

    #[test]
    fn test_wrap_paragraphs_joins_lines() {
        assert_eq!(
            wrap_paragraphs("  first line\nsecond line  \n\nnext"),
            "<p>first line second line</p>\n<p>next</p>"
        );
    }

    #[test]
    fn test_wrap_paragraphs_skips_blocks() {
        assert_eq!(
            wrap_paragraphs("<h1>T</h1>\ntext\n<hr>"),
            "<h1>T</h1>\n<p>text</p>\n<hr>"
        );
    }

    #[test]
    fn test_wrap_paragraphs_keeps_blockquote_continuations() {
        let merged = format!("<blockquote>one\n{}two</blockquote>\nafter", QUOTE_CONTINUATION);
        assert_eq!(
            wrap_paragraphs(&merged),
            "<blockquote>one\ntwo</blockquote>\n<p>after</p>"
        );
    }

    #[test]
    fn test_wrap_paragraphs_unclosed_raw_blockquote() {
        assert_eq!(
            wrap_paragraphs("<blockquote>open\nnext para\n\nmore"),
            "<blockquote>open\n<p>next para</p>\n<p>more</p>"
        );
    }
}
