//! Lenient HTML parser.
//!
//! Handles converter output and simple real-world pages. It never fails:
//! comments and doctypes are dropped, stray closing tags are ignored, and a
//! closing tag pops every element opened after its match.

use crate::escape::decode_entities;
use crate::model::{Element, Node, RAW_TEXT_ELEMENTS};

/// Elements that implicitly close an open sibling of the same kind.
const SELF_NESTING_CLOSERS: &[&str] = &["p", "li", "tr", "td", "th", "dt", "dd", "option"];

/// HTML parser over a borrowed input string.
pub struct HtmlParser<'a> {
    input: &'a str,
    pos: usize,
    stack: Vec<Element>,
}

impl<'a> HtmlParser<'a> {
    /// Create a parser for the given markup.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            stack: vec![Element::new("#root")],
        }
    }

    /// Parse the input into a list of top-level nodes.
    pub fn parse(mut self) -> Vec<Node> {
        while self.pos < self.input.len() {
            let rest = self.rest();
            match rest.find('<') {
                Some(0) => self.parse_markup(),
                Some(idx) => {
                    self.push_text(decode_entities(&rest[..idx]));
                    self.pos += idx;
                }
                None => {
                    self.push_text(decode_entities(rest));
                    self.pos = self.input.len();
                }
            }
        }

        while self.stack.len() > 1 {
            self.pop();
        }
        self.stack.pop().map(|root| root.children).unwrap_or_default()
    }

    fn parse_markup(&mut self) {
        let rest = self.rest();

        if rest.starts_with("<!--") {
            self.pos += rest.find("-->").map(|end| end + 3).unwrap_or(rest.len());
            return;
        }
        if rest.starts_with("<!") || rest.starts_with("<?") {
            self.pos += rest.find('>').map(|end| end + 1).unwrap_or(rest.len());
            return;
        }
        if let Some(after) = rest.strip_prefix("</") {
            let name_len = tag_name_len(after);
            let end = rest.find('>').map(|end| end + 1).unwrap_or(rest.len());
            if name_len > 0 {
                let name = after[..name_len].to_ascii_lowercase();
                self.close(&name);
            }
            self.pos += end;
            return;
        }

        let name_len = tag_name_len(&rest[1..]);
        if name_len == 0 {
            // A bare '<' is text.
            self.push_text("<".to_string());
            self.pos += 1;
            return;
        }

        let mut element = Element::new(&rest[1..1 + name_len]);
        self.pos += 1 + name_len;
        let self_closing = self.parse_attributes(&mut element);

        if SELF_NESTING_CLOSERS.contains(&element.tag.as_str()) {
            let same = self
                .stack
                .last()
                .is_some_and(|top| top.tag == element.tag || is_cell_pair(&top.tag, &element.tag));
            if same {
                self.pop();
            }
        }

        if element.is_void() || self_closing {
            self.append(Node::Element(element));
        } else if RAW_TEXT_ELEMENTS.contains(&element.tag.as_str()) {
            let text = self.take_raw_text(&element.tag);
            if !text.is_empty() {
                element.children.push(Node::Text(text));
            }
            self.append(Node::Element(element));
        } else {
            self.stack.push(element);
        }
    }

    /// Parse attributes up to and including `>`. Returns true for `/>`.
    fn parse_attributes(&mut self, element: &mut Element) -> bool {
        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.is_empty() {
                return false;
            }
            if rest.starts_with("/>") {
                self.pos += 2;
                return true;
            }
            if rest.starts_with('>') {
                self.pos += 1;
                return false;
            }

            let name_end = rest
                .find(|c: char| c.is_whitespace() || c == '=' || c == '>' || c == '/')
                .unwrap_or(rest.len());
            if name_end == 0 {
                // Stray '/' or '=' inside a tag.
                self.pos += 1;
                continue;
            }
            let name = rest[..name_end].to_ascii_lowercase();
            self.pos += name_end;

            self.skip_whitespace();
            let value = if self.rest().starts_with('=') {
                self.pos += 1;
                self.skip_whitespace();
                self.parse_attribute_value()
            } else {
                String::new()
            };
            element.set_attr(&name, value);
        }
    }

    fn parse_attribute_value(&mut self) -> String {
        let rest = self.rest();
        let quote = match rest.chars().next() {
            Some(q @ ('"' | '\'')) => q,
            _ => {
                let end = rest
                    .find(|c: char| c.is_whitespace() || c == '>')
                    .unwrap_or(rest.len());
                self.pos += end;
                return decode_entities(&rest[..end]);
            }
        };

        let body = &rest[1..];
        match body.find(quote) {
            Some(end) => {
                self.pos += end + 2;
                decode_entities(&body[..end])
            }
            None => {
                self.pos = self.input.len();
                decode_entities(body)
            }
        }
    }

    fn take_raw_text(&mut self, tag: &str) -> String {
        let rest = self.rest();
        let closing = format!("</{}", tag);
        let lower = rest.to_ascii_lowercase();
        match lower.find(&closing) {
            Some(idx) => {
                let text = rest[..idx].to_string();
                let after = &rest[idx..];
                self.pos += idx + after.find('>').map(|e| e + 1).unwrap_or(after.len());
                text
            }
            None => {
                self.pos = self.input.len();
                rest.to_string()
            }
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn push_text(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        if let Some(top) = self.stack.last_mut() {
            if let Some(Node::Text(prev)) = top.children.last_mut() {
                prev.push_str(&text);
                return;
            }
            top.children.push(Node::Text(text));
        }
    }

    fn append(&mut self, node: Node) {
        if let Some(top) = self.stack.last_mut() {
            top.children.push(node);
        }
    }

    fn pop(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        if let Some(done) = self.stack.pop() {
            self.append(Node::Element(done));
        }
    }

    fn close(&mut self, tag: &str) {
        let Some(idx) = self.stack.iter().rposition(|el| el.tag == tag) else {
            log::trace!("html: ignoring stray </{}>", tag);
            return;
        };
        if idx == 0 {
            return;
        }
        while self.stack.len() > idx {
            self.pop();
        }
    }
}

fn tag_name_len(text: &str) -> usize {
    let mut chars = text.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() => {}
        _ => return 0,
    }
    text.find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(text.len())
}

fn is_cell_pair(open: &str, new: &str) -> bool {
    matches!((open, new), ("td", "th") | ("th", "td") | ("dt", "dd") | ("dd", "dt"))
}

/// Parse an HTML fragment into nodes.
///
/// # Example
///
/// ```
/// use bionic_preview::parser::parse_fragment;
///
/// let nodes = parse_fragment("<p>a &amp; <b>b</b></p>");
/// assert_eq!(nodes.len(), 1);
/// assert_eq!(nodes[0].text_content(), "a & b");
/// ```
pub fn parse_fragment(html: &str) -> Vec<Node> {
    HtmlParser::new(html).parse()
}

/// Parse a document and return its `<body>`.
///
/// Without an explicit body, all top-level content except `<head>` becomes
/// the body content.
pub fn parse_document(html: &str) -> Element {
    let nodes = parse_fragment(html);

    let found = nodes.iter().find_map(|node| {
        node.as_element()
            .and_then(|el| el.find_tag("body"))
            .cloned()
    });
    if let Some(body) = found {
        return body;
    }

    let mut body = Element::new("body");
    for node in nodes {
        match node {
            Node::Element(el) if el.is("html") => {
                body.children
                    .extend(el.children.into_iter().filter(|n| !is_head(n)));
            }
            node if is_head(&node) => {}
            node => body.children.push(node),
        }
    }
    body
}

fn is_head(node: &Node) -> bool {
    node.as_element().is_some_and(|el| el.is("head"))
}
