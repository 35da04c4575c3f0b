//! Regex stages that rewrite Markdown syntax in place.
//!
//! Every stage is a `&str -> String` transform over the whole document. They
//! are applied in the order fixed by [`super::Stage`].

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::stash::CodeStash;
use crate::escape::escape_html;

static FENCED_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```(\w*)\n(.*?)```").unwrap());
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// One pattern per level, longest marker first.
static HEADERS: Lazy<Vec<(usize, Regex)>> = Lazy::new(|| {
    (1..=6)
        .rev()
        .map(|level| {
            let pattern = format!(r"(?m)^#{{{}}}[ \t]+(.+?)[ \t]*$", level);
            (level, Regex::new(&pattern).unwrap())
        })
        .collect()
});

static HORIZONTAL_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(?:---|\*\*\*|___)[ \t]*$").unwrap());

// Content must hug the markers so a `* item` bullet is never read as emphasis.
// Underscore markers additionally need a word boundary outside, which keeps
// snake_case identifiers intact.
static EMPHASIS: Lazy<Vec<(Regex, &'static str, &'static str)>> = Lazy::new(|| {
    const BODY: &str = r"(\S(?:.*?\S)?)";
    let rules = [
        (format!(r"\*\*\*{}\*\*\*", BODY), "<strong><em>", "</em></strong>"),
        (format!(r"\b___{}___\b", BODY), "<strong><em>", "</em></strong>"),
        (format!(r"\*\*{}\*\*", BODY), "<strong>", "</strong>"),
        (format!(r"\b__{}__\b", BODY), "<strong>", "</strong>"),
        (format!(r"\*{}\*", BODY), "<em>", "</em>"),
        (format!(r"\b_{}_\b", BODY), "<em>", "</em>"),
    ];
    rules
        .into_iter()
        .map(|(pattern, open, close)| (Regex::new(&pattern).unwrap(), open, close))
        .collect()
});

static STRIKETHROUGH: Lazy<Regex> = Lazy::new(|| Regex::new(r"~~(.+?)~~").unwrap());
static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static BLOCKQUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^>[ \t]+(.+)$").unwrap());

/// Fenced blocks become `<pre><code>` with trimmed, escaped, stashed content.
pub(crate) fn fenced_code(text: &str, stash: &mut CodeStash) -> String {
    FENCED_CODE
        .replace_all(text, |caps: &Captures| {
            let lang = &caps[1];
            let token = stash.stash(escape_html(caps[2].trim()));
            if lang.is_empty() {
                format!("<pre><code>{}</code></pre>", token)
            } else {
                format!(
                    "<pre><code class=\"language-{}\">{}</code></pre>",
                    lang, token
                )
            }
        })
        .into_owned()
}

pub(crate) fn inline_code(text: &str, stash: &mut CodeStash) -> String {
    INLINE_CODE
        .replace_all(text, |caps: &Captures| {
            format!("<code>{}</code>", stash.stash(escape_html(&caps[1])))
        })
        .into_owned()
}

pub(crate) fn headers(text: &str) -> String {
    let mut result = text.to_string();
    for (level, re) in HEADERS.iter() {
        let replacement = format!("<h{0}>${{1}}</h{0}>", level);
        result = re.replace_all(&result, replacement.as_str()).into_owned();
    }
    result
}

pub(crate) fn horizontal_rules(text: &str) -> String {
    HORIZONTAL_RULE.replace_all(text, "<hr>").into_owned()
}

pub(crate) fn emphasis(text: &str) -> String {
    let mut result = text.to_string();
    for (re, open, close) in EMPHASIS.iter() {
        let replacement = format!("{}${{1}}{}", open, close);
        result = re.replace_all(&result, replacement.as_str()).into_owned();
    }
    result
}

pub(crate) fn strikethrough(text: &str) -> String {
    STRIKETHROUGH.replace_all(text, "<del>${1}</del>").into_owned()
}

pub(crate) fn images(text: &str) -> String {
    IMAGE
        .replace_all(text, |caps: &Captures| {
            format!(
                "<img src=\"{}\" alt=\"{}\">",
                escape_html(&caps[2]),
                escape_html(&caps[1])
            )
        })
        .into_owned()
}

pub(crate) fn links(text: &str) -> String {
    LINK.replace_all(text, |caps: &Captures| {
        format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            escape_html(&caps[2]),
            &caps[1]
        )
    })
    .into_owned()
}

/// Prefix marking a line merged into the blockquote above it.
///
/// Paragraph wrapping strips it and keeps the line unwrapped. Input NUL is
/// replaced before conversion, so only this stage produces it.
pub(crate) const QUOTE_CONTINUATION: &str = "\0QUOTE\0";

/// Quote lines are wrapped individually, then adjacent quotes are merged.
pub(crate) fn blockquotes(text: &str) -> String {
    BLOCKQUOTE
        .replace_all(text, "<blockquote>${1}</blockquote>")
        .replace(
            "</blockquote>\n<blockquote>",
            &format!("\n{}", QUOTE_CONTINUATION),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_code_with_language() {
        let mut stash = CodeStash::new();
        let html = fenced_code("```rust\nlet x = 1 < 2;\n```", &mut stash);
        assert_eq!(
            stash.restore(&html),
            "<pre><code class=\"language-rust\">let x = 1 &lt; 2;</code></pre>"
        );
    }

    #[test]
    fn test_fenced_code_without_language() {
        let mut stash = CodeStash::new();
        let html = fenced_code("```\n  **x**  \n```", &mut stash);
        assert_eq!(stash.restore(&html), "<pre><code>**x**</code></pre>");
    }

    #[test]
    fn test_inline_code_is_stashed() {
        let mut stash = CodeStash::new();
        let html = inline_code("use `a<b>` here", &mut stash);
        assert!(!html.contains("a&lt;b&gt;"));
        assert_eq!(stash.restore(&html), "use <code>a&lt;b&gt;</code> here");
    }

    #[test]
    fn test_headers_longest_first() {
        assert_eq!(headers("### Three"), "<h3>Three</h3>");
        assert_eq!(headers("# One\n## Two"), "<h1>One</h1>\n<h2>Two</h2>");
        assert_eq!(headers("####### seven"), "####### seven");
        assert_eq!(headers("#nospace"), "#nospace");
        assert_eq!(headers("# Trailing   "), "<h1>Trailing</h1>");
    }

    #[test]
    fn test_horizontal_rules() {
        assert_eq!(horizontal_rules("a\n---\nb"), "a\n<hr>\nb");
        assert_eq!(horizontal_rules("***  "), "<hr>");
        assert_eq!(horizontal_rules("___"), "<hr>");
        assert_eq!(horizontal_rules("----"), "----");
    }

    #[test]
    fn test_emphasis_variants() {
        assert_eq!(emphasis("***both***"), "<strong><em>both</em></strong>");
        assert_eq!(emphasis("**bold**"), "<strong>bold</strong>");
        assert_eq!(emphasis("__bold__"), "<strong>bold</strong>");
        assert_eq!(emphasis("*it*"), "<em>it</em>");
        assert_eq!(emphasis("_it_"), "<em>it</em>");
    }

    #[test]
    fn test_emphasis_leaves_bullets_and_identifiers() {
        assert_eq!(emphasis("* one\n* two"), "* one\n* two");
        assert_eq!(emphasis("snake_case_name"), "snake_case_name");
        assert_eq!(emphasis("a * b * c"), "a * b * c");
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(strikethrough("~~gone~~ here"), "<del>gone</del> here");
    }

    #[test]
    fn test_image_before_link() {
        let html = links(&images("![logo](a.png) [site](https://x.io)"));
        assert_eq!(
            html,
            "<img src=\"a.png\" alt=\"logo\"> <a href=\"https://x.io\" target=\"_blank\" rel=\"noopener noreferrer\">site</a>"
        );
    }

    #[test]
    fn test_image_attributes_escaped() {
        assert_eq!(
            images("![a \"q\"](x.png?a=1&b=2)"),
            "<img src=\"x.png?a=1&amp;b=2\" alt=\"a &quot;q&quot;\">"
        );
    }

    #[test]
    fn test_blockquotes_merge() {
        assert_eq!(
            blockquotes("> one\n> two\n\n> three"),
            format!(
                "<blockquote>one\n{}two</blockquote>\n\n<blockquote>three</blockquote>",
                QUOTE_CONTINUATION
            )
        );
    }
}
