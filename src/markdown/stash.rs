//! Placeholder storage for code content.
//!
//! Code spans and fenced blocks are escaped once and parked here so that no
//! later stage can rewrite them. Placeholders are swapped back in after the
//! paragraph pass.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x00CODE(\d+)\x00").unwrap());

/// Escaped code fragments keyed by insertion order.
#[derive(Debug, Default)]
pub(crate) struct CodeStash {
    fragments: Vec<String>,
}

impl CodeStash {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Store an already-escaped fragment and return its placeholder.
    pub(crate) fn stash(&mut self, escaped: String) -> String {
        let token = format!("\u{0}CODE{}\u{0}", self.fragments.len());
        self.fragments.push(escaped);
        token
    }

    pub(crate) fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Replace every placeholder in `text` with its stored fragment.
    pub(crate) fn restore(&self, text: &str) -> String {
        if self.fragments.is_empty() {
            return text.to_string();
        }
        PLACEHOLDER
            .replace_all(text, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| self.fragments.get(idx))
                    .cloned()
                    .unwrap_or_default()
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stash_and_restore() {
        let mut stash = CodeStash::new();
        let a = stash.stash("**a**".to_string());
        let b = stash.stash("&lt;b&gt;".to_string());
        assert_eq!(stash.len(), 2);

        let text = format!("x {} y {} z", a, b);
        assert_eq!(stash.restore(&text), "x **a** y &lt;b&gt; z");
    }

    #[test]
    fn test_restore_without_fragments() {
        let stash = CodeStash::new();
        assert_eq!(stash.restore("plain"), "plain");
    }
}
