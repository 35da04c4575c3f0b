//! Bionic reading segmentation.
//!
//! A word is split into a bold prefix and a dim suffix. The prefix length
//! grows with the fixation level and is always at least one character and at
//! most the whole word, so short words stay fully legible.
//!
//! # Example
//!
//! ```
//! use bionic_preview::bionic::{process_text, process_word};
//!
//! assert_eq!(
//!     process_word("hello", 3),
//!     r#"<b class="bionic-bold">he</b><span class="bionic-dim">llo</span>"#
//! );
//! assert_eq!(process_text("a  b", 3), r#"<b class="bionic-bold">a</b>  <b class="bionic-bold">b</b>"#);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;

use crate::error::{Error, Result};
use crate::escape::escape_html;

/// Class applied to the emphasized prefix of a word.
pub const BOLD_CLASS: &str = "bionic-bold";

/// Class applied to the de-emphasized suffix of a word.
pub const DIM_CLASS: &str = "bionic-dim";

/// Fixation intensity, 1 (lightest) to 5 (heaviest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct FixationLevel(u8);

impl FixationLevel {
    /// Lowest accepted level.
    pub const MIN: u8 = 1;
    /// Highest accepted level.
    pub const MAX: u8 = 5;

    /// Create a level, rejecting values outside 1..=5.
    pub fn new(level: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(Error::InvalidFixation(level))
        }
    }

    /// Create a level, clamping out-of-range values into 1..=5.
    pub fn clamped(level: u8) -> Self {
        Self(level.clamp(Self::MIN, Self::MAX))
    }

    /// Numeric value of the level.
    pub fn get(self) -> u8 {
        self.0
    }

    /// All levels in ascending order.
    pub fn all() -> impl Iterator<Item = FixationLevel> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

impl Default for FixationLevel {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for FixationLevel {
    type Error = Error;

    fn try_from(level: u8) -> Result<Self> {
        Self::new(level)
    }
}

impl From<FixationLevel> for u8 {
    fn from(level: FixationLevel) -> Self {
        level.0
    }
}

impl fmt::Display for FixationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the bold prefix length is derived from word length and level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoldFormula {
    /// `floor(len * level / 6)`, the text-vide split.
    #[default]
    TextVide,

    /// `ceil(len * level / 5)`.
    ///
    /// Bolds one or more extra characters compared to [`BoldFormula::TextVide`]
    /// for most word lengths (e.g. a 4-letter word at level 3 gets 3 bold
    /// characters instead of 2).
    Legacy,
}

impl BoldFormula {
    /// Number of characters to bold, in `[1, len]` for any non-empty word.
    pub fn bold_length(self, len: usize, level: FixationLevel) -> usize {
        if len == 0 {
            return 0;
        }
        let level = level.get() as usize;
        let raw = match self {
            BoldFormula::TextVide => len * level / 6,
            BoldFormula::Legacy => (len * level).div_ceil(5),
        };
        raw.clamp(1, len)
    }
}

/// One piece of segmented text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A whitespace run, passed through verbatim.
    Whitespace(&'a str),

    /// A token with no word characters (punctuation, symbols).
    Plain(&'a str),

    /// A word split into its emphasized prefix and remainder.
    Word {
        /// Emphasized prefix
        bold: &'a str,
        /// Remainder, possibly empty
        dim: &'a str,
    },
}

impl Segment<'_> {
    /// Append the HTML rendering of this segment to `out`.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Segment::Whitespace(ws) => out.push_str(ws),
            Segment::Plain(text) => out.push_str(&escape_html(text)),
            Segment::Word { bold, dim } => {
                out.push_str("<b class=\"");
                out.push_str(BOLD_CLASS);
                out.push_str("\">");
                out.push_str(&escape_html(bold));
                out.push_str("</b>");
                if !dim.is_empty() {
                    out.push_str("<span class=\"");
                    out.push_str(DIM_CLASS);
                    out.push_str("\">");
                    out.push_str(&escape_html(dim));
                    out.push_str("</span>");
                }
            }
        }
    }

    /// HTML rendering of this segment.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// The original text covered by this segment.
    pub fn text(&self) -> String {
        match self {
            Segment::Whitespace(s) | Segment::Plain(s) => s.to_string(),
            Segment::Word { bold, dim } => format!("{}{}", bold, dim),
        }
    }
}

/// Splits words and text into bold/dim segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BionicSegmenter {
    level: FixationLevel,
    formula: BoldFormula,
}

impl BionicSegmenter {
    /// Create a segmenter for the given level using the text-vide split.
    pub fn new(level: FixationLevel) -> Self {
        Self {
            level,
            formula: BoldFormula::default(),
        }
    }

    /// Use a different bold-length formula.
    pub fn with_formula(mut self, formula: BoldFormula) -> Self {
        self.formula = formula;
        self
    }

    /// The fixation level in use.
    pub fn level(&self) -> FixationLevel {
        self.level
    }

    /// The formula in use.
    pub fn formula(&self) -> BoldFormula {
        self.formula
    }

    /// Bold prefix length for a word of `len` characters.
    pub fn bold_length(&self, len: usize) -> usize {
        self.formula.bold_length(len, self.level)
    }

    /// Classify and split a single token.
    ///
    /// Length is counted in chars. A split that would land on a combining
    /// mark moves forward past it, so the bold part can be slightly longer.
    pub fn split_word<'a>(&self, word: &'a str) -> Segment<'a> {
        if word.is_empty() {
            return Segment::Plain(word);
        }
        if word.trim().is_empty() {
            return Segment::Whitespace(word);
        }
        if !word.chars().any(is_word_char) {
            return Segment::Plain(word);
        }

        let len = word.chars().count();
        let bold_len = self.bold_length(len);
        // Combining marks stay with their base character.
        let split = word
            .char_indices()
            .skip(bold_len)
            .find(|&(_, c)| !is_combining_mark(c))
            .map(|(idx, _)| idx)
            .unwrap_or(word.len());

        Segment::Word {
            bold: &word[..split],
            dim: &word[split..],
        }
    }

    /// Iterate over the segments of `text`, alternating whitespace runs and words.
    pub fn segments<'a>(&self, text: &'a str) -> Segments<'a> {
        Segments {
            segmenter: *self,
            rest: text,
        }
    }

    /// Render a single word as bionic HTML.
    pub fn process_word(&self, word: &str) -> String {
        match self.split_word(word) {
            Segment::Whitespace(ws) => ws.to_string(),
            segment => segment.to_html(),
        }
    }

    /// Render a run of text as bionic HTML, keeping whitespace verbatim.
    pub fn process_text(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() * 3);
        for segment in self.segments(text) {
            segment.write_html(&mut out);
        }
        out
    }
}

/// Iterator returned by [`BionicSegmenter::segments`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    segmenter: BionicSegmenter,
    rest: &'a str,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let in_whitespace = first.is_whitespace();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_whitespace() != in_whitespace)
            .map(|(idx, _)| idx)
            .unwrap_or(self.rest.len());

        let (token, rest) = self.rest.split_at(end);
        self.rest = rest;

        if in_whitespace {
            Some(Segment::Whitespace(token))
        } else {
            Some(self.segmenter.split_word(token))
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Bold prefix length for a word of `word_len` characters at `fixation_point`.
///
/// Out-of-range fixation points are clamped into 1..=5.
pub fn bold_length(word_len: usize, fixation_point: u8) -> usize {
    BoldFormula::TextVide.bold_length(word_len, FixationLevel::clamped(fixation_point))
}

/// Render a single word as bionic HTML.
///
/// Out-of-range fixation points are clamped into 1..=5.
pub fn process_word(word: &str, fixation_point: u8) -> String {
    BionicSegmenter::new(FixationLevel::clamped(fixation_point)).process_word(word)
}

/// Render text as bionic HTML, preserving whitespace runs.
///
/// Out-of-range fixation points are clamped into 1..=5.
pub fn process_text(text: &str, fixation_point: u8) -> String {
    BionicSegmenter::new(FixationLevel::clamped(fixation_point)).process_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixation_level_bounds() {
        assert!(FixationLevel::new(0).is_err());
        assert!(FixationLevel::new(6).is_err());
        assert_eq!(FixationLevel::new(1).unwrap().get(), 1);
        assert_eq!(FixationLevel::clamped(0).get(), 1);
        assert_eq!(FixationLevel::clamped(200).get(), 5);
        assert_eq!(FixationLevel::default().get(), 3);
        assert_eq!(FixationLevel::all().count(), 5);
    }

    #[test]
    fn test_fixation_level_serde() {
        let level: FixationLevel = serde_json::from_str("4").unwrap();
        assert_eq!(level.get(), 4);
        assert!(serde_json::from_str::<FixationLevel>("7").is_err());
        assert_eq!(serde_json::to_string(&level).unwrap(), "4");
    }

    #[test]
    fn test_text_vide_lengths() {
        let level = FixationLevel::new(3).unwrap();
        assert_eq!(BoldFormula::TextVide.bold_length(0, level), 0);
        assert_eq!(BoldFormula::TextVide.bold_length(1, level), 1);
        assert_eq!(BoldFormula::TextVide.bold_length(2, level), 1);
        assert_eq!(BoldFormula::TextVide.bold_length(4, level), 2);
        assert_eq!(BoldFormula::TextVide.bold_length(5, level), 2);
        assert_eq!(BoldFormula::TextVide.bold_length(12, level), 6);
    }

    #[test]
    fn test_legacy_lengths_differ() {
        let level = FixationLevel::new(3).unwrap();
        assert_eq!(BoldFormula::Legacy.bold_length(4, level), 3);
        assert_eq!(BoldFormula::Legacy.bold_length(5, level), 3);
        assert_eq!(BoldFormula::TextVide.bold_length(5, level), 2);

        let max = FixationLevel::new(5).unwrap();
        assert_eq!(BoldFormula::Legacy.bold_length(7, max), 7);
    }

    #[test]
    fn test_split_word_unicode() {
        let seg = BionicSegmenter::default().split_word("café");
        // 4 chars at level 3: floor(12/6) = 2
        assert_eq!(seg, Segment::Word { bold: "ca", dim: "fé" });

        let seg = BionicSegmenter::default().split_word("日本語です");
        assert_eq!(
            seg,
            Segment::Word {
                bold: "日本",
                dim: "語です"
            }
        );
    }

    #[test]
    fn test_split_punctuation_only() {
        let seg = BionicSegmenter::default().split_word("--");
        assert_eq!(seg, Segment::Plain("--"));
    }

    #[test]
    fn test_process_word_shapes() {
        assert_eq!(process_word("a", 3), r#"<b class="bionic-bold">a</b>"#);
        assert_eq!(
            process_word("reading", 3),
            r#"<b class="bionic-bold">rea</b><span class="bionic-dim">ding</span>"#
        );
        assert_eq!(process_word("", 3), "");
        assert_eq!(process_word("  ", 3), "  ");
        assert_eq!(process_word("&&", 3), "&amp;&amp;");
    }

    #[test]
    fn test_process_word_escapes_content() {
        let html = process_word("<b>", 3);
        assert_eq!(
            html,
            r#"<b class="bionic-bold">&lt;</b><span class="bionic-dim">b&gt;</span>"#
        );
    }

    #[test]
    fn test_segments_preserve_text() {
        let text = "  Hello,\tworld!\n\nNew line ";
        let rebuilt: String = BionicSegmenter::default()
            .segments(text)
            .map(|s| s.text())
            .collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_process_text_keeps_whitespace() {
        let html = process_text("Hi\n there", 3);
        assert_eq!(
            html,
            concat!(
                r#"<b class="bionic-bold">H</b><span class="bionic-dim">i</span>"#,
                "\n ",
                r#"<b class="bionic-bold">th</b><span class="bionic-dim">ere</span>"#
            )
        );
        assert_eq!(process_text("", 3), "");
    }
}
