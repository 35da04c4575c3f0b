//! Bionic emphasis over a node tree.

use super::visitor::{walk_text, TextVisitor, VisitorAction};
use crate::bionic::{BionicSegmenter, BoldFormula, FixationLevel, Segment, BOLD_CLASS, DIM_CLASS};
use crate::error::{Error, Result};
use crate::model::{Element, Node};

/// Class of the span that replaces each processed text leaf.
pub const WRAPPER_CLASS: &str = "bionic-wrapper";

/// CSS custom property carrying the dim opacity.
pub const DIM_OPACITY_PROPERTY: &str = "--bionic-dim-opacity";

/// Elements whose text is never processed (lowercase).
pub const SKIP_TAGS: &[&str] = &[
    "script", "style", "code", "pre", "textarea", "input", "noscript", "svg", "math", "kbd",
    "samp",
];

/// Options for applying bionic emphasis to a tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BionicOptions {
    /// Fixation level
    pub fixation: FixationLevel,

    /// Bold-length formula
    pub formula: BoldFormula,

    /// Opacity of the dim suffix, 0.0-1.0
    pub dim_opacity: f32,
}

impl BionicOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fixation level.
    pub fn with_fixation(mut self, fixation: FixationLevel) -> Self {
        self.fixation = fixation;
        self
    }

    /// Set the bold-length formula.
    pub fn with_formula(mut self, formula: BoldFormula) -> Self {
        self.formula = formula;
        self
    }

    /// Set the dim opacity, clamped into 0.0-1.0.
    pub fn with_dim_opacity(mut self, opacity: f32) -> Self {
        self.dim_opacity = if opacity.is_nan() {
            0.5
        } else {
            opacity.clamp(0.0, 1.0)
        };
        self
    }

    /// Validate user-supplied values.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.dim_opacity) {
            return Err(Error::InvalidOpacity(self.dim_opacity));
        }
        Ok(())
    }

    /// The segmenter these options describe.
    pub fn segmenter(&self) -> BionicSegmenter {
        BionicSegmenter::new(self.fixation).with_formula(self.formula)
    }
}

impl Default for BionicOptions {
    fn default() -> Self {
        Self {
            fixation: FixationLevel::default(),
            formula: BoldFormula::default(),
            dim_opacity: 0.5,
        }
    }
}

struct BionicVisitor {
    segmenter: BionicSegmenter,
}

impl TextVisitor for BionicVisitor {
    fn enter_element(&mut self, element: &Element) -> bool {
        !is_skipped(element)
    }

    fn visit_text(&mut self, text: &str) -> VisitorAction {
        if text.trim().is_empty() {
            return VisitorAction::Continue;
        }
        VisitorAction::Replace(vec![Node::Element(wrap_text(&self.segmenter, text))])
    }
}

fn is_skipped(element: &Element) -> bool {
    SKIP_TAGS.contains(&element.tag.as_str())
        || element.has_class(WRAPPER_CLASS)
        || element.has_class(BOLD_CLASS)
        || element.has_class(DIM_CLASS)
}

/// Build the wrapper span for one text leaf.
///
/// Serializes to the same markup as [`BionicSegmenter::process_text`].
pub fn wrap_text(segmenter: &BionicSegmenter, text: &str) -> Element {
    let mut wrapper = Element::new("span").with_class(WRAPPER_CLASS);
    for segment in segmenter.segments(text) {
        match segment {
            Segment::Whitespace(s) | Segment::Plain(s) => wrapper.children.push(Node::text(s)),
            Segment::Word { bold, dim } => {
                wrapper
                    .children
                    .push(Element::new("b").with_class(BOLD_CLASS).with_text(bold).into());
                if !dim.is_empty() {
                    wrapper
                        .children
                        .push(Element::new("span").with_class(DIM_CLASS).with_text(dim).into());
                }
            }
        }
    }
    wrapper
}

/// Apply bionic emphasis to every eligible text leaf under `root`.
///
/// Text under skipped elements, text already inside a wrapper and
/// whitespace-only text are left alone, so applying twice is harmless.
/// Returns the number of leaves wrapped.
pub fn apply_bionic(root: &mut Element, options: &BionicOptions) -> usize {
    if SKIP_TAGS.contains(&root.tag.as_str()) {
        log::debug!("bionic: root <{}> is excluded", root.tag);
        return 0;
    }

    root.set_style_property(DIM_OPACITY_PROPERTY, options.dim_opacity.to_string());

    let mut visitor = BionicVisitor {
        segmenter: options.segmenter(),
    };
    let wrapped = walk_text(root, &mut visitor);
    log::debug!(
        "bionic: wrapped {} text nodes at fixation {}",
        wrapped,
        options.fixation
    );
    wrapped
}

/// Undo [`apply_bionic`]: every wrapper becomes plain text again.
///
/// Returns the number of wrappers removed.
pub fn remove_bionic(root: &mut Element) -> usize {
    let removed = unwrap_children(root);
    root.remove_style_property(DIM_OPACITY_PROPERTY);
    log::debug!("bionic: removed {} wrappers", removed);
    removed
}

fn unwrap_children(element: &mut Element) -> usize {
    let mut removed = 0;
    let children = std::mem::take(&mut element.children);
    for child in children {
        match child {
            Node::Element(el) if el.has_class(WRAPPER_CLASS) => {
                removed += 1;
                push_text(&mut element.children, el.text_content());
            }
            Node::Element(mut el) => {
                removed += unwrap_children(&mut el);
                element.children.push(Node::Element(el));
            }
            Node::Text(text) => push_text(&mut element.children, text),
        }
    }
    removed
}

/// Append text, merging with a preceding text node.
fn push_text(children: &mut Vec<Node>, text: String) {
    if let Some(Node::Text(prev)) = children.last_mut() {
        prev.push_str(&text);
    } else {
        children.push(Node::Text(text));
    }
}
