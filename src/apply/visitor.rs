//! Visitor over the text leaves of a node tree.
//!
//! Traversal is split in two passes: leaves are collected in document order
//! first, then edited in reverse document order so that replacing one leaf
//! with several nodes never shifts the position of a leaf still to be edited.
//!
//! # Example
//!
//! ```
//! use bionic_preview::apply::visitor::{walk_text, TextVisitor, VisitorAction};
//! use bionic_preview::model::{Element, Node};
//!
//! struct Shout;
//!
//! impl TextVisitor for Shout {
//!     fn visit_text(&mut self, text: &str) -> VisitorAction {
//!         VisitorAction::Replace(vec![Node::text(text.to_uppercase())])
//!     }
//! }
//!
//! let mut root = Element::new("div").with_text("hi");
//! assert_eq!(walk_text(&mut root, &mut Shout), 1);
//! assert_eq!(root.text_content(), "HI");
//! ```

use crate::model::{Element, Node};

/// Action returned for each visited text leaf.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum VisitorAction {
    /// Leave the leaf untouched.
    #[default]
    Continue,

    /// Replace the leaf with these nodes.
    Replace(Vec<Node>),

    /// Remove the leaf.
    Skip,
}

impl VisitorAction {
    /// Check if this action leaves the leaf in place.
    pub fn is_continue(&self) -> bool {
        matches!(self, VisitorAction::Continue)
    }
}

/// Visits text leaves, optionally pruning whole subtrees.
pub trait TextVisitor {
    /// Called before descending into an element below the root.
    ///
    /// Returning `false` skips the element and everything under it.
    fn enter_element(&mut self, element: &Element) -> bool {
        let _ = element;
        true
    }

    /// Called for every text leaf in a visited subtree, in document order.
    fn visit_text(&mut self, text: &str) -> VisitorAction {
        let _ = text;
        VisitorAction::Continue
    }
}

/// Walk the text leaves under `root` and apply the visitor's actions.
///
/// Returns the number of leaves replaced or removed.
pub fn walk_text<V: TextVisitor + ?Sized>(root: &mut Element, visitor: &mut V) -> usize {
    let mut edits = Vec::new();
    let mut path = Vec::new();
    collect(root, visitor, &mut path, &mut edits);

    let count = edits.len();
    for (path, action) in edits.into_iter().rev() {
        apply_edit(root, &path, action);
    }
    count
}

fn collect<V: TextVisitor + ?Sized>(
    element: &Element,
    visitor: &mut V,
    path: &mut Vec<usize>,
    edits: &mut Vec<(Vec<usize>, VisitorAction)>,
) {
    for (idx, child) in element.children.iter().enumerate() {
        path.push(idx);
        match child {
            Node::Element(el) => {
                if visitor.enter_element(el) {
                    collect(el, visitor, path, edits);
                }
            }
            Node::Text(text) => {
                let action = visitor.visit_text(text);
                if !action.is_continue() {
                    edits.push((path.clone(), action));
                }
            }
        }
        path.pop();
    }
}

fn apply_edit(root: &mut Element, path: &[usize], action: VisitorAction) {
    let Some((&leaf, parents)) = path.split_last() else {
        return;
    };

    let mut parent = root;
    for &idx in parents {
        match parent.children.get_mut(idx).and_then(Node::as_element_mut) {
            Some(el) => parent = el,
            None => return,
        }
    }
    if leaf >= parent.children.len() {
        return;
    }

    match action {
        VisitorAction::Continue => {}
        VisitorAction::Replace(nodes) => {
            parent.children.splice(leaf..=leaf, nodes);
        }
        VisitorAction::Skip => {
            parent.children.remove(leaf);
        }
    }
}
