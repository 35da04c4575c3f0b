//! In-place text effects over a node tree.
//!
//! - [`apply_bionic`] / [`remove_bionic`] wrap text leaves in bold/dim markup.
//! - [`apply_gradient`] / [`remove_gradient`] tint block elements.

mod bionic;
mod gradient;
pub mod visitor;

pub use bionic::{
    apply_bionic, remove_bionic, wrap_text, BionicOptions, DIM_OPACITY_PROPERTY, SKIP_TAGS,
    WRAPPER_CLASS,
};
pub use gradient::{
    apply_gradient, apply_gradient_named, remove_gradient, GRADIENT_CLASS,
    GRADIENT_COLOR_PROPERTY, GRADIENT_TARGETS,
};
pub use visitor::{walk_text, TextVisitor, VisitorAction};
