//! Document tree types.
//!
//! A small owned element/text tree stands in for the browser DOM. Converter
//! output is parsed into it, the bionic and gradient passes edit it in place,
//! and it serializes back to HTML.

mod node;
mod page;

pub use node::{parse_style, Element, Node, RAW_TEXT_ELEMENTS, VOID_ELEMENTS};
pub use page::Page;
