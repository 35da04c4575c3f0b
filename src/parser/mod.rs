//! Lenient HTML parsing into the [`model`](crate::model) tree.

mod html;

pub use html::{parse_document, parse_fragment, HtmlParser};
