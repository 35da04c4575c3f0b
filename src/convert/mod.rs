//! Source converters and an extension-keyed registry.
//!
//! A converter turns source text of one format into an HTML fragment. The
//! registry picks a converter by file extension.
//!
//! # Example
//!
//! ```no_run
//! use bionic_preview::convert::ConverterRegistry;
//! use std::path::Path;
//!
//! fn main() -> bionic_preview::Result<()> {
//!     let registry = ConverterRegistry::with_defaults();
//!     let html = registry.convert(Path::new("README.md"))?;
//!     println!("{}", html);
//!     Ok(())
//! }
//! ```

mod markdown;
mod text;

pub use text::PlainTextConverter;

use crate::error::{Error, Result};
use crate::markdown::MarkdownConverter;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// A source format that can be turned into an HTML fragment.
pub trait DocumentConverter: Send + Sync {
    /// Supported file extensions, lowercase without the leading dot.
    fn supported_extensions(&self) -> &[&str];

    /// Converter name.
    fn name(&self) -> &str;

    /// Convert source text.
    fn convert_source(&self, source: &str) -> Result<String>;

    /// Convert a file.
    fn convert_file(&self, path: &Path) -> Result<String> {
        let source = fs::read_to_string(path)?;
        self.convert_source(&source)
    }

    /// Convert raw bytes; invalid UTF-8 is replaced.
    fn convert_bytes(&self, bytes: &[u8]) -> Result<String> {
        self.convert_source(&String::from_utf8_lossy(bytes))
    }

    /// Whether this converter handles `ext` (case-insensitive).
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Maps file extensions and names to converters.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn DocumentConverter>>,
    by_name: HashMap<String, Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the Markdown and plain-text converters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(MarkdownConverter::new()));
        registry.register(Arc::new(PlainTextConverter::new()));
        registry
    }

    /// Register a converter for all its extensions.
    ///
    /// A later registration for the same extension wins.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        for ext in converter.supported_extensions() {
            self.converters.insert(ext.to_lowercase(), converter.clone());
        }
        self.by_name.insert(converter.name().to_lowercase(), converter);
    }

    /// Converter for a file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.converters.get(&ext.to_lowercase()).cloned()
    }

    /// Converter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Converter for a path, by its extension.
    pub fn get_for_path(&self, path: &Path) -> Option<Arc<dyn DocumentConverter>> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|ext| self.get_by_extension(ext))
    }

    /// Whether an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.converters.contains_key(&ext.to_lowercase())
    }

    /// All supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.converters.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Convert a file with the converter for its extension.
    pub fn convert(&self, path: &Path) -> Result<String> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::Other("File has no extension".into()))?;

        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::Other(format!("No converter for extension: {}", ext)))?;

        converter.convert_file(path)
    }

    /// Convert bytes with the converter for `ext`.
    pub fn convert_bytes(&self, bytes: &[u8], ext: &str) -> Result<String> {
        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::Other(format!("No converter for extension: {}", ext)))?;

        converter.convert_bytes(bytes)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
