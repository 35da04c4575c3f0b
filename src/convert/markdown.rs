use super::DocumentConverter;
use crate::detect::MARKDOWN_EXTENSIONS;
use crate::error::Result;
use crate::markdown::MarkdownConverter;

impl DocumentConverter for MarkdownConverter {
    fn supported_extensions(&self) -> &[&str] {
        MARKDOWN_EXTENSIONS
    }

    fn name(&self) -> &str {
        "markdown"
    }

    fn convert_source(&self, source: &str) -> Result<String> {
        Ok(self.convert(source))
    }
}
