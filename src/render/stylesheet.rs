//! Reader stylesheet embedded into rendered pages.

/// CSS for bionic emphasis, gradient tints and the Markdown container.
pub const STYLESHEET: &str = r#".bionic-bold {
  font-weight: 700;
}

.bionic-dim {
  opacity: var(--bionic-dim-opacity, 0.5);
}

.gradient-text {
  color: var(--gradient-color);
}

body.bionic-markdown-preview {
  margin: 0;
  background: #ffffff;
  color: #24292f;
}

.bionic-markdown-container {
  max-width: 860px;
  margin: 0 auto;
  padding: 32px 24px;
}

.bionic-markdown-content {
  font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
  font-size: 16px;
  line-height: 1.6;
  word-wrap: break-word;
}

.bionic-markdown-content h1,
.bionic-markdown-content h2 {
  padding-bottom: 0.3em;
  border-bottom: 1px solid #d0d7de;
}

.bionic-markdown-content pre {
  padding: 16px;
  overflow: auto;
  background: #f6f8fa;
  border-radius: 6px;
}

.bionic-markdown-content code {
  font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace;
  font-size: 85%;
}

.bionic-markdown-content blockquote {
  margin: 0;
  padding: 0 1em;
  color: #57606a;
  border-left: 4px solid #d0d7de;
}

.bionic-markdown-content table {
  border-collapse: collapse;
}

.bionic-markdown-content th,
.bionic-markdown-content td {
  padding: 6px 13px;
  border: 1px solid #d0d7de;
}

.bionic-markdown-content img {
  max-width: 100%;
}

body.bionic-dark.bionic-markdown-preview {
  background: #0d1117;
  color: #c9d1d9;
}

body.bionic-dark .bionic-markdown-content pre {
  background: #161b22;
}
"#;
