//! Markdown to HTML conversion

use pulldown_cmark::{html, Options, Parser};
use std::path::Path;
use thiserror::Error;

/// File extensions treated as Markdown sources
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "mkd", "mkdn", "mdown", "markdown"];

/// A failed Markdown conversion. Never fatal to a build.
#[derive(Error, Debug)]
#[error("Cannot render Markdown: {0}")]
pub struct MarkdownError(pub String);

/// Converts a Markdown body to HTML
pub trait MarkdownConverter {
    fn convert(&self, markdown: &str) -> Result<String, MarkdownError>;
}

/// CommonMark renderer backed by pulldown-cmark
#[derive(Debug, Clone)]
pub struct CommonMark {
    options: Options,
}

impl CommonMark {
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS,
        }
    }

    /// Plain CommonMark without extensions
    pub fn strict() -> Self {
        Self {
            options: Options::empty(),
        }
    }
}

impl Default for CommonMark {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownConverter for CommonMark {
    fn convert(&self, markdown: &str) -> Result<String, MarkdownError> {
        let parser = Parser::new_ext(markdown, self.options);
        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, parser);
        Ok(html_output)
    }
}

/// Check if a file is a markdown file
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| MARKDOWN_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}
