//! Content module - header parsing, Markdown conversion and content records

mod header;
pub mod loader;
mod markdown;
mod record;

pub use header::{read_headers, Headers};
pub use loader::ContentLoader;
pub use markdown::{is_markdown_file, CommonMark, MarkdownConverter, MarkdownError};
pub use record::ContentRecord;
