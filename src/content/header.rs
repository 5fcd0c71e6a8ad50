//! Comment header parsing
//!
//! A source file may start with any number of metadata lines such as
//!
//! ```text
//! <!-- title: Hello World -->
//! <!-- render: yes -->
//! ```
//!
//! The header block ends at the first line that is not a header.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::Params;

lazy_static! {
    /// Either one header (with the whitespace around it) or any other non-empty line
    static ref HEADER_OR_LINE: Regex =
        Regex::new(r"\s*<!--\s*(.+?)\s*:\s*(.+?)\s*-->\s*|.+").unwrap();
}

/// Parsed headers and the byte offset at which the body starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headers {
    pub fields: Params,
    pub end: usize,
}

impl Headers {
    /// The text following the header block
    pub fn body<'a>(&self, text: &'a str) -> &'a str {
        &text[self.end..]
    }
}

/// Read the leading header block of `text`.
///
/// Keys and values are split at the first colon and trimmed. A repeated key
/// keeps its last value.
pub fn read_headers(text: &str) -> Headers {
    let mut fields = Params::new();
    let mut end = 0;

    for caps in HEADER_OR_LINE.captures_iter(text) {
        let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) else {
            break;
        };
        fields.insert(key.as_str(), value.as_str());
        end = caps.get(0).map_or(end, |m| m.end());
    }

    Headers { fields, end }
}
