//! Placeholder rendering
//!
//! Templates are plain strings with `{{ key }}` placeholders. There is no
//! parse tree: every call is one left-to-right scan, so a template can be
//! rendered again (for example after being nested into another layout's
//! `content`) without losing placeholders that were not resolved yet.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::config::Params;

/// Words kept by [`truncate`] unless told otherwise
pub const DEFAULT_SUMMARY_WORDS: usize = 25;

lazy_static! {
    /// `{{`, optional whitespace, a key without whitespace or `}`, optional whitespace, `}}`
    static ref PLACEHOLDER: Regex = Regex::new(r"\{\{\s*([^}\s]+)\s*\}\}").unwrap();

    /// Anything tag-like, possibly spanning lines
    static ref TAG: Regex = Regex::new(r"(?s)<.*?>").unwrap();
}

/// Replace every `{{ key }}` whose key is in `params`.
///
/// Placeholders naming an absent key are kept exactly as written.
pub fn render(template: &str, params: &Params) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match params.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Strip tag-like substrings and keep the first `words` words, joined by single spaces
pub fn truncate(text: &str, words: usize) -> String {
    TAG.replace_all(text, " ")
        .split_whitespace()
        .take(words)
        .collect::<Vec<_>>()
        .join(" ")
}
