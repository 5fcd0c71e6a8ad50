//! Content record model

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::config::Params;

/// One source file, ready to be rendered.
///
/// All template-visible data lives in `fields`: `date`, `slug`, every
/// header, `content`, `pretty_date` and `rfc_2822_date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRecord {
    /// Source file this record was loaded from
    source: PathBuf,

    /// Parsed value of the `date` field, used for ordering
    date: NaiveDate,

    fields: Params,
}

impl ContentRecord {
    pub(crate) fn new(source: PathBuf, date: NaiveDate, fields: Params) -> Self {
        Self {
            source,
            date,
            fields,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn fields(&self) -> &Params {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key)
    }

    pub fn slug(&self) -> &str {
        self.get("slug").unwrap_or_default()
    }

    pub fn content(&self) -> &str {
        self.get("content").unwrap_or_default()
    }

    /// Replace the body, e.g. after rendering it against site parameters
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.fields.insert("content", content);
    }

    /// The `title` header, falling back to the slug
    pub fn title(&self) -> &str {
        self.get("title").unwrap_or_else(|| self.slug())
    }
}
