//! Error types for the content pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, rendering and writing a site
#[derive(Error, Debug)]
pub enum SiteError {
    /// A record date that is not `yyyy-mm-dd`, or a date pattern chrono cannot format
    #[error("Invalid date {date:?}: {message}")]
    DateFormat { date: String, message: String },

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid source pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Invalid parameters in {path:?}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Theme folder {0:?} not found")]
    ThemeNotFound(PathBuf),

    #[error("Layout {name} not found in theme {theme:?}")]
    MissingLayout { name: String, theme: PathBuf },
}

impl SiteError {
    /// Wrap an IO error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SiteError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
