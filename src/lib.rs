//! sitesmith: a small static site generator
//!
//! Content files are HTML or Markdown with `<!-- key: value -->` headers.
//! They are rendered into theme layouts through flat `{{ key }}`
//! placeholders, producing standalone pages, blog posts, a blog index and
//! an RSS feed.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod render;
pub mod theme;

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

pub use config::Params;
pub use error::SiteError;

use content::CommonMark;

/// A site rooted at a directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site parameters, the lowest layer of every render
    pub params: Params,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory
    pub content_dir: PathBuf,
    /// Static assets copied verbatim into the output
    pub static_dir: PathBuf,
    /// Folder holding one directory per theme
    pub themes_dir: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
}

impl Site {
    /// Open the site in `base_dir`, loading its parameters
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let params = Params::load(&base_dir)
            .with_context(|| format!("Failed to load parameters from {:?}", base_dir))?;
        Ok(Self::with_params(base_dir, params))
    }

    /// Open the site in `base_dir` with already-built parameters
    pub fn with_params<P: AsRef<Path>>(base_dir: P, params: Params) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let output_dir = base_dir.join(params.get("output_dir").unwrap_or("_site"));

        Self {
            content_dir: base_dir.join("content"),
            static_dir: base_dir.join("static"),
            themes_dir: base_dir.join("themes"),
            output_dir,
            params,
            base_dir,
        }
    }

    /// Theme selected by the `theme` parameter
    pub fn theme_name(&self) -> &str {
        self.params
            .get("theme")
            .unwrap_or(theme::DEFAULT_THEME_NAME)
    }

    /// Words kept in list and feed summaries (`summary_words` parameter)
    pub fn summary_words(&self) -> Result<usize> {
        match self.params.get("summary_words") {
            None => Ok(render::DEFAULT_SUMMARY_WORDS),
            Some(value) => value.trim().parse().with_context(|| {
                format!("Parameter summary_words must be a number, got {:?}", value)
            }),
        }
    }

    /// Markdown flavour selected by the `markdown` parameter.
    ///
    /// `extended` (the default) enables tables, footnotes, strikethrough and
    /// task lists; `strict` is plain CommonMark.
    pub fn markdown_converter(&self) -> Result<CommonMark> {
        match self.params.get("markdown").map(str::trim) {
            None | Some("") | Some("extended") => Ok(CommonMark::new()),
            Some("strict") => Ok(CommonMark::strict()),
            Some(other) => bail!(
                "Parameter markdown must be \"extended\" or \"strict\", got {:?}",
                other
            ),
        }
    }

    /// Refuse an output directory whose removal would delete the site root,
    /// `content/`, `static/` or `themes/`.
    ///
    /// Paths are compared after resolving `.`, `..` and symlinks, so
    /// `output_dir: ".."` is caught as well as `"."`.
    pub fn check_output_dir(&self) -> Result<()> {
        let output = resolve(&self.output_dir);
        for protected in [&self.base_dir, &self.content_dir, &self.static_dir, &self.themes_dir] {
            if resolve(protected).starts_with(&output) {
                bail!(
                    "Output directory {:?} would overwrite {:?}; change output_dir",
                    self.output_dir,
                    protected
                );
            }
        }
        Ok(())
    }

    /// Glob pattern for files under the content directory
    pub fn content_pattern(&self, pattern: &str) -> String {
        format!(
            "{}/{}",
            glob::Pattern::escape(&self.content_dir.to_string_lossy()),
            pattern
        )
    }

    /// Output directory as a destination template prefix
    pub fn output_template(&self, rest: &str) -> String {
        format!("{}/{}", self.output_dir.to_string_lossy(), rest)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<commands::generate::Summary> {
        commands::generate::run(self)
    }

    /// Clean the output directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post, or a page when `page` is set
    pub fn new_post(&self, title: &str, page: bool) -> Result<PathBuf> {
        commands::new::create(self, title, page)
    }
}

/// Lexically resolve `.` and `..` components
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Absolute form of `path`: the deepest existing ancestor is canonicalized
/// and the missing tail appended to it.
fn resolve(path: &Path) -> PathBuf {
    let path = normalize(path);
    let mut existing = path.as_path();
    let mut tail = Vec::new();

    loop {
        if let Ok(mut resolved) = fs::canonicalize(existing) {
            resolved.extend(tail.iter().rev());
            return resolved;
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name);
                existing = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
            }
            _ => {
                let mut unresolved = existing.to_path_buf();
                unresolved.extend(tail.iter().rev());
                return unresolved;
            }
        }
    }
}
