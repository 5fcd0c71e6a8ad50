//! Theme loader - reads layouts and copies theme assets
//!
//! A theme folder holds six layouts and an optional `static/` folder:
//!
//! ```text
//! themes/<name>/
//!   page.html post.html list.html item.html feed.xml item.xml
//!   static/
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Params;
use crate::error::{Result, SiteError};
use crate::render::render;

/// File names of the layouts every theme must provide
pub const LAYOUT_FILES: &[&str] = &[
    "page.html",
    "post.html",
    "list.html",
    "item.html",
    "feed.xml",
    "item.xml",
];

/// Layouts ready for the generator.
///
/// `post` and `list` are already wrapped in `page`.
#[derive(Debug, Clone)]
pub struct Layouts {
    pub page: String,
    pub post: String,
    pub list: String,
    pub item: String,
    pub feed: String,
    pub feed_item: String,
}

/// Theme loader
pub struct ThemeLoader {
    name: String,
    theme_dir: PathBuf,
}

impl ThemeLoader {
    /// Locate theme `name` under `themes_dir`
    pub fn load<P: AsRef<Path>>(themes_dir: P, name: &str) -> Result<Self> {
        let theme_dir = themes_dir.as_ref().join(name);

        if !theme_dir.is_dir() {
            return Err(SiteError::ThemeNotFound(theme_dir));
        }

        Ok(Self {
            name: name.to_string(),
            theme_dir,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn read_layout(&self, file: &str) -> Result<String> {
        let path = self.theme_dir.join(file);
        if !path.is_file() {
            return Err(SiteError::MissingLayout {
                name: file.to_string(),
                theme: self.theme_dir.clone(),
            });
        }
        fs::read_to_string(&path).map_err(|e| SiteError::io(path, e))
    }

    /// Read all six layouts and nest `post` and `list` into `page`
    pub fn layouts(&self) -> Result<Layouts> {
        let page = self.read_layout("page.html")?;
        let post = self.read_layout("post.html")?;
        let list = self.read_layout("list.html")?;

        Ok(Layouts {
            post: render(&page, &Params::new().with("content", post)),
            list: render(&page, &Params::new().with("content", list)),
            item: self.read_layout("item.html")?,
            feed: self.read_layout("feed.xml")?,
            feed_item: self.read_layout("item.xml")?,
            page,
        })
    }

    /// Copy `static/` into `<output_dir>/<theme name>/`, if the theme has one
    pub fn copy_static(&self, output_dir: &Path) -> Result<usize> {
        let static_dir = self.theme_dir.join("static");
        if !static_dir.is_dir() {
            return Ok(0);
        }
        copy_tree(&static_dir, &output_dir.join(&self.name))
    }
}

/// Recursively copy every file under `src` to the same relative path under
/// `dst`. Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            SiteError::io(path, e.into())
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(src).unwrap_or(path);
        let dest = dst.join(relative);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| SiteError::io(parent, e))?;
        }

        fs::copy(path, &dest).map_err(|e| SiteError::io(path, e))?;
        tracing::debug!("Copied: {:?} -> {:?}", path, dest);
        copied += 1;
    }

    Ok(copied)
}
