//! Create a new post or page

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Create `content/blog/<today>-<slug>.md`, or `content/<slug>.html` for a page.
///
/// Refuses to overwrite an existing file. Returns the created path.
pub fn create(site: &Site, title: &str, page: bool) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        bail!("Cannot derive a file name from title {:?}", title);
    }

    let file_path = if page {
        site.content_dir.join(format!("{}.html", slug))
    } else {
        let today = chrono::Local::now().format("%Y-%m-%d");
        site.content_dir
            .join("blog")
            .join(format!("{}-{}.md", today, slug))
    };

    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    let body = if page {
        format!("<h1>{}</h1>\n", title)
    } else {
        format!("# {}\n", title)
    };
    let text = format!("<!-- title: {} -->\n\n{}", title, body);

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {:?}", parent))?;
    }
    fs::write(&file_path, text).with_context(|| format!("Failed to write {:?}", file_path))?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}
