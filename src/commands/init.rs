//! Initialize a new site

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::theme::{DEFAULT_THEME, DEFAULT_THEME_NAME};

const PARAMS_JSON: &str = r#"{
    "site_title": "Lorem Ipsum",
    "subtitle": "Dolor sit amet",
    "author": "Admin",
    "site_url": "http://localhost:8000",
    "pretty_date_format": "%d %b %Y",
    "theme": "default",
    "output_dir": "_site"
}
"#;

const HOME_PAGE: &str = r#"<!-- title: Home -->
<!-- render: yes -->
<h1>{{ site_title }}</h1>
<p>{{ subtitle }}. Read the <a href="{{ base_path }}/blog/">blog</a>.</p>
"#;

const ABOUT_PAGE: &str = r#"<!-- title: About -->
<h1>About</h1>
<p>This site is built from plain files in the content folder.</p>
"#;

const FIRST_POST: &str = r#"<!-- title: Hello World -->

# Hello World

This is the first post. Files in `content/blog` become posts; the date in
the file name sets the publication date.

Run `sitesmith build` to render the site into the output folder.
"#;

/// Create the folder layout, sample content and the default theme in
/// `target_dir`. Existing files are left alone. Returns the number of
/// files written.
pub fn init_site(target_dir: &Path) -> Result<usize> {
    for dir in ["content/blog", "static"] {
        let path = target_dir.join(dir);
        fs::create_dir_all(&path).with_context(|| format!("Failed to create {:?}", path))?;
    }

    let today = chrono::Local::now().format("%Y-%m-%d");
    let mut files: Vec<(String, &str)> = vec![
        ("params.json".to_string(), PARAMS_JSON),
        ("content/_index.html".to_string(), HOME_PAGE),
        ("content/about.html".to_string(), ABOUT_PAGE),
        (format!("content/blog/{}-hello-world.md", today), FIRST_POST),
    ];
    files.extend(
        DEFAULT_THEME
            .iter()
            .map(|(name, text)| (format!("themes/{}/{}", DEFAULT_THEME_NAME, name), *text)),
    );

    let mut written = 0;
    for (relative, text) in files {
        let path = target_dir.join(&relative);
        if path.exists() {
            tracing::info!("Skipping existing {:?}", path);
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("Failed to create {:?}", parent))?;
        }
        fs::write(&path, text).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::debug!("Created {:?}", path);
        written += 1;
    }

    Ok(written)
}
