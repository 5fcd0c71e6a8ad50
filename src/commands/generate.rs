//! Generate static files

use anyhow::{Context, Result};
use std::fs;
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::theme::{copy_tree, ThemeLoader};
use crate::Site;

/// What a build produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub pages: usize,
    pub posts: usize,
    pub assets: usize,
    pub elapsed: Duration,
}

/// Build the whole site from scratch.
///
/// The output directory is deleted first, then static assets are copied
/// and pages, posts, the blog index and the RSS feed are rendered.
pub fn run(site: &Site) -> Result<Summary> {
    let start = Instant::now();
    let params = &site.params;

    let theme = ThemeLoader::load(&site.themes_dir, site.theme_name())?;
    let layouts = theme
        .layouts()
        .with_context(|| format!("Failed to load layouts of theme {:?}", theme.name()))?;

    prepare_output(site)?;

    let mut assets = 0;
    if site.static_dir.is_dir() {
        assets += copy_tree(&site.static_dir, &site.output_dir)?;
    } else {
        tracing::debug!("No static folder at {:?}", site.static_dir);
    }
    assets += theme.copy_static(&site.output_dir)?;

    let generator = Generator::with_converter(Box::new(site.markdown_converter()?))
        .summary_words(site.summary_words()?);

    // Home page and standalone pages
    let mut pages = generator.make_pages(
        &site.content_pattern("_index.html"),
        &site.output_template("index.html"),
        &layouts.page,
        params,
    )?;
    pages.extend(generator.make_pages(
        &site.content_pattern("[!_]*.html"),
        &site.output_template("{{ slug }}/index.html"),
        &layouts.page,
        params,
    )?);

    // Blog posts
    let blog_params = params.clone().with("blog", "blog");
    let posts = generator.make_pages(
        &site.content_pattern("blog/*.md"),
        &site.output_template("blog/{{ slug }}/index.html"),
        &layouts.post,
        &blog_params,
    )?;

    // Blog index and feed
    let list_params = blog_params.with("title", "Blog");
    generator.make_list(
        &posts,
        &site.output_template("blog/index.html"),
        &layouts.list,
        &layouts.item,
        &list_params,
    )?;
    generator.make_list(
        &posts,
        &site.output_template("blog/rss.xml"),
        &layouts.feed,
        &layouts.feed_item,
        &list_params,
    )?;

    let summary = Summary {
        pages: pages.len(),
        posts: posts.len(),
        assets,
        elapsed: start.elapsed(),
    };
    tracing::info!(
        "Generated {} pages and {} posts in {:.2}s",
        summary.pages,
        summary.posts,
        summary.elapsed.as_secs_f64()
    );

    Ok(summary)
}

/// Delete the previous output, refusing to touch the site's own folders
fn prepare_output(site: &Site) -> Result<()> {
    site.check_output_dir()?;

    let output = &site.output_dir;
    if output.exists() {
        fs::remove_dir_all(output).with_context(|| format!("Failed to delete {:?}", output))?;
    }
    fs::create_dir_all(output).with_context(|| format!("Failed to create {:?}", output))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Params;
    use crate::theme::DEFAULT_THEME;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, text: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    fn minimal_site(root: &Path) {
        write(root, "themes/mini/page.html", "<html>{{ title }}|{{ content }}</html>");
        write(root, "themes/mini/post.html", "<article>{{ content }}</article>");
        write(root, "themes/mini/list.html", "<ul>{{ content }}</ul>");
        write(root, "themes/mini/item.html", "<li>{{ slug }}</li>");
        write(root, "themes/mini/feed.xml", "<rss>{{ content }}</rss>");
        write(root, "themes/mini/item.xml", "<item>{{ rfc_2822_date }}</item>");
        write(root, "themes/mini/static/mini.css", "css");
        write(root, "static/robots.txt", "robots");

        write(root, "content/_index.html", "<!-- title: Home -->\nwelcome");
        write(root, "content/about.html", "<!-- title: About -->\nabout me");
        write(root, "content/_draft.html", "<!-- title: Draft -->\nnot yet");
        write(root, "content/blog/2020-05-01-one.md", "<!-- title: One -->\nfirst");
        write(root, "content/blog/2021-05-01-two.md", "<!-- title: Two -->\nsecond");
    }

    #[test]
    fn test_full_build() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        minimal_site(root);

        let site = Site::with_params(root, Params::defaults().with("theme", "mini"));
        let summary = run(&site).unwrap();
        assert_eq!(summary.pages, 2);
        assert_eq!(summary.posts, 2);
        assert_eq!(summary.assets, 2);

        let out = root.join("_site");
        assert_eq!(
            fs::read_to_string(out.join("index.html")).unwrap(),
            "<html>Home|welcome</html>"
        );
        assert_eq!(
            fs::read_to_string(out.join("about/index.html")).unwrap(),
            "<html>About|about me</html>"
        );
        assert!(!out.join("_draft").exists());
        assert_eq!(
            fs::read_to_string(out.join("blog/one/index.html")).unwrap(),
            "<html>One|<article><p>first</p>\n</article></html>"
        );
        assert_eq!(
            fs::read_to_string(out.join("blog/index.html")).unwrap(),
            "<html>Blog|<ul><li>two</li><li>one</li></ul></html>"
        );
        assert_eq!(
            fs::read_to_string(out.join("blog/rss.xml")).unwrap(),
            "<rss><item>Sat, 01 May 2021 00:00:00 +0000</item>\
             <item>Fri, 01 May 2020 00:00:00 +0000</item></rss>"
        );
        assert_eq!(fs::read_to_string(out.join("robots.txt")).unwrap(), "robots");
        assert_eq!(fs::read_to_string(out.join("mini/mini.css")).unwrap(), "css");
    }

    #[test]
    fn test_build_replaces_previous_output() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        minimal_site(root);
        write(root, "_site/stale.html", "old");

        let site = Site::with_params(root, Params::defaults().with("theme", "mini"));
        run(&site).unwrap();
        assert!(!root.join("_site/stale.html").exists());
    }

    #[test]
    fn test_build_with_default_theme() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        for (name, text) in DEFAULT_THEME {
            write(root, &format!("themes/default/{}", name), text);
        }
        write(root, "content/blog/2024-01-15-hello.md", "<!-- title: Hello -->\nHi there.");

        let site = Site::with_params(
            root,
            Params::defaults().with("site_url", "https://example.com"),
        );
        run(&site).unwrap();

        let feed = fs::read_to_string(root.join("_site/blog/rss.xml")).unwrap();
        assert!(feed.contains("<link>https://example.com/blog/hello/</link>"));
        assert!(feed.contains("<pubDate>Mon, 15 Jan 2024 00:00:00 +0000</pubDate>"));
        assert!(feed.contains("<description>Hi there.</description>"));

        let post = fs::read_to_string(root.join("_site/blog/hello/index.html")).unwrap();
        assert!(post.contains("<title>Hello - Lorem Ipsum</title>"));
        assert!(post.contains("Published on 15 Jan 2024 by Admin"));
    }

    #[test]
    fn test_missing_theme_fails() {
        let dir = TempDir::new().unwrap();
        let site = Site::with_params(dir.path(), Params::defaults().with("theme", "ghost"));
        let err = run(&site).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_output_dir_cannot_be_site_root() {
        let dir = TempDir::new().unwrap();
        minimal_site(dir.path());
        let site = Site::with_params(
            dir.path(),
            Params::defaults().with("theme", "mini").with("output_dir", "."),
        );
        assert!(run(&site).is_err());
        assert!(dir.path().join("content/about.html").exists());
    }

    #[test]
    fn test_output_dir_cannot_escape_to_parent() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("site");
        minimal_site(&root);

        for output in ["..", "content/..", "_site/../.."] {
            let site = Site::with_params(
                &root,
                Params::defaults().with("theme", "mini").with("output_dir", output),
            );
            assert!(run(&site).is_err(), "output_dir {:?} was accepted", output);
            assert!(root.join("content/about.html").exists());
            assert!(root.join("themes/mini/page.html").exists());
        }
    }

    #[test]
    fn test_strict_markdown_parameter() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        minimal_site(root);
        write(root, "content/blog/2022-01-01-table.md", "| a |\n|---|\n| b |\n");

        let site = Site::with_params(
            root,
            Params::defaults().with("theme", "mini").with("markdown", "strict"),
        );
        run(&site).unwrap();
        let post = fs::read_to_string(root.join("_site/blog/table/index.html")).unwrap();
        assert!(!post.contains("<table>"));
    }
}
