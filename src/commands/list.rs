//! List blog posts

use anyhow::Result;

use crate::content::ContentRecord;
use crate::generator::Generator;
use crate::Site;

/// Load blog posts without writing anything, newest first
pub fn load_posts(site: &Site) -> Result<Vec<ContentRecord>> {
    let generator = Generator::with_converter(Box::new(site.markdown_converter()?));
    let posts = generator
        .loader(&site.params)
        .load_all(&site.content_pattern("blog/*.md"))?;
    Ok(posts)
}

/// Print date, slug and title of every blog post
pub fn run(site: &Site) -> Result<()> {
    let posts = load_posts(site)?;

    println!("Posts ({}):", posts.len());
    for post in &posts {
        println!(
            "  {} - {} [{}]",
            post.date().format("%Y-%m-%d"),
            post.title(),
            post.slug()
        );
    }

    Ok(())
}
