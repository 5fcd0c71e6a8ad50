//! Theme module - theme layouts, assets and the built-in default theme

mod loader;

pub use loader::{copy_tree, Layouts, ThemeLoader, LAYOUT_FILES};

/// Name the built-in theme is installed under by `init`
pub const DEFAULT_THEME_NAME: &str = "default";

/// Files of the built-in theme, relative to the theme folder
pub const DEFAULT_THEME: &[(&str, &str)] = &[
    ("page.html", include_str!("default/page.html")),
    ("post.html", include_str!("default/post.html")),
    ("list.html", include_str!("default/list.html")),
    ("item.html", include_str!("default/item.html")),
    ("feed.xml", include_str!("default/feed.xml")),
    ("item.xml", include_str!("default/item.xml")),
    ("static/css/style.css", include_str!("default/static/css/style.css")),
];
