//! CLI entry point for sitesmith

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sitesmith")]
#[command(version)]
#[command(about = "A small static site generator", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new site with sample content and the default theme
    Init {
        /// Directory to initialize (defaults to the site directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new blog post, or a page with --page
    New {
        /// Title of the new post
        title: String,

        /// Create a standalone page instead of a blog post
        #[arg(short, long)]
        page: bool,
    },

    /// Render the site into the output directory
    #[command(aliases = ["build", "g"])]
    Generate,

    /// Remove the output directory
    Clean,

    /// List blog posts, newest first
    List,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "sitesmith=debug,info"
    } else {
        "sitesmith=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine the current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            let written = sitesmith::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?} ({} files)", target_dir, written);
        }

        Commands::New { title, page } => {
            let site = sitesmith::Site::new(&base_dir)?;
            let path = site.new_post(&title, page)?;
            println!("Created: {:?}", path);
        }

        Commands::Generate => {
            let site = sitesmith::Site::new(&base_dir)?;
            tracing::info!("Generating static files...");
            let summary = site.generate()?;
            println!(
                "Generated {} pages and {} posts into {:?}",
                summary.pages, summary.posts, site.output_dir
            );
        }

        Commands::Clean => {
            let site = sitesmith::Site::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List => {
            let site = sitesmith::Site::new(&base_dir)?;
            sitesmith::commands::list::run(&site)?;
        }

        Commands::Version => {
            println!("sitesmith version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
