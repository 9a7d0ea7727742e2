//! CLI entry point for dispatch-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dispatch-rs")]
#[command(version = "0.1.0")]
#[command(about = "Content migration and manifest toolkit for MDX blogs", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
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
    /// Migrate a Ghost CMS JSON export into MDX files
    Migrate {
        /// Path to the Ghost export JSON file
        export: PathBuf,

        /// Optional newsletter analytics CSV to merge into front-matter
        #[arg(short, long)]
        analytics: Option<PathBuf>,

        /// Show what would be written without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Only migrate the first N posts
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Import exported LinkedIn article HTML files into MDX files
    Import {
        /// Directory containing the exported article HTML files
        dir: PathBuf,

        /// Show what would be written without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Category for the post
        #[arg(short, long)]
        category: Option<String>,

        /// Tags for the post (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Mark the post as featured
        #[arg(short, long)]
        featured: bool,

        /// Source platform label
        #[arg(short, long)]
        source: Option<String>,

        /// Canonical URL of the original publication
        #[arg(long)]
        source_url: Option<String>,

        /// Read the post body from a file instead of the placeholder
        #[arg(short, long)]
        body_file: Option<PathBuf>,
    },

    /// Generate the blog manifest from the content directory
    #[command(alias = "m")]
    Manifest,

    /// Backfill stock feature images for posts that have none
    FeatureImages,

    /// Generate the RSS feed from the manifest
    Rss,

    /// Generate the XML sitemap from the manifest
    Sitemap,

    /// Fix formatting issues in migrated MDX files
    Cleanup,

    /// List site information
    List {
        /// Type of content to list (post, tag, category, source)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "dispatch_rs=debug,info"
    } else {
        "dispatch_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());
    let dispatch = dispatch_rs::Dispatch::new(&base_dir)?;

    match cli.command {
        Commands::Migrate {
            export,
            analytics,
            dry_run,
            limit,
        } => {
            tracing::info!("Migrating Ghost export {:?}", export);
            dispatch_rs::commands::migrate::run(
                &dispatch,
                &export,
                analytics.as_deref(),
                dry_run,
                limit,
            )?;
        }

        Commands::Import { dir, dry_run } => {
            tracing::info!("Importing LinkedIn articles from {:?}", dir);
            dispatch_rs::commands::import::run(&dispatch, &dir, dry_run)?;
        }

        Commands::New {
            title,
            category,
            tags,
            featured,
            source,
            source_url,
            body_file,
        } => {
            tracing::info!("Creating new post: {}", title);
            dispatch_rs::commands::new::run(
                &dispatch,
                &title,
                category.as_deref(),
                &tags,
                featured,
                source.as_deref(),
                source_url.as_deref(),
                body_file.as_deref(),
            )?;
        }

        Commands::Manifest => {
            dispatch_rs::commands::manifest::run(&dispatch)?;
        }

        Commands::FeatureImages => {
            dispatch_rs::commands::images::run(&dispatch)?;
        }

        Commands::Rss => {
            dispatch_rs::commands::feed::rss(&dispatch)?;
        }

        Commands::Sitemap => {
            dispatch_rs::commands::feed::sitemap(&dispatch)?;
        }

        Commands::Cleanup => {
            dispatch_rs::commands::cleanup::run(&dispatch)?;
        }

        Commands::List { r#type } => {
            dispatch_rs::commands::list::run(&dispatch, &r#type)?;
        }

        Commands::Version => {
            println!("dispatch-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
