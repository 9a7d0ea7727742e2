//! Generate RSS and sitemap feeds

use anyhow::{Context, Result};
use std::fs;

use crate::feed::{RssGenerator, SitemapGenerator};
use crate::manifest::Manifest;
use crate::Dispatch;

/// Generate the RSS feed from the manifest
pub fn rss(dispatch: &Dispatch) -> Result<()> {
    let manifest = load_manifest(dispatch)?;

    // Full-text mode needs the post bodies
    let records = if dispatch.config.feed.full_text {
        dispatch.load_posts()?
    } else {
        Vec::new()
    };

    let xml = RssGenerator::new(&dispatch.config).generate(&manifest, &records)?;

    fs::create_dir_all(&dispatch.public_dir)?;
    let path = dispatch.public_dir.join("rss.xml");
    fs::write(&path, xml)?;

    println!("RSS feed generated:");
    println!(
        "  {} of {} posts included",
        manifest.posts.len().min(dispatch.config.feed.limit),
        manifest.total_posts
    );
    println!("  saved to {}", path.display());

    Ok(())
}

/// Generate the sitemap from the manifest
pub fn sitemap(dispatch: &Dispatch) -> Result<()> {
    let manifest = load_manifest(dispatch)?;
    let xml = SitemapGenerator::new(&dispatch.config).generate(&manifest)?;

    fs::create_dir_all(&dispatch.public_dir)?;
    let path = dispatch.public_dir.join("sitemap.xml");
    fs::write(&path, xml)?;

    // Homepage and blog index on top of the posts
    println!("Sitemap generated:");
    println!("  {} URLs", manifest.total_posts + 2);
    println!("  saved to {}", path.display());

    Ok(())
}

fn load_manifest(dispatch: &Dispatch) -> Result<Manifest> {
    Manifest::load(dispatch.manifest_path())
        .context("manifest not found, run `dispatch-rs manifest` first")
}
