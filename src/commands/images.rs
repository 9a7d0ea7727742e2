//! Backfill feature images in the manifest

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;

use crate::manifest::{images, Manifest};
use crate::{Dispatch, MANIFEST_FILENAME};

/// Assign stock feature images to manifest entries that have none and
/// rewrite both manifest copies
pub fn run(dispatch: &Dispatch) -> Result<()> {
    let data_path = dispatch.manifest_path();
    let mut manifest = Manifest::load(&data_path)
        .context("manifest not found, run `dispatch-rs manifest` first")?;

    let updated = images::backfill(&mut manifest, &dispatch.config.images);
    manifest.last_generated = Utc::now();

    manifest.save(&data_path)?;
    let public_path = dispatch.public_dir.join(MANIFEST_FILENAME);
    fs::create_dir_all(&dispatch.public_dir)?;
    fs::copy(&data_path, &public_path)?;

    let with_images = manifest
        .posts
        .iter()
        .filter(|p| p.feature_image.is_some())
        .count();

    println!("Feature images updated:");
    println!("  {} posts backfilled", updated);
    println!("  {} of {} posts have images", with_images, manifest.total_posts);
    println!("  saved to {}", data_path.display());
    println!("  public copy {}", public_path.display());

    Ok(())
}
