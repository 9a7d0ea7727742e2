//! Generate the blog manifest

use anyhow::Result;
use std::fs;

use crate::manifest::Manifest;
use crate::{Dispatch, MANIFEST_FILENAME};

/// Build the manifest from the content directory and write it to the data
/// dir plus a copy to the public dir for static serving
pub fn run(dispatch: &Dispatch) -> Result<()> {
    let posts = dispatch.load_posts()?;
    tracing::info!("Found {} MDX posts", posts.len());

    let manifest = Manifest::build(&dispatch.config, &posts);

    let data_path = dispatch.manifest_path();
    manifest.save(&data_path)?;

    let public_path = dispatch.public_dir.join(MANIFEST_FILENAME);
    fs::create_dir_all(&dispatch.public_dir)?;
    fs::copy(&data_path, &public_path)?;

    println!("Manifest generated:");
    println!("  {} posts", manifest.total_posts);
    println!("  {} categories", manifest.categories.len());
    println!("  {} tags", manifest.tags.len());
    println!("  saved to {}", data_path.display());
    println!("  public copy {}", public_path.display());

    Ok(())
}
