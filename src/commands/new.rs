//! Create a new post

use anyhow::Result;
use chrono::Utc;
use std::fs;
use std::path::Path;

use crate::content::{MdxWriter, PostRecord, SourcePlatform, WriteOutcome};
use crate::Dispatch;

/// Create a new MDX post in the content directory
#[allow(clippy::too_many_arguments)]
pub fn run(
    dispatch: &Dispatch,
    title: &str,
    category: Option<&str>,
    tags: &[String],
    featured: bool,
    source: Option<&str>,
    source_url: Option<&str>,
    body_file: Option<&Path>,
) -> Result<()> {
    let body = match body_file {
        Some(path) => fs::read_to_string(path)?,
        None => format!(
            "## {}\n\n<!-- Write your post here -->",
            title
        ),
    };

    let mut record = PostRecord::new(title, Utc::now());
    record.author = dispatch.config.author.clone();
    record.category = category
        .map(str::to_string)
        .or_else(|| Some(dispatch.config.taxonomy.default_category.clone()));
    record.tags = tags.to_vec();
    record.featured = featured;
    record.source = source.map(SourcePlatform::from).unwrap_or(SourcePlatform::Manual);
    record.source_url = source_url.map(str::to_string);
    record.excerpt = Some(crate::markdown::excerpt(
        &body,
        dispatch.config.reading.excerpt_length,
    ));
    record.body = body;

    let writer = MdxWriter::new(&dispatch.content_dir);
    let path = dispatch.content_dir.join(format!("{}.mdx", record.slug));
    if path.exists() {
        anyhow::bail!("File already exists: {:?}", path);
    }

    match writer.write(&record)? {
        WriteOutcome::Written(path) => {
            println!("Created: {:?}", path);
            println!("  Slug: {}", record.slug);
        }
        outcome => {
            anyhow::bail!("Post not created: {:?}", outcome);
        }
    }

    Ok(())
}
