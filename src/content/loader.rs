//! Content loader - reads MDX posts from the content directory

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, PostRecord, SourcePlatform};

/// Loads posts from a content directory
pub struct ContentLoader {
    content_dir: PathBuf,
}

impl ContentLoader {
    pub fn new<P: AsRef<Path>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
        }
    }

    /// Load all posts, newest first.
    ///
    /// Files missing a title or publication date are skipped with a warning,
    /// matching what the manifest consumers expect.
    pub fn load_posts(&self) -> Result<Vec<PostRecord>> {
        if !self.content_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.content_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_mdx_file(path) {
                match self.load_post(path) {
                    Ok(Some(post)) => posts.push(post),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?}: {}", path, e);
                    }
                }
            }
        }

        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        Ok(posts)
    }

    /// Load a single MDX file. Returns None when required fields are missing.
    fn load_post(&self, path: &Path) -> Result<Option<PostRecord>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let (fm, body) = FrontMatter::parse(&content)?;

        // The filename stem is the canonical slug
        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        let Some(title) = fm.title.clone() else {
            tracing::warn!("Skipping {}: missing title", slug);
            return Ok(None);
        };
        let Some(published_at) = fm.parse_published_at() else {
            tracing::warn!("Skipping {}: missing or invalid publishedAt", slug);
            return Ok(None);
        };

        let mut post = PostRecord::new(title, published_at);
        post.slug = slug;
        post.updated_at = fm.parse_updated_at();
        post.author = fm.author.clone().unwrap_or_default();
        post.excerpt = fm.excerpt.clone();
        post.category = fm.category.clone();
        post.tags = fm.tags.clone();
        post.featured = fm.featured;
        post.source = fm
            .source
            .as_deref()
            .map(SourcePlatform::from)
            .unwrap_or(SourcePlatform::Manual);
        post.source_url = fm.source_url.clone();
        post.feature_image = fm.feature_image.clone();
        post.seo = fm.seo.clone();
        post.analytics = fm.analytics;
        post.body = body.to_string();
        post.file = Some(path.to_path_buf());
        post.extra = fm.extra;

        Ok(Some(post))
    }
}

/// Check if a file is an MDX content file
fn is_mdx_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "mdx")
        .unwrap_or(false)
}
