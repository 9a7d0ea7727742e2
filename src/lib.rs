//! dispatch-rs: content migration and manifest toolkit for MDX blogs
//!
//! This crate normalizes blog content from heterogeneous sources (Ghost CMS
//! exports, LinkedIn article exports, hand-authored MDX) into MDX files with
//! YAML front-matter, and generates the JSON manifest and RSS/sitemap feeds
//! the site serves.

pub mod cleanup;
pub mod commands;
pub mod config;
pub mod content;
pub mod feed;
pub mod manifest;
pub mod markdown;
pub mod migrate;
pub mod taxonomy;

use anyhow::Result;
use std::path::Path;

/// Name of the manifest file in both the data and public directories
pub const MANIFEST_FILENAME: &str = "blog-manifest.json";

/// The main application context
#[derive(Clone)]
pub struct Dispatch {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// MDX content directory
    pub content_dir: std::path::PathBuf,
    /// Generated data directory (manifest)
    pub data_dir: std::path::PathBuf,
    /// Public directory (feeds, public manifest copy)
    pub public_dir: std::path::PathBuf,
}

impl Dispatch {
    /// Create a new instance from a base directory, reading `dispatch.yml`
    /// when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("dispatch.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let data_dir = base_dir.join(&config.data_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            data_dir,
            public_dir,
        })
    }

    /// Load all posts from the content directory
    pub fn load_posts(&self) -> Result<Vec<content::PostRecord>> {
        content::loader::ContentLoader::new(&self.content_dir).load_posts()
    }

    /// Path of the manifest in the data directory
    pub fn manifest_path(&self) -> std::path::PathBuf {
        self.data_dir.join(MANIFEST_FILENAME)
    }
}
