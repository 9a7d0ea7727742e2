//! Manifest generation
//!
//! The manifest is the JSON index the UI and the feed generators read so
//! they never have to parse every MDX file. It is regenerated wholesale on
//! each build.

pub mod images;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::content::{Analytics, PostRecord};
use crate::markdown;

/// Per-post entry in the manifest, camelCase to match the consumers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub slug: String,
    pub title: String,
    pub published_at: DateTime<Utc>,
    pub excerpt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub read_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<Analytics>,
}

/// The aggregate index of all posts plus derived taxonomy counts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub posts: Vec<ManifestEntry>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub category_counts: IndexMap<String, usize>,
    pub tag_counts: IndexMap<String, usize>,
    pub total_posts: usize,
    pub last_generated: DateTime<Utc>,
}

impl Manifest {
    /// Build a manifest from loaded post records.
    /// Assumes records are already sorted newest first (the loader does).
    pub fn build(config: &SiteConfig, records: &[PostRecord]) -> Self {
        let mut entries = Vec::with_capacity(records.len());
        let mut category_counts: IndexMap<String, usize> = IndexMap::new();
        let mut tag_counts: IndexMap<String, usize> = IndexMap::new();

        for record in records {
            let read_time =
                markdown::reading_time(&record.body, config.reading.words_per_minute);
            let excerpt = record
                .excerpt
                .clone()
                .unwrap_or_else(|| markdown::excerpt(&record.body, config.reading.excerpt_length));

            if let Some(category) = &record.category {
                *category_counts.entry(category.clone()).or_insert(0) += 1;
            }
            for tag in &record.tags {
                *tag_counts.entry(tag.clone()).or_insert(0) += 1;
            }

            entries.push(ManifestEntry {
                slug: record.slug.clone(),
                title: record.title.clone(),
                published_at: record.published_at,
                excerpt,
                category: record.category.clone(),
                tags: record.tags.clone(),
                featured: record.featured,
                author: (!record.author.is_empty()).then(|| record.author.clone()),
                read_time,
                feature_image: record.feature_image.clone(),
                source: Some(record.source.to_string()),
                source_url: record.source_url.clone(),
                analytics: record.analytics,
            });
        }

        entries.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        category_counts.sort_keys();
        tag_counts.sort_keys();

        let categories: Vec<String> = category_counts.keys().cloned().collect();
        let tags: Vec<String> = tag_counts.keys().cloned().collect();

        Manifest {
            total_posts: entries.len(),
            posts: entries,
            categories,
            tags,
            category_counts,
            tag_counts,
            last_generated: Utc::now(),
        }
    }

    /// Load a manifest from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("failed to read {}", path.as_ref().display()))?;
        let manifest = serde_json::from_str(&content).context("failed to parse manifest JSON")?;
        Ok(manifest)
    }

    /// Write the manifest as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
