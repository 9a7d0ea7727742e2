//! Normalized post record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use super::frontmatter::{Analytics, FrontMatter, SeoMeta};

/// Maximum slug length, matches what the upstream exports used
const MAX_SLUG_LEN: usize = 100;

/// Where a post originally came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourcePlatform {
    Ghost,
    Linkedin,
    Medium,
    Devto,
    Manual,
    #[serde(untagged)]
    Other(String),
}

impl SourcePlatform {
    pub fn as_str(&self) -> &str {
        match self {
            SourcePlatform::Ghost => "ghost",
            SourcePlatform::Linkedin => "linkedin",
            SourcePlatform::Medium => "medium",
            SourcePlatform::Devto => "devto",
            SourcePlatform::Manual => "manual",
            SourcePlatform::Other(s) => s,
        }
    }
}

impl From<&str> for SourcePlatform {
    fn from(s: &str) -> Self {
        match s {
            "ghost" => SourcePlatform::Ghost,
            "linkedin" => SourcePlatform::Linkedin,
            "medium" => SourcePlatform::Medium,
            "devto" => SourcePlatform::Devto,
            "manual" => SourcePlatform::Manual,
            other => SourcePlatform::Other(other.to_string()),
        }
    }
}

impl fmt::Display for SourcePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized blog post, the common shape every source is parsed into
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    /// Post title
    pub title: String,

    /// URL-friendly unique name, also the MDX filename stem
    pub slug: String,

    /// Publication date
    pub published_at: DateTime<Utc>,

    /// Last updated date
    pub updated_at: Option<DateTime<Utc>>,

    /// Author name
    pub author: String,

    /// Short summary used in listings and feeds
    pub excerpt: Option<String>,

    /// Category from the fixed taxonomy
    pub category: Option<String>,

    /// Post tags
    pub tags: Vec<String>,

    /// Whether the post is featured
    pub featured: bool,

    /// Origin platform
    pub source: SourcePlatform,

    /// Canonical URL on the origin platform
    pub source_url: Option<String>,

    /// Feature image URL
    pub feature_image: Option<String>,

    /// SEO metadata
    pub seo: Option<SeoMeta>,

    /// Newsletter analytics (Ghost migration only)
    pub analytics: Option<Analytics>,

    /// Markdown body
    pub body: String,

    /// Source file on disk, set when loaded from the content dir
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Custom front-matter fields carried through untouched
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl PostRecord {
    /// Create a record with the minimal required fields
    pub fn new(title: impl Into<String>, published_at: DateTime<Utc>) -> Self {
        let title = title.into();
        let slug = slugify(&title);
        Self {
            title,
            slug,
            published_at,
            updated_at: None,
            author: String::new(),
            excerpt: None,
            category: None,
            tags: Vec::new(),
            featured: false,
            source: SourcePlatform::Manual,
            source_url: None,
            feature_image: None,
            seo: None,
            analytics: None,
            body: String::new(),
            file: None,
            extra: HashMap::new(),
        }
    }

    /// Build the front-matter block for this record
    pub fn to_front_matter(&self) -> FrontMatter {
        FrontMatter {
            title: Some(self.title.clone()),
            slug: Some(self.slug.clone()),
            published_at: Some(self.published_at.to_rfc3339()),
            updated_at: self.updated_at.map(|d| d.to_rfc3339()),
            author: Some(self.author.clone()),
            excerpt: self.excerpt.clone(),
            category: self.category.clone(),
            tags: self.tags.clone(),
            featured: self.featured,
            source: Some(self.source.to_string()),
            source_url: self.source_url.clone(),
            feature_image: self.feature_image.clone(),
            seo: self.seo.clone(),
            analytics: self.analytics,
            extra: self.extra.clone(),
        }
    }
}

/// Derive a deterministic URL-friendly slug from a title.
///
/// Lowercased, everything non-alphanumeric collapsed to single hyphens,
/// trimmed, capped at 100 characters.
pub fn slugify(title: &str) -> String {
    let mut s = slug::slugify(title);
    if s.len() > MAX_SLUG_LEN {
        s.truncate(MAX_SLUG_LEN);
        while s.ends_with('-') {
            s.pop();
        }
    }
    s
}
