//! Site configuration (dispatch.yml)

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub author_email: String,
    pub language: String,

    // URL
    pub url: String,
    /// URL prefix for individual posts (joined with the slug)
    pub post_path: String,

    // Directory
    pub content_dir: String,
    pub data_dir: String,
    pub public_dir: String,

    // Derived fields
    #[serde(default)]
    pub reading: ReadingConfig,

    // Feeds
    #[serde(default)]
    pub feed: FeedConfig,

    // Category & tag inference
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,

    // Feature image backfill
    #[serde(default)]
    pub images: ImageConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Signal Dispatch".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            author_email: String::new(),
            language: "en-us".to_string(),

            url: "http://example.com".to_string(),
            post_path: "blog".to_string(),

            content_dir: "content/blog".to_string(),
            data_dir: "data".to_string(),
            public_dir: "public".to_string(),

            reading: ReadingConfig::default(),
            feed: FeedConfig::default(),
            taxonomy: TaxonomyConfig::default(),
            images: ImageConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Permalink for a post slug, e.g. `https://example.com/blog/my-post`
    pub fn post_url(&self, slug: &str) -> String {
        let base = self.url.trim_end_matches('/');
        let path = self.post_path.trim_matches('/');
        if path.is_empty() {
            format!("{}/{}", base, slug)
        } else {
            format!("{}/{}/{}", base, path, slug)
        }
    }
}

/// Reading time / excerpt derivation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingConfig {
    pub words_per_minute: usize,
    pub excerpt_length: usize,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 225,
            excerpt_length: 150,
        }
    }
}

/// Feed generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Maximum number of items in the RSS feed
    pub limit: usize,
    /// Embed the full post body as content:encoded
    pub full_text: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            limit: 50,
            full_text: false,
        }
    }
}

/// Category/tag inference settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyConfig {
    /// Fallback when nothing matches
    pub default_category: String,
    /// Source tag slug -> category name (Ghost migration)
    pub category_map: HashMap<String, String>,
    /// Category name -> scoring keywords (LinkedIn import)
    pub category_keywords: HashMap<String, Vec<String>>,
    /// Known tags matched against content (LinkedIn import)
    pub tag_vocabulary: Vec<String>,
    /// Maximum number of inferred tags per post
    pub max_tags: usize,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        let category_map = [
            ("commerce", "Commerce"),
            ("commerce-drift", "Commerce"),
            ("ai", "AI & Automation"),
            ("consulting-in-practice", "Consulting"),
            ("field-notes", "Field Notes"),
            ("reflection", "Reflections"),
            ("meta-on-meta", "Meta"),
            ("leadership", "Leadership"),
            ("grid-level-thinking", "Strategy"),
            ("philosophy", "Philosophy"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let category_keywords = [
            (
                "AI & Automation",
                vec![
                    "ai",
                    "genai",
                    "llm",
                    "copilot",
                    "agent",
                    "automation",
                    "machine learning",
                ],
            ),
            (
                "Commerce",
                vec![
                    "commerce",
                    "ecommerce",
                    "storefront",
                    "shopping",
                    "retail",
                    "merchant",
                ],
            ),
            (
                "Consulting",
                vec!["consultant", "consulting", "client", "project management"],
            ),
            (
                "Leadership",
                vec!["leadership", "team", "management", "culture", "hiring"],
            ),
            (
                "Reflections",
                vec![
                    "journey",
                    "experience",
                    "learned",
                    "mistake",
                    "lesson",
                    "reflection",
                ],
            ),
            (
                "Meta",
                vec![
                    "framework",
                    "architecture",
                    "system design",
                    "infrastructure",
                    "devops",
                ],
            ),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.into_iter().map(String::from).collect()))
        .collect();

        let tag_vocabulary = [
            "ai-workflows",
            "personal-growth",
            "systems-thinking",
            "commerce-strategy",
            "consulting-practice",
            "leadership",
            "architecture",
            "devops",
            "testing",
            "ai-coding",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        Self {
            default_category: "Reflections".to_string(),
            category_map,
            category_keywords,
            tag_vocabulary,
            max_tags: 4,
        }
    }
}

/// Stock feature images used to backfill posts that have none.
/// Keyed by category, with a fallback pool for uncategorized posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub category_images: HashMap<String, Vec<String>>,
    pub default_images: Vec<String>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        let unsplash = |id: &str| format!("https://images.unsplash.com/{}?w=2000&q=80", id);

        let category_images = [
            (
                "AI & Automation",
                vec![
                    "photo-1677442136019-21780ecad995",
                    "photo-1620712943543-bcc4688e7485",
                    "photo-1635322966219-b75ed372eb01",
                    "photo-1655720033654-a4239dd42d10",
                    "photo-1531746790731-6c087fecd65a",
                ],
            ),
            (
                "Leadership",
                vec![
                    "photo-1552664730-d307ca884978",
                    "photo-1517245386807-bb43f82c33c4",
                    "photo-1454165804606-c3d57bc86b40",
                    "photo-1556761175-b413da4baf72",
                    "photo-1521791136064-7986c2920216",
                ],
            ),
            (
                "Commerce",
                vec![
                    "photo-1556742049-0cfed4f6a45d",
                    "photo-1563013544-824ae1b704d3",
                    "photo-1556740738-b6a63e27c4df",
                    "photo-1460925895917-afdab827c52f",
                    "photo-1551288049-bebda4e38f71",
                ],
            ),
            (
                "Reflections",
                vec![
                    "photo-1507003211169-0a1dd7228f2d",
                    "photo-1519834785169-98be25ec3f84",
                    "photo-1502139214982-d0ad755818d8",
                    "photo-1544027993-37dbfe43562a",
                    "photo-1542435503-956c469947f6",
                ],
            ),
            (
                "Meta",
                vec![
                    "photo-1455849318743-b2233052fcff",
                    "photo-1471107340929-a87cd0f5b5f3",
                    "photo-1501504905252-473c47e087f8",
                    "photo-1484480974693-6ca0a78fb36b",
                    "photo-1499951360447-b19be8fe80f5",
                ],
            ),
            (
                "Philosophy",
                vec![
                    "photo-1456513080510-7bf3a84b82f8",
                    "photo-1518186285589-2f7649de83e0",
                    "photo-1506905925346-21bda4d32df4",
                    "photo-1501139083538-0139583c060f",
                    "photo-1508615070457-7baeba4003ab",
                ],
            ),
            (
                "Consulting",
                vec![
                    "photo-1454165804606-c3d57bc86b40",
                    "photo-1542744173-8e7e53415bb0",
                    "photo-1553877522-43269d4ea984",
                    "photo-1557804506-669a67965ba0",
                    "photo-1519389950473-47ba0277781c",
                ],
            ),
            (
                "Field Notes",
                vec![
                    "photo-1471107340929-a87cd0f5b5f3",
                    "photo-1517842645767-c639042777db",
                    "photo-1484480974693-6ca0a78fb36b",
                    "photo-1455849318743-b2233052fcff",
                    "photo-1502139214982-d0ad755818d8",
                ],
            ),
        ]
        .into_iter()
        .map(|(k, ids)| (k.to_string(), ids.into_iter().map(|id| unsplash(id)).collect()))
        .collect();

        let default_images = [
            "photo-1488590528505-98d2b5aba04b",
            "photo-1518770660439-4636190af475",
            "photo-1451187580459-43490279c0fa",
            "photo-1526374965328-7f61d4dc18c5",
            "photo-1504868584819-f8e8b4b6d7e3",
        ]
        .into_iter()
        .map(unsplash)
        .collect();

        Self {
            category_images,
            default_images,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "content/blog");
        assert_eq!(config.reading.words_per_minute, 225);
        assert_eq!(config.feed.limit, 50);
        assert!(config.images.category_images.contains_key("Commerce"));
        assert!(!config.images.default_images.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
url: https://blog.example.org
feed:
  limit: 20
  full_text: true
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.feed.limit, 20);
        assert!(config.feed.full_text);
    }

    #[test]
    fn test_post_url() {
        let config = SiteConfig {
            url: "https://blog.example.org/".to_string(),
            post_path: "blog".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.post_url("hello-world"),
            "https://blog.example.org/blog/hello-world"
        );
    }
}
