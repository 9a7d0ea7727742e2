//! Ghost CMS export importer
//!
//! A Ghost export is one JSON file holding relational tables under
//! `db[0].data`: posts, tags, users, and the posts_tags / posts_authors
//! join tables. Newsletter analytics arrive separately as a CSV keyed by
//! post id.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::MigrateError;
use crate::config::SiteConfig;
use crate::content::{parse_date_string, slugify, Analytics, PostRecord, SeoMeta, SourcePlatform};
use crate::markdown::html_to_markdown;
use crate::taxonomy::category_from_tags;

#[derive(Debug, Deserialize)]
struct GhostExport {
    #[serde(default)]
    db: Vec<GhostDb>,
}

#[derive(Debug, Deserialize)]
struct GhostDb {
    data: GhostData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GhostData {
    posts: Vec<GhostPost>,
    tags: Vec<GhostTag>,
    users: Vec<GhostUser>,
    posts_tags: Vec<GhostPostTag>,
    posts_authors: Vec<GhostPostAuthor>,
}

#[derive(Debug, Deserialize)]
struct GhostPost {
    id: String,
    title: String,
    #[serde(default)]
    slug: String,
    #[serde(default)]
    html: Option<String>,
    #[serde(default)]
    plaintext: Option<String>,
    #[serde(default)]
    feature_image: Option<String>,
    #[serde(default)]
    featured: i64,
    status: String,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    custom_excerpt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GhostTag {
    id: String,
    slug: String,
}

#[derive(Debug, Deserialize)]
struct GhostUser {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct GhostPostTag {
    post_id: String,
    tag_id: String,
}

#[derive(Debug, Deserialize)]
struct GhostPostAuthor {
    post_id: String,
    author_id: String,
}

/// Converts a Ghost JSON export into normalized post records
pub struct GhostImporter<'a> {
    config: &'a SiteConfig,
}

impl<'a> GhostImporter<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Load published posts from an export file, newest first.
    /// `analytics_path` optionally joins the newsletter CSV.
    pub fn load(
        &self,
        export_path: &Path,
        analytics_path: Option<&Path>,
    ) -> Result<Vec<PostRecord>> {
        let raw = fs::read_to_string(export_path)
            .with_context(|| format!("failed to read {}", export_path.display()))?;
        let export: GhostExport =
            serde_json::from_str(&raw).context("failed to parse Ghost export JSON")?;
        let data = export
            .db
            .into_iter()
            .next()
            .ok_or(MigrateError::EmptyExport)?
            .data;

        let analytics = match analytics_path {
            Some(path) => load_analytics(path),
            None => HashMap::new(),
        };

        let tags_by_id: HashMap<&str, &GhostTag> =
            data.tags.iter().map(|t| (t.id.as_str(), t)).collect();
        let authors_by_id: HashMap<&str, &GhostUser> =
            data.users.iter().map(|u| (u.id.as_str(), u)).collect();

        let published: Vec<&GhostPost> = data
            .posts
            .iter()
            .filter(|p| p.status == "published")
            .collect();
        tracing::info!("Found {} published posts in export", published.len());

        let mut records: Vec<PostRecord> = published
            .iter()
            .map(|post| {
                self.convert_post(
                    post,
                    &data.posts_tags,
                    &data.posts_authors,
                    &tags_by_id,
                    &authors_by_id,
                    analytics.get(post.id.as_str()),
                )
            })
            .collect();

        records.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        Ok(records)
    }

    fn convert_post(
        &self,
        post: &GhostPost,
        posts_tags: &[GhostPostTag],
        posts_authors: &[GhostPostAuthor],
        tags_by_id: &HashMap<&str, &GhostTag>,
        authors_by_id: &HashMap<&str, &GhostUser>,
        analytics: Option<&Analytics>,
    ) -> PostRecord {
        let author = posts_authors
            .iter()
            .find(|pa| pa.post_id == post.id)
            .and_then(|pa| authors_by_id.get(pa.author_id.as_str()))
            .map(|u| u.name.clone())
            .unwrap_or_else(|| self.config.author.clone());

        let tags: Vec<String> = posts_tags
            .iter()
            .filter(|pt| pt.post_id == post.id)
            .filter_map(|pt| tags_by_id.get(pt.tag_id.as_str()))
            .map(|t| t.slug.clone())
            .collect();

        let body = match &post.html {
            Some(html) if !html.is_empty() => html_to_markdown(html),
            _ => post.plaintext.clone().unwrap_or_default(),
        };

        let published_at = post
            .published_at
            .as_deref()
            .and_then(parse_date_string)
            .unwrap_or_else(Utc::now);

        let meta_description = post
            .custom_excerpt
            .clone()
            .unwrap_or_else(|| body.chars().take(160).collect());

        let mut record = PostRecord::new(post.title.clone(), published_at);
        // Ghost already derived the slug from the title the same way we do
        if !post.slug.is_empty() {
            record.slug = post.slug.clone();
        } else {
            record.slug = slugify(&post.title);
        }
        record.updated_at = post.updated_at.as_deref().and_then(parse_date_string);
        record.author = author;
        record.excerpt = post.custom_excerpt.clone();
        record.featured = post.featured == 1;
        record.feature_image = post.feature_image.clone();
        record.source = SourcePlatform::Ghost;
        if !tags.is_empty() {
            record.category = Some(category_from_tags(&self.config.taxonomy, &tags));
            record.tags = tags;
        }
        record.seo = Some(SeoMeta {
            meta_title: Some(post.title.clone()),
            meta_description: Some(meta_description),
            og_image: post.feature_image.clone(),
        });
        record.analytics = analytics.copied().filter(|a| !a.is_empty());
        record.body = body;
        record
    }
}

/// Parse the newsletter analytics CSV into a per-post-id map.
/// Missing file or malformed rows degrade to empty data with a warning.
fn load_analytics(path: &Path) -> HashMap<String, Analytics> {
    let mut map = HashMap::new();

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Analytics CSV not readable ({}): {}", path.display(), e);
            return map;
        }
    };

    let mut lines = content.lines();
    let Some(header) = lines.next() else {
        return map;
    };
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();

    let index_of = |name: &str| columns.iter().position(|c| *c == name);
    let (Some(id_col), sends_col, opens_col, clicks_col, signups_col) = (
        index_of("id"),
        index_of("sends"),
        index_of("opens"),
        index_of("clicks"),
        index_of("signups"),
    ) else {
        tracing::warn!("Analytics CSV has no id column, ignoring it");
        return map;
    };

    let field = |values: &[&str], col: Option<usize>| -> u64 {
        col.and_then(|i| values.get(i))
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    };

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let values: Vec<&str> = line.split(',').collect();
        let Some(id) = values.get(id_col) else {
            continue;
        };
        map.insert(
            id.trim().to_string(),
            Analytics {
                sends: field(&values, sends_col),
                opens: field(&values, opens_col),
                clicks: field(&values, clicks_col),
                signups: field(&values, signups_col),
            },
        );
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_EXPORT: &str = r#"{
      "db": [{
        "data": {
          "posts": [
            {
              "id": "p1",
              "title": "Shipping Fast",
              "slug": "shipping-fast",
              "html": "<h2>Why</h2><p>Because <strong>speed</strong> wins.</p>",
              "plaintext": "Why. Because speed wins.",
              "feature_image": "https://cdn.example.com/fast.jpg",
              "featured": 1,
              "status": "published",
              "published_at": "2025-03-01T08:00:00.000Z",
              "updated_at": "2025-03-02T09:00:00.000Z",
              "custom_excerpt": "Speed wins."
            },
            {
              "id": "p2",
              "title": "A Draft",
              "slug": "a-draft",
              "html": "<p>Unfinished.</p>",
              "featured": 0,
              "status": "draft",
              "published_at": null
            }
          ],
          "tags": [
            {"id": "t1", "name": "Commerce", "slug": "commerce"}
          ],
          "users": [
            {"id": "u1", "name": "Nino Chavez"}
          ],
          "posts_tags": [
            {"post_id": "p1", "tag_id": "t1"}
          ],
          "posts_authors": [
            {"post_id": "p1", "author_id": "u1"}
          ]
        }
      }]
    }"#;

    #[test]
    fn test_load_filters_unpublished() {
        let tmp = tempfile::tempdir().unwrap();
        let export = tmp.path().join("export.json");
        fs::write(&export, SAMPLE_EXPORT).unwrap();

        let config = SiteConfig::default();
        let importer = GhostImporter::new(&config);
        let records = importer.load(&export, None).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.slug, "shipping-fast");
        assert_eq!(record.author, "Nino Chavez");
        assert_eq!(record.tags, vec!["commerce"]);
        assert_eq!(record.category, Some("Commerce".to_string()));
        assert!(record.featured);
        assert_eq!(record.source, SourcePlatform::Ghost);
        assert!(record.body.contains("## Why"));
        assert!(record.body.contains("**speed**"));
    }

    #[test]
    fn test_seo_block_built() {
        let tmp = tempfile::tempdir().unwrap();
        let export = tmp.path().join("export.json");
        fs::write(&export, SAMPLE_EXPORT).unwrap();

        let config = SiteConfig::default();
        let records = GhostImporter::new(&config).load(&export, None).unwrap();
        let seo = records[0].seo.as_ref().unwrap();
        assert_eq!(seo.meta_title, Some("Shipping Fast".to_string()));
        assert_eq!(seo.meta_description, Some("Speed wins.".to_string()));
        assert_eq!(
            seo.og_image,
            Some("https://cdn.example.com/fast.jpg".to_string())
        );
    }

    #[test]
    fn test_analytics_joined() {
        let tmp = tempfile::tempdir().unwrap();
        let export = tmp.path().join("export.json");
        fs::write(&export, SAMPLE_EXPORT).unwrap();
        let csv = tmp.path().join("analytics.csv");
        fs::write(&csv, "id,sends,opens,clicks,signups\np1,120,80,12,3\n").unwrap();

        let config = SiteConfig::default();
        let records = GhostImporter::new(&config)
            .load(&export, Some(&csv))
            .unwrap();
        let analytics = records[0].analytics.unwrap();
        assert_eq!(analytics.sends, 120);
        assert_eq!(analytics.clicks, 12);
    }

    #[test]
    fn test_empty_export_errors() {
        let tmp = tempfile::tempdir().unwrap();
        let export = tmp.path().join("export.json");
        fs::write(&export, r#"{"db": []}"#).unwrap();

        let config = SiteConfig::default();
        let err = GhostImporter::new(&config)
            .load(&export, None)
            .unwrap_err();
        assert!(err.to_string().contains("no database section"));
    }

    #[test]
    fn test_zero_analytics_dropped() {
        let tmp = tempfile::tempdir().unwrap();
        let export = tmp.path().join("export.json");
        fs::write(&export, SAMPLE_EXPORT).unwrap();
        let csv = tmp.path().join("analytics.csv");
        fs::write(&csv, "id,sends,opens,clicks,signups\np1,0,0,0,0\n").unwrap();

        let config = SiteConfig::default();
        let records = GhostImporter::new(&config)
            .load(&export, Some(&csv))
            .unwrap();
        assert!(records[0].analytics.is_none());
    }
}
