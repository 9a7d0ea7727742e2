//! LinkedIn article export importer
//!
//! LinkedIn ships exported articles as one HTML file each: the title in an
//! `<h1>` wrapping a link back to the article, timestamps in `.published` /
//! `.created` elements, and the body in the first `<div>` under `<body>`.

use anyhow::{Context, Result};
use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use std::fs;
use std::path::Path;

use super::MigrateError;
use crate::config::SiteConfig;
use crate::content::{parse_date_string, slugify, PostRecord, SourcePlatform};
use crate::markdown::html_to_markdown;
use crate::taxonomy::{infer_category, infer_tags};

/// Excerpt budget for the first-paragraph summary
const EXCERPT_MAX_LEN: usize = 200;

lazy_static! {
    static ref TIMESTAMP: Regex = Regex::new(r"(\d{4}-\d{2}-\d{2}\s+\d{2}:\d{2})").unwrap();
}

/// Converts exported LinkedIn article HTML files into normalized post records
pub struct LinkedInImporter<'a> {
    config: &'a SiteConfig,
}

impl<'a> LinkedInImporter<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Load every `*.html` article in a directory.
    /// Files without content are skipped with a warning.
    pub fn load_dir(&self, dir: &Path) -> Result<Vec<PostRecord>> {
        let mut records = Vec::new();

        let mut entries: Vec<_> = fs::read_dir(dir)
            .with_context(|| format!("failed to read {}", dir.display()))?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.eq_ignore_ascii_case("html"))
                    .unwrap_or(false)
            })
            .collect();
        entries.sort();

        tracing::info!("Found {} HTML articles in {}", entries.len(), dir.display());

        for path in entries {
            match self.load_article(&path) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!("Skipping {:?}: {}", path.file_name().unwrap_or_default(), e);
                }
            }
        }

        Ok(records)
    }

    /// Parse a single exported article
    pub fn load_article(&self, path: &Path) -> Result<PostRecord> {
        let html = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let document = Html::parse_document(&html);

        let h1_selector = Selector::parse("h1").expect("valid selector");
        let a_selector = Selector::parse("a").expect("valid selector");
        let p_selector = Selector::parse("p").expect("valid selector");
        let published_selector = Selector::parse(".published").expect("valid selector");
        let content_selector = Selector::parse("body > div").expect("valid selector");

        let h1 = document.select(&h1_selector).next();
        let title = h1
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Untitled".to_string());

        let source_url = h1
            .and_then(|el| el.select(&a_selector).next())
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string);

        let published_at = document
            .select(&published_selector)
            .next()
            .map(|el| el.text().collect::<String>())
            .and_then(|text| extract_timestamp(&text))
            .unwrap_or_else(Utc::now);

        let content_html = document
            .select(&content_selector)
            .next()
            .map(|el| el.inner_html())
            .filter(|inner| !inner.trim().is_empty())
            .ok_or_else(|| MigrateError::MissingContent(path.display().to_string()))?;

        let body = html_to_markdown(&content_html);

        // First paragraph of the article, truncated on a word boundary
        let excerpt = document
            .select(&content_selector)
            .next()
            .and_then(|div| div.select(&p_selector).next())
            .map(|p| p.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty())
            .map(|text| truncate_excerpt(&text));

        let category = infer_category(&self.config.taxonomy, &title, &body);
        let tags = infer_tags(&self.config.taxonomy, &title, &body);

        let mut record = PostRecord::new(title.clone(), published_at);
        record.slug = slugify(&title);
        record.author = self.config.author.clone();
        record.excerpt = excerpt;
        record.category = Some(category);
        record.tags = tags;
        record.source = SourcePlatform::Linkedin;
        record.source_url = source_url;
        record.body = body;

        Ok(record)
    }
}

/// Pull a `YYYY-MM-DD HH:MM` timestamp out of free text
fn extract_timestamp(text: &str) -> Option<chrono::DateTime<Utc>> {
    let m = TIMESTAMP.captures(text)?;
    parse_date_string(&m[1].replace("  ", " "))
}

fn truncate_excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_MAX_LEN {
        return text.to_string();
    }
    let truncated: String = text.chars().take(EXCERPT_MAX_LEN - 3).collect();
    match truncated.rfind(' ') {
        Some(pos) if pos > 0 => format!("{}...", &truncated[..pos]),
        _ => format!("{}...", truncated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_ARTICLE: &str = r#"<html>
<head><title>export</title></head>
<body>
  <h1><a href="https://www.linkedin.com/pulse/ai-agents-production">AI agents in production</a></h1>
  <p class="created">Created on 2025-04-01 09:30</p>
  <p class="published">Published on 2025-04-02 10:15</p>
  <div>
    <p>Agents only earn their keep once the automation is boring.</p>
    <h2>What worked</h2>
    <p>Small scopes and <strong>tight</strong> feedback loops.</p>
  </div>
</body>
</html>"#;

    fn write_article(dir: &Path, name: &str, html: &str) {
        fs::write(dir.join(name), html).unwrap();
    }

    #[test]
    fn test_parse_article_fields() {
        let tmp = tempfile::tempdir().unwrap();
        write_article(tmp.path(), "article.html", SAMPLE_ARTICLE);

        let config = SiteConfig::default();
        let importer = LinkedInImporter::new(&config);
        let record = importer
            .load_article(&tmp.path().join("article.html"))
            .unwrap();

        assert_eq!(record.title, "AI agents in production");
        assert_eq!(record.slug, "ai-agents-in-production");
        assert_eq!(
            record.source_url.as_deref(),
            Some("https://www.linkedin.com/pulse/ai-agents-production")
        );
        assert_eq!(record.source, SourcePlatform::Linkedin);
        assert_eq!(
            record.published_at.format("%Y-%m-%d %H:%M").to_string(),
            "2025-04-02 10:15"
        );
        assert!(record.body.contains("## What worked"));
        assert!(record.body.contains("**tight**"));
    }

    #[test]
    fn test_excerpt_from_first_paragraph() {
        let tmp = tempfile::tempdir().unwrap();
        write_article(tmp.path(), "article.html", SAMPLE_ARTICLE);

        let config = SiteConfig::default();
        let record = LinkedInImporter::new(&config)
            .load_article(&tmp.path().join("article.html"))
            .unwrap();
        assert_eq!(
            record.excerpt.as_deref(),
            Some("Agents only earn their keep once the automation is boring.")
        );
    }

    #[test]
    fn test_category_and_tags_inferred() {
        let tmp = tempfile::tempdir().unwrap();
        write_article(tmp.path(), "article.html", SAMPLE_ARTICLE);

        let config = SiteConfig::default();
        let record = LinkedInImporter::new(&config)
            .load_article(&tmp.path().join("article.html"))
            .unwrap();
        assert_eq!(record.category, Some("AI & Automation".to_string()));
    }

    #[test]
    fn test_empty_content_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        write_article(
            tmp.path(),
            "empty.html",
            "<html><body><h1>Empty</h1></body></html>",
        );

        let config = SiteConfig::default();
        let err = LinkedInImporter::new(&config)
            .load_article(&tmp.path().join("empty.html"))
            .unwrap_err();
        assert!(err.to_string().contains("no content found"));
    }

    #[test]
    fn test_load_dir_skips_broken_files() {
        let tmp = tempfile::tempdir().unwrap();
        write_article(tmp.path(), "good.html", SAMPLE_ARTICLE);
        write_article(
            tmp.path(),
            "empty.html",
            "<html><body><h1>Empty</h1></body></html>",
        );
        write_article(tmp.path(), "notes.txt", "not html");

        let config = SiteConfig::default();
        let records = LinkedInImporter::new(&config).load_dir(tmp.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "AI agents in production");
    }
}
