//! Front-matter parsing and serialization for MDX files

use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// SEO metadata block
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SeoMeta {
    #[serde(rename = "metaTitle", skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(rename = "metaDescription", skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(rename = "ogImage", skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
}

/// Newsletter analytics carried over from the Ghost export
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Analytics {
    pub sends: u64,
    pub opens: u64,
    pub clicks: u64,
    pub signups: u64,
}

impl Analytics {
    /// Whether the block carries any signal worth keeping
    pub fn is_empty(&self) -> bool {
        self.sends == 0 && self.opens == 0
    }
}

/// Front-matter data from an MDX post.
///
/// Field names follow the camelCase convention the MDX files use on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(rename = "publishedAt", skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        deserialize_with = "string_or_vec",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(rename = "sourceUrl", skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(rename = "featureImage", skip_serializing_if = "Option::is_none")]
    pub feature_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<Analytics>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: None,
            slug: None,
            published_at: None,
            updated_at: None,
            author: None,
            excerpt: None,
            category: None,
            tags: Vec::new(),
            featured: false,
            source: None,
            source_url: None,
            feature_image: None,
            seo: None,
            analytics: None,
            extra: HashMap::new(),
        }
    }
}

impl FrontMatter {
    /// Parse front-matter from an MDX file.
    /// Returns (front_matter, body).
    ///
    /// Like gray-matter, the block is only recognized when the file starts
    /// with a `---` fence. Files without one get a default front-matter.
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let trimmed = content.trim_start_matches('\u{feff}');

        if !trimmed.starts_with("---") {
            return Ok((FrontMatter::default(), trimmed));
        }

        let rest = &trimmed[3..];
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            // No closing fence, treat as no front-matter
            return Ok((FrontMatter::default(), trimmed));
        };

        let yaml_content = &rest[..end_pos];
        let body = &rest[end_pos + 4..];
        let body = body.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fm: FrontMatter = serde_yaml::from_str(yaml_content)
            .map_err(|e| anyhow!("invalid YAML front-matter: {}", e))?;
        Ok((fm, body))
    }

    /// Serialize back to a full MDX document with a `---` fenced block
    pub fn to_mdx(&self, body: &str) -> Result<String> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(format!("---\n{}---\n\n{}\n", yaml, body.trim_end()))
    }

    /// Parse the publication date
    pub fn parse_published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at.as_deref().and_then(parse_date_string)
    }

    /// Parse the updated date
    pub fn parse_updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at.as_deref().and_then(parse_date_string)
    }
}

/// Parse a date string in the formats that show up in exported content
pub fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    // RFC 3339 / ISO 8601 first, this is what migrated files carry
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(DateTime::from_naive_utc_and_offset(dt, Utc));
        }
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let dt = d.and_hms_opt(0, 0, 0)?;
        return Some(DateTime::from_naive_utc_and_offset(dt, Utc));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
publishedAt: "2025-10-12T06:07:29.000Z"
author: Nino Chavez
category: Commerce
tags:
  - commerce
  - field-notes
featured: true
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, Some("Hello World".to_string()));
        assert_eq!(fm.category, Some("Commerce".to_string()));
        assert_eq!(fm.tags, vec!["commerce", "field-notes"]);
        assert!(fm.featured);
        assert!(fm.parse_published_at().is_some());
        assert!(body.contains("This is the content."));
    }

    #[test]
    fn test_parse_single_string_tags() {
        let content = "---\ntitle: One Tag\ntags: notes\n---\n\nBody.\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["notes"]);
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just a body, no fences.\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert!(body.contains("Just a body"));
    }

    #[test]
    fn test_missing_closing_fence() {
        let content = "---\ntitle: Broken\n\nNo closing fence here.\n";
        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert!(body.starts_with("---"));
    }

    #[test]
    fn test_roundtrip() {
        let fm = FrontMatter {
            title: Some("Round Trip".to_string()),
            published_at: Some("2025-01-02T00:00:00Z".to_string()),
            tags: vec!["a".to_string(), "b".to_string()],
            featured: true,
            source: Some("linkedin".to_string()),
            ..Default::default()
        };

        let mdx = fm.to_mdx("Body text.").unwrap();
        assert!(mdx.starts_with("---\n"));
        assert!(mdx.contains("publishedAt:"));
        assert!(mdx.ends_with("Body text.\n"));

        let (parsed, body) = FrontMatter::parse(&mdx).unwrap();
        assert_eq!(parsed.title, Some("Round Trip".to_string()));
        assert_eq!(parsed.tags, fm.tags);
        assert_eq!(parsed.source, Some("linkedin".to_string()));
        assert_eq!(body.trim(), "Body text.");
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date_string("2025-10-12T06:07:29.000Z").is_some());
        assert!(parse_date_string("2025-10-12 06:07").is_some());
        assert!(parse_date_string("2025-10-12").is_some());
        assert!(parse_date_string("next tuesday").is_none());
    }

    #[test]
    fn test_analytics_block() {
        let content = "---\ntitle: T\nanalytics:\n  sends: 120\n  opens: 80\n---\n\nBody.\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        let analytics = fm.analytics.unwrap();
        assert_eq!(analytics.sends, 120);
        assert_eq!(analytics.opens, 80);
        assert!(!analytics.is_empty());
    }
}
