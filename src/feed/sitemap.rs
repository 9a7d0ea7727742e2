//! Sitemap generation

use anyhow::Result;
use chrono::Utc;

use super::escape_xml;
use crate::config::SiteConfig;
use crate::manifest::Manifest;

struct SitemapUrl {
    loc: String,
    lastmod: String,
    changefreq: &'static str,
    priority: &'static str,
}

/// Generates sitemap.xml from the manifest
pub struct SitemapGenerator<'a> {
    config: &'a SiteConfig,
}

impl<'a> SitemapGenerator<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    pub fn generate(&self, manifest: &Manifest) -> Result<String> {
        let config = self.config;
        let base = config.url.trim_end_matches('/');
        let today = Utc::now().format("%Y-%m-%d").to_string();

        let mut urls = vec![
            SitemapUrl {
                loc: base.to_string(),
                lastmod: today.clone(),
                changefreq: "daily",
                priority: "1.0",
            },
            SitemapUrl {
                loc: format!("{}/{}", base, config.post_path.trim_matches('/')),
                lastmod: today,
                changefreq: "daily",
                priority: "0.9",
            },
        ];

        for entry in &manifest.posts {
            urls.push(SitemapUrl {
                loc: config.post_url(&entry.slug),
                lastmod: entry.published_at.format("%Y-%m-%d").to_string(),
                changefreq: "monthly",
                priority: if entry.featured { "0.8" } else { "0.7" },
            });
        }

        // Highest priority first, then newest
        urls.sort_by(|a, b| {
            b.priority
                .cmp(a.priority)
                .then_with(|| b.lastmod.cmp(&a.lastmod))
        });

        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
        for url in &urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&url.loc)));
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", url.lastmod));
            xml.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                url.changefreq
            ));
            xml.push_str(&format!("    <priority>{}</priority>\n", url.priority));
            xml.push_str("  </url>\n");
        }
        xml.push_str("</urlset>\n");

        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostRecord;
    use chrono::TimeZone;

    fn config() -> SiteConfig {
        SiteConfig {
            url: "https://blog.example.org".to_string(),
            ..Default::default()
        }
    }

    fn manifest(config: &SiteConfig) -> Manifest {
        let mut featured = PostRecord::new(
            "Featured Post",
            Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
        );
        featured.featured = true;
        featured.body = "Body.".to_string();

        let mut plain = PostRecord::new(
            "Plain Post",
            Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
        );
        plain.body = "Body.".to_string();

        Manifest::build(config, &[featured, plain])
    }

    #[test]
    fn test_sitemap_structure() {
        let config = config();
        let xml = SitemapGenerator::new(&config)
            .generate(&manifest(&config))
            .unwrap();

        assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert!(xml.contains("<loc>https://blog.example.org</loc>"));
        assert!(xml.contains("<loc>https://blog.example.org/blog</loc>"));
        assert!(xml.contains("<loc>https://blog.example.org/blog/featured-post</loc>"));
        assert_eq!(xml.matches("<url>").count(), 4);
    }

    #[test]
    fn test_featured_gets_higher_priority() {
        let config = config();
        let xml = SitemapGenerator::new(&config)
            .generate(&manifest(&config))
            .unwrap();

        let featured_pos = xml.find("featured-post").unwrap();
        let plain_pos = xml.find("plain-post").unwrap();
        // 0.8 sorts before 0.7 despite being older
        assert!(featured_pos < plain_pos);
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.contains("<priority>0.7</priority>"));
    }

    #[test]
    fn test_lastmod_is_publication_date() {
        let config = config();
        let xml = SitemapGenerator::new(&config)
            .generate(&manifest(&config))
            .unwrap();
        assert!(xml.contains("<lastmod>2025-02-01</lastmod>"));
        assert!(xml.contains("<lastmod>2025-03-01</lastmod>"));
    }
}
