//! RSS 2.0 feed generation

use anyhow::Result;
use chrono::Utc;
use pulldown_cmark::{html, Options, Parser};
use std::collections::HashMap;

use super::{escape_xml, strip_invalid_xml_chars};
use crate::config::SiteConfig;
use crate::content::PostRecord;
use crate::manifest::Manifest;

/// Generates the RSS 2.0 feed from the manifest
pub struct RssGenerator<'a> {
    config: &'a SiteConfig,
}

impl<'a> RssGenerator<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Render the feed XML. `records` supplies post bodies for full-text
    /// mode and may be empty otherwise.
    pub fn generate(&self, manifest: &Manifest, records: &[PostRecord]) -> Result<String> {
        let config = self.config;
        let build_date = Utc::now().to_rfc2822();

        let bodies: HashMap<&str, &str> = records
            .iter()
            .map(|r| (r.slug.as_str(), r.body.as_str()))
            .collect();

        // Every text field gets the same treatment: drop XML-invalid
        // control characters, then escape
        let text = |s: &str| escape_xml(&strip_invalid_xml_chars(s));

        let mut feed = String::new();
        feed.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        if config.feed.full_text {
            feed.push_str("<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\" xmlns:content=\"http://purl.org/rss/1.0/modules/content/\">\n");
        } else {
            feed.push_str("<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\">\n");
        }
        feed.push_str("  <channel>\n");
        feed.push_str(&format!("    <title>{}</title>\n", text(&config.title)));
        feed.push_str(&format!("    <link>{}</link>\n", config.url.trim_end_matches('/')));
        feed.push_str(&format!(
            "    <description>{}</description>\n",
            text(&config.description)
        ));
        feed.push_str(&format!("    <language>{}</language>\n", config.language));
        feed.push_str(&format!("    <lastBuildDate>{}</lastBuildDate>\n", build_date));
        feed.push_str(&format!(
            "    <atom:link href=\"{}/rss.xml\" rel=\"self\" type=\"application/rss+xml\" />\n",
            config.url.trim_end_matches('/')
        ));
        if !config.author_email.is_empty() {
            feed.push_str(&format!(
                "    <managingEditor>{} ({})</managingEditor>\n",
                config.author_email,
                text(&config.author)
            ));
        }

        // Manifest entries are newest first already
        for entry in manifest.posts.iter().take(config.feed.limit) {
            let post_url = config.post_url(&entry.slug);
            let pub_date = entry.published_at.to_rfc2822();

            feed.push_str("    <item>\n");
            feed.push_str(&format!(
                "      <title>{}</title>\n",
                text(&entry.title)
            ));
            feed.push_str(&format!("      <link>{}</link>\n", post_url));
            feed.push_str(&format!(
                "      <guid isPermaLink=\"true\">{}</guid>\n",
                post_url
            ));
            feed.push_str(&format!("      <pubDate>{}</pubDate>\n", pub_date));
            if !config.author_email.is_empty() {
                feed.push_str(&format!(
                    "      <author>{} ({})</author>\n",
                    config.author_email,
                    text(entry.author.as_deref().unwrap_or(&config.author))
                ));
            }
            feed.push_str(&format!(
                "      <description>{}</description>\n",
                text(&entry.excerpt)
            ));
            for tag in &entry.tags {
                feed.push_str(&format!(
                    "      <category>{}</category>\n",
                    text(tag)
                ));
            }
            if config.feed.full_text {
                if let Some(body) = bodies.get(entry.slug.as_str()) {
                    let rendered = render_markdown(body);
                    feed.push_str(&format!(
                        "      <content:encoded><![CDATA[{}]]></content:encoded>\n",
                        strip_invalid_xml_chars(&rendered).replace("]]>", "]]&gt;")
                    ));
                }
            }
            feed.push_str("    </item>\n");
        }

        feed.push_str("  </channel>\n");
        feed.push_str("</rss>\n");

        Ok(feed)
    }
}

/// Render a markdown body to HTML for content:encoded
fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_GFM;
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SourcePlatform;
    use chrono::TimeZone;

    fn sample_manifest(config: &SiteConfig) -> (Manifest, Vec<PostRecord>) {
        let mut record = PostRecord::new(
            "Feed Post",
            Utc.with_ymd_and_hms(2025, 5, 10, 8, 0, 0).unwrap(),
        );
        record.author = "Nino Chavez".to_string();
        record.excerpt = Some("A post about feeds & things.".to_string());
        record.tags = vec!["ai".to_string(), "commerce".to_string()];
        record.source = SourcePlatform::Ghost;
        record.body = "# Heading\n\nFull body here.".to_string();

        let manifest = Manifest::build(config, std::slice::from_ref(&record));
        (manifest, vec![record])
    }

    #[test]
    fn test_rss_structure() {
        let config = SiteConfig {
            title: "Signal Dispatch".to_string(),
            url: "https://blog.example.org".to_string(),
            author_email: "nino@example.org".to_string(),
            ..Default::default()
        };
        let (manifest, records) = sample_manifest(&config);
        let xml = RssGenerator::new(&config).generate(&manifest, &records).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<rss version=\"2.0\""));
        assert!(xml.contains("<title>Signal Dispatch</title>"));
        assert!(xml.contains("<title>Feed Post</title>"));
        assert!(xml.contains("<link>https://blog.example.org/blog/feed-post</link>"));
        assert!(xml.contains("<guid isPermaLink=\"true\">https://blog.example.org/blog/feed-post</guid>"));
        assert!(xml.contains("<category>ai</category>"));
        assert!(xml.contains("<category>commerce</category>"));
        // Escaped description
        assert!(xml.contains("feeds &amp; things"));
        // No full text by default
        assert!(!xml.contains("content:encoded"));
    }

    #[test]
    fn test_rss_full_text() {
        let mut config = SiteConfig {
            url: "https://blog.example.org".to_string(),
            ..Default::default()
        };
        config.feed.full_text = true;
        let (manifest, records) = sample_manifest(&config);
        let xml = RssGenerator::new(&config).generate(&manifest, &records).unwrap();

        assert!(xml.contains("xmlns:content="));
        assert!(xml.contains("<content:encoded><![CDATA["));
        assert!(xml.contains("<h1>Heading</h1>"));
    }

    #[test]
    fn test_control_chars_stripped_everywhere() {
        let config = SiteConfig {
            title: "Bad\u{0008} Channel".to_string(),
            url: "https://blog.example.org".to_string(),
            author_email: "nino@example.org".to_string(),
            ..Default::default()
        };

        let mut record = PostRecord::new(
            "Pasted\u{0000} Title",
            Utc.with_ymd_and_hms(2025, 5, 10, 8, 0, 0).unwrap(),
        );
        record.author = "Ni\u{0001}no".to_string();
        record.tags = vec!["a\u{0002}i".to_string()];
        record.excerpt = Some("Sum\u{0003}mary".to_string());
        record.body = "Body.".to_string();

        let manifest = Manifest::build(&config, std::slice::from_ref(&record));
        let xml = RssGenerator::new(&config)
            .generate(&manifest, &[record])
            .unwrap();

        assert!(xml.contains("<title>Bad Channel</title>"));
        assert!(xml.contains("<title>Pasted Title</title>"));
        assert!(xml.contains("(Nino)"));
        assert!(xml.contains("<category>ai</category>"));
        assert!(xml.contains("<description>Summary</description>"));
        for ch in ['\u{0000}', '\u{0001}', '\u{0002}', '\u{0003}', '\u{0008}'] {
            assert!(!xml.contains(ch));
        }
    }

    #[test]
    fn test_rss_respects_limit() {
        let mut config = SiteConfig::default();
        config.feed.limit = 1;

        let mut records = Vec::new();
        for i in 1..=3u32 {
            let mut r = PostRecord::new(
                format!("Post {}", i),
                Utc.with_ymd_and_hms(2025, 5, i, 8, 0, 0).unwrap(),
            );
            r.body = "Body.".to_string();
            records.push(r);
        }
        let manifest = Manifest::build(&config, &records);
        let xml = RssGenerator::new(&config).generate(&manifest, &records).unwrap();

        assert_eq!(xml.matches("<item>").count(), 1);
        // Newest post survives the cut
        assert!(xml.contains("<title>Post 3</title>"));
    }
}
