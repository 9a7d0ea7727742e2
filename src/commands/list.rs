//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::Dispatch;

/// List site content by type
pub fn run(dispatch: &Dispatch, content_type: &str) -> Result<()> {
    let posts = dispatch.load_posts()?;

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", posts.len());
            for post in &posts {
                println!(
                    "  {} - {} [{}]",
                    post.published_at.format("%Y-%m-%d"),
                    post.title,
                    post.source
                );
            }
        }
        "tag" | "tags" => {
            let mut tags: HashMap<String, usize> = HashMap::new();
            for post in &posts {
                for tag in &post.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "category" | "categories" => {
            let mut categories: HashMap<String, usize> = HashMap::new();
            for post in &posts {
                if let Some(category) = &post.category {
                    *categories.entry(category.clone()).or_insert(0) += 1;
                }
            }
            println!("Categories ({}):", categories.len());
            let mut categories: Vec<_> = categories.into_iter().collect();
            categories.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            for (cat, count) in categories {
                println!("  {} ({})", cat, count);
            }
        }
        "source" | "sources" => {
            let mut sources: HashMap<String, usize> = HashMap::new();
            for post in &posts {
                *sources.entry(post.source.to_string()).or_insert(0) += 1;
            }
            println!("Sources ({}):", sources.len());
            let mut sources: Vec<_> = sources.into_iter().collect();
            sources.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            for (source, count) in sources {
                println!("  {} ({})", source, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category, source",
                content_type
            );
        }
    }

    Ok(())
}
