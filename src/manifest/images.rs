//! Feature image backfill
//!
//! Posts migrated from LinkedIn (and some early Ghost posts) have no
//! feature image. This pass assigns one from a per-category stock pool,
//! picked by hashing the slug so the same post always gets the same image.

use crate::config::ImageConfig;
use crate::manifest::Manifest;

/// Assign a feature image to every manifest entry that lacks one.
/// Returns the number of entries updated.
pub fn backfill(manifest: &mut Manifest, config: &ImageConfig) -> usize {
    let mut updated = 0;

    for entry in &mut manifest.posts {
        if entry.feature_image.is_some() {
            continue;
        }
        let image = pick_image(config, entry.category.as_deref(), &entry.slug);
        if let Some(image) = image {
            tracing::debug!(
                "Assigning image to {} ({})",
                entry.slug,
                entry.category.as_deref().unwrap_or("no category")
            );
            entry.feature_image = Some(image);
            updated += 1;
        }
    }

    updated
}

/// Deterministic pick from the category pool, falling back to the default
/// pool for unknown or missing categories. None when both pools are empty.
fn pick_image(config: &ImageConfig, category: Option<&str>, slug: &str) -> Option<String> {
    let pool = category
        .and_then(|c| config.category_images.get(c))
        .filter(|images| !images.is_empty())
        .unwrap_or(&config.default_images);

    if pool.is_empty() {
        return None;
    }
    let index = hash_slug(slug) % pool.len();
    Some(pool[index].clone())
}

/// 32-bit string hash (the `h * 31 + c` family), stable across runs
fn hash_slug(slug: &str) -> usize {
    let mut hash: i32 = 0;
    for ch in slug.chars() {
        hash = hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(ch as i32);
    }
    hash.unsigned_abs() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::PostRecord;
    use chrono::{TimeZone, Utc};

    fn manifest_with(records: Vec<PostRecord>) -> Manifest {
        Manifest::build(&SiteConfig::default(), &records)
    }

    fn record(title: &str, category: Option<&str>, image: Option<&str>) -> PostRecord {
        let mut r = PostRecord::new(title, Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap());
        r.category = category.map(str::to_string);
        r.feature_image = image.map(str::to_string);
        r.body = "Body.".to_string();
        r
    }

    #[test]
    fn test_backfill_fills_missing_only() {
        let mut manifest = manifest_with(vec![
            record("Has Image", Some("Commerce"), Some("https://cdn.example.com/x.jpg")),
            record("Needs Image", Some("Commerce"), None),
        ]);

        let updated = backfill(&mut manifest, &ImageConfig::default());
        assert_eq!(updated, 1);

        let has = manifest.posts.iter().find(|p| p.slug == "has-image").unwrap();
        assert_eq!(
            has.feature_image.as_deref(),
            Some("https://cdn.example.com/x.jpg")
        );
        let filled = manifest
            .posts
            .iter()
            .find(|p| p.slug == "needs-image")
            .unwrap();
        assert!(filled.feature_image.is_some());
    }

    #[test]
    fn test_pick_is_deterministic() {
        let config = ImageConfig::default();
        let a = pick_image(&config, Some("Leadership"), "some-post");
        let b = pick_image(&config, Some("Leadership"), "some-post");
        assert_eq!(a, b);
        assert!(a.unwrap().starts_with("https://images.unsplash.com/"));
    }

    #[test]
    fn test_category_pool_used() {
        let config = ImageConfig::default();
        let image = pick_image(&config, Some("Commerce"), "any-slug").unwrap();
        assert!(config.category_images["Commerce"].contains(&image));
    }

    #[test]
    fn test_unknown_category_falls_back() {
        let config = ImageConfig::default();
        let image = pick_image(&config, Some("Nonexistent"), "any-slug").unwrap();
        assert!(config.default_images.contains(&image));

        let image = pick_image(&config, None, "any-slug").unwrap();
        assert!(config.default_images.contains(&image));
    }

    #[test]
    fn test_empty_pools_assign_nothing() {
        let config = ImageConfig {
            category_images: Default::default(),
            default_images: Vec::new(),
        };
        assert!(pick_image(&config, Some("Commerce"), "slug").is_none());

        let mut manifest = manifest_with(vec![record("Bare", None, None)]);
        assert_eq!(backfill(&mut manifest, &config), 0);
    }
}
