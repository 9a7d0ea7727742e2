//! Import exported LinkedIn articles into the content directory

use anyhow::Result;
use std::path::Path;

use crate::content::{MdxWriter, WriteOutcome};
use crate::migrate::LinkedInImporter;
use crate::Dispatch;

/// Run the LinkedIn import
pub fn run(dispatch: &Dispatch, input_dir: &Path, dry_run: bool) -> Result<()> {
    let importer = LinkedInImporter::new(&dispatch.config);
    let records = importer.load_dir(input_dir)?;

    let writer = MdxWriter::new(&dispatch.content_dir).dry_run(dry_run);
    let mut converted = 0usize;
    let mut skipped = 0usize;

    for record in &records {
        match writer.write(record)? {
            WriteOutcome::Written(_) => {
                println!("✓ Created: {}.mdx", record.slug);
                println!(
                    "    category: {} | tags: {}",
                    record.category.as_deref().unwrap_or("-"),
                    if record.tags.is_empty() {
                        "none".to_string()
                    } else {
                        record.tags.join(", ")
                    }
                );
                converted += 1;
            }
            WriteOutcome::SkippedExisting(_) => skipped += 1,
            WriteOutcome::DryRun(path) => {
                println!("[dry-run] would write: {}", path.display());
            }
        }
    }

    println!(
        "Conversion complete: {} converted, {} skipped, {} total",
        converted,
        skipped,
        records.len()
    );

    Ok(())
}
