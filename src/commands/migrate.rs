//! Migrate a Ghost CMS export into the content directory

use anyhow::Result;
use std::path::Path;

use crate::content::{MdxWriter, WriteOutcome};
use crate::migrate::GhostImporter;
use crate::Dispatch;

/// Run the Ghost migration
pub fn run(
    dispatch: &Dispatch,
    export_path: &Path,
    analytics_path: Option<&Path>,
    dry_run: bool,
    limit: Option<usize>,
) -> Result<()> {
    let importer = GhostImporter::new(&dispatch.config);
    let mut records = importer.load(export_path, analytics_path)?;

    if let Some(limit) = limit {
        records.truncate(limit);
    }

    tracing::info!("Migrating {} posts...", records.len());
    if dry_run {
        tracing::info!("Dry-run mode, no files will be written");
    }

    let writer = MdxWriter::new(&dispatch.content_dir).dry_run(dry_run);
    let mut written = 0usize;
    let mut skipped = 0usize;
    let mut errors = 0usize;

    for record in &records {
        match writer.write(record) {
            Ok(WriteOutcome::Written(path)) => {
                println!("✓ Written: {}", path.file_name().unwrap_or_default().to_string_lossy());
                written += 1;
            }
            Ok(WriteOutcome::SkippedExisting(_)) => skipped += 1,
            Ok(WriteOutcome::DryRun(path)) => {
                println!("[dry-run] would write: {}", path.display());
            }
            Err(e) => {
                tracing::error!("Error migrating \"{}\": {}", record.title, e);
                errors += 1;
            }
        }
    }

    println!("Migration complete: {} written, {} skipped, {} errors", written, skipped, errors);
    if dry_run {
        println!("Run without --dry-run to write files.");
    }

    Ok(())
}
