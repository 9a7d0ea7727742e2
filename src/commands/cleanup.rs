//! Clean up formatting issues in migrated content

use anyhow::Result;

use crate::cleanup;
use crate::Dispatch;

/// Run the cleanup pass over the content directory
pub fn run(dispatch: &Dispatch) -> Result<()> {
    let stats = cleanup::run_dir(&dispatch.content_dir)?;

    println!("Cleanup complete:");
    println!("  {} files processed", stats.files_processed);
    println!("  {} files changed", stats.files_changed);
    println!("  {} headings fixed", stats.headings_fixed);
    println!("  {} tables fixed", stats.tables_fixed);
    println!("  {} code blocks fixed", stats.code_blocks_fixed);
    println!("  {} image URLs fixed", stats.image_urls_fixed);

    if !stats.errors.is_empty() {
        println!("Errors:");
        for err in &stats.errors {
            println!("  {}", err);
        }
    }

    Ok(())
}
