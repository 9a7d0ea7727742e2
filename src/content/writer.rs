//! MDX writer - serializes post records to disk

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::{FrontMatter, PostRecord};

/// What happened to a record during a write pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// File written at the given path
    Written(PathBuf),
    /// A file with the same slug exists and came from a different source
    SkippedExisting(PathBuf),
    /// Dry-run, nothing touched
    DryRun(PathBuf),
}

/// Writes post records as `<slug>.mdx` files
pub struct MdxWriter {
    content_dir: PathBuf,
    dry_run: bool,
}

impl MdxWriter {
    pub fn new<P: AsRef<Path>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Write a record, refusing to clobber a post that came from a
    /// different source (a Ghost post and a LinkedIn article can share a
    /// title, and therefore a slug).
    pub fn write(&self, record: &PostRecord) -> Result<WriteOutcome> {
        let path = self.content_dir.join(format!("{}.mdx", record.slug));

        if path.exists() && !self.same_source(&path, record)? {
            tracing::warn!(
                "{}.mdx already exists from another source, skipping (consider slug {}-{})",
                record.slug,
                record.slug,
                record.source
            );
            return Ok(WriteOutcome::SkippedExisting(path));
        }

        if self.dry_run {
            tracing::info!("[dry-run] would write {}", path.display());
            return Ok(WriteOutcome::DryRun(path));
        }

        fs::create_dir_all(&self.content_dir)?;
        let mdx = record.to_front_matter().to_mdx(&record.body)?;
        fs::write(&path, mdx).with_context(|| format!("failed to write {}", path.display()))?;

        Ok(WriteOutcome::Written(path))
    }

    fn same_source(&self, path: &Path, record: &PostRecord) -> Result<bool> {
        let existing = fs::read_to_string(path)?;
        let (fm, _) = FrontMatter::parse(&existing)?;
        Ok(fm.source.as_deref() == Some(record.source.as_str()))
    }
}
