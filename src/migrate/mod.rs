//! Source importers - convert external exports into post records

pub mod ghost;
pub mod linkedin;

pub use ghost::GhostImporter;
pub use linkedin::LinkedInImporter;

use thiserror::Error;

/// Errors specific to parsing migration sources
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("export contains no database section")]
    EmptyExport,

    #[error("no content found in {0}")]
    MissingContent(String),
}
