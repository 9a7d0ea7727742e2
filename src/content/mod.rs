//! Content module - post records, front-matter, loading and writing

mod frontmatter;
pub mod loader;
mod post;
mod writer;

pub use frontmatter::{parse_date_string, Analytics, FrontMatter, SeoMeta};
pub use post::{slugify, PostRecord, SourcePlatform};
pub use writer::{MdxWriter, WriteOutcome};
