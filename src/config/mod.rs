//! Configuration module

mod site;

pub use site::FeedConfig;
pub use site::ImageConfig;
pub use site::ReadingConfig;
pub use site::SiteConfig;
pub use site::TaxonomyConfig;
