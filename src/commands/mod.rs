//! Command implementations

pub mod cleanup;
pub mod feed;
pub mod images;
pub mod import;
pub mod list;
pub mod manifest;
pub mod migrate;
pub mod new;
