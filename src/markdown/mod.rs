//! Markdown processing - HTML conversion and plain-text derivation

mod convert;
mod text;

pub use convert::html_to_markdown;
pub use text::{excerpt, plain_text, reading_time, word_count};
