//! Plain-text derivation from markdown bodies
//!
//! Reading time and auto-excerpts are computed on the stripped text so
//! markup never counts as words.

use pulldown_cmark::{Event, Options, Parser};

/// Strip markdown down to plain text
pub fn plain_text(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_GFM;
    let parser = Parser::new_ext(markdown, options);

    let mut out = String::new();
    for event in parser {
        match event {
            Event::Text(text) | Event::Code(text) => {
                if !out.is_empty() && !out.ends_with(' ') {
                    out.push(' ');
                }
                out.push_str(text.trim());
            }
            Event::SoftBreak | Event::HardBreak => {
                if !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }

    out.trim().to_string()
}

/// Count words in a markdown body
pub fn word_count(markdown: &str) -> usize {
    plain_text(markdown).split_whitespace().count()
}

/// Reading time label, e.g. "3 min read"
pub fn reading_time(markdown: &str, words_per_minute: usize) -> String {
    let words = word_count(markdown);
    let minutes = words.div_ceil(words_per_minute.max(1)).max(1);
    if minutes == 1 {
        "1 min read".to_string()
    } else {
        format!("{} min read", minutes)
    }
}

/// Derive an excerpt from the body: first `max_len` characters of the
/// stripped text, cut on a word boundary with an ellipsis when truncated.
pub fn excerpt(markdown: &str, max_len: usize) -> String {
    let text = plain_text(markdown);

    if text.chars().count() <= max_len {
        return text;
    }

    let truncated: String = text.chars().take(max_len).collect();
    match truncated.rfind(' ') {
        Some(pos) if pos > 0 => format!("{}...", &truncated[..pos]),
        _ => format!("{}...", truncated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_strips_markup() {
        let md = "# Title\n\nSome **bold** text with [a link](https://x.com) and `code`.";
        let text = plain_text(md);
        assert!(!text.contains('#'));
        assert!(!text.contains("**"));
        assert!(!text.contains("]("));
        assert!(text.contains("bold"));
        assert!(text.contains("a link"));
        assert!(text.contains("code"));
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("one two three"), 3);
        assert_eq!(word_count("# heading\n\npara with four words"), 5);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let body = "word ".repeat(226);
        assert_eq!(reading_time(&body, 225), "2 min read");
        assert_eq!(reading_time("short", 225), "1 min read");
    }

    #[test]
    fn test_excerpt_short_text_untouched() {
        assert_eq!(excerpt("Short body.", 150), "Short body.");
    }

    #[test]
    fn test_excerpt_cuts_on_word_boundary() {
        let body = "alpha beta gamma delta epsilon";
        let e = excerpt(body, 14);
        assert_eq!(e, "alpha beta...");
    }
}
