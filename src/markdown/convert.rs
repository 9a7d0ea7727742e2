//! HTML to Markdown conversion
//!
//! Walks the parsed DOM instead of pattern-matching on tag strings, so
//! nested lists, inline markup inside links, and code blocks survive the
//! trip. Used by both the Ghost and LinkedIn importers.

use lazy_static::lazy_static;
use regex::Regex;
use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html};

/// Elements whose subtrees are dropped entirely
const SKIP_TAGS: &[&str] = &["script", "style", "head", "nav", "noscript", "iframe"];

lazy_static! {
    static ref EXCESS_BLANK_LINES: Regex = Regex::new(r"\n{3,}").unwrap();
}

/// Convert an HTML fragment to Markdown
pub fn html_to_markdown(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::new();
    for child in fragment.root_element().children() {
        walk_block(&child, &mut out, 0);
    }

    let collapsed = EXCESS_BLANK_LINES.replace_all(&out, "\n\n");
    collapsed.trim().to_string()
}

/// Emit a block-level node into `out`
fn walk_block(node: &NodeRef<'_, Node>, out: &mut String, list_depth: usize) {
    match node.value() {
        Node::Text(text) => {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push_str(trimmed);
                out.push_str("\n\n");
            }
        }
        Node::Element(element) => {
            let tag = element.name();
            if SKIP_TAGS.contains(&tag) {
                return;
            }
            let Some(el) = ElementRef::wrap(*node) else {
                return;
            };

            match tag {
                "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                    let level = tag[1..].parse::<usize>().unwrap_or(1);
                    let text = collect_inline(&el);
                    if !text.trim().is_empty() {
                        out.push_str(&"#".repeat(level));
                        out.push(' ');
                        out.push_str(text.trim());
                        out.push_str("\n\n");
                    }
                }
                "p" | "figcaption" => {
                    let text = collect_inline(&el);
                    if !text.trim().is_empty() {
                        out.push_str(text.trim());
                        out.push_str("\n\n");
                    }
                }
                "ul" => {
                    render_list(&el, out, list_depth, None);
                    if list_depth == 0 {
                        out.push('\n');
                    }
                }
                "ol" => {
                    render_list(&el, out, list_depth, Some(1));
                    if list_depth == 0 {
                        out.push('\n');
                    }
                }
                "blockquote" => {
                    let mut inner = String::new();
                    for child in node.children() {
                        walk_block(&child, &mut inner, list_depth);
                    }
                    for line in inner.trim().lines() {
                        out.push_str("> ");
                        out.push_str(line);
                        out.push('\n');
                    }
                    out.push('\n');
                }
                "pre" => {
                    let (code, lang) = extract_code(&el);
                    out.push_str("```");
                    out.push_str(&lang);
                    out.push('\n');
                    out.push_str(code.trim_end());
                    out.push_str("\n```\n\n");
                }
                "hr" => {
                    out.push_str("---\n\n");
                }
                "br" => {
                    out.push('\n');
                }
                "img" => {
                    out.push_str(&render_image(&element));
                    out.push_str("\n\n");
                }
                // Containers are transparent at block level
                _ => {
                    // Elements that only hold inline content become a paragraph
                    if is_inline_tag(tag) {
                        let text = collect_inline(&el);
                        if !text.trim().is_empty() {
                            out.push_str(text.trim());
                            out.push_str("\n\n");
                        }
                    } else {
                        for child in node.children() {
                            walk_block(&child, out, list_depth);
                        }
                    }
                }
            }
        }
        _ => {
            for child in node.children() {
                walk_block(&child, out, list_depth);
            }
        }
    }
}

/// Render a `<ul>`/`<ol>`, `start` carries the ordered counter
fn render_list(el: &ElementRef<'_>, out: &mut String, depth: usize, start: Option<usize>) {
    let indent = "  ".repeat(depth);
    let mut counter = start;

    for child in el.children() {
        let Some(item) = ElementRef::wrap(child) else {
            continue;
        };
        if item.value().name() != "li" {
            continue;
        }

        let marker = match counter {
            Some(n) => {
                counter = Some(n + 1);
                format!("{}. ", n)
            }
            None => "- ".to_string(),
        };

        // Inline content of the item itself, nested lists rendered below it
        let mut text = String::new();
        let mut nested = String::new();
        for li_child in child.children() {
            match li_child.value() {
                Node::Element(e) if e.name() == "ul" => {
                    if let Some(sub) = ElementRef::wrap(li_child) {
                        render_list(&sub, &mut nested, depth + 1, None);
                    }
                }
                Node::Element(e) if e.name() == "ol" => {
                    if let Some(sub) = ElementRef::wrap(li_child) {
                        render_list(&sub, &mut nested, depth + 1, Some(1));
                    }
                }
                _ => collect_inline_node(&li_child, &mut text),
            }
        }

        out.push_str(&indent);
        out.push_str(&marker);
        out.push_str(text.trim());
        out.push('\n');
        out.push_str(&nested);
    }
}

/// Extract code text and language hint from a `<pre>` block
fn extract_code(el: &ElementRef<'_>) -> (String, String) {
    let mut lang = String::new();

    // <pre><code class="language-rust"> carries the hint
    for child in el.children() {
        if let Some(code_el) = ElementRef::wrap(child) {
            if code_el.value().name() == "code" {
                if let Some(class) = code_el.value().attr("class") {
                    lang = class
                        .split_whitespace()
                        .find_map(|c| c.strip_prefix("language-"))
                        .unwrap_or("")
                        .to_string();
                }
            }
        }
    }

    let text: String = el.text().collect();
    (text, lang)
}

/// Collect the inline markdown of an element's children
fn collect_inline(el: &ElementRef<'_>) -> String {
    let mut out = String::new();
    for child in el.children() {
        collect_inline_node(&child, &mut out);
    }
    out
}

fn collect_inline_node(node: &NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => {
            // Collapse the pretty-printing whitespace HTML sources carry
            let mut last_was_space = out.ends_with(' ');
            for ch in text.chars() {
                if ch.is_whitespace() {
                    if !last_was_space && !out.is_empty() {
                        out.push(' ');
                    }
                    last_was_space = true;
                } else {
                    out.push(ch);
                    last_was_space = false;
                }
            }
        }
        Node::Element(element) => {
            let tag = element.name();
            if SKIP_TAGS.contains(&tag) {
                return;
            }
            match tag {
                "strong" | "b" => wrap_inline(node, out, "**"),
                "em" | "i" => wrap_inline(node, out, "*"),
                "code" => {
                    let text: String = node
                        .children()
                        .filter_map(|c| match c.value() {
                            Node::Text(t) => Some(t.to_string()),
                            _ => None,
                        })
                        .collect();
                    out.push('`');
                    out.push_str(text.trim());
                    out.push('`');
                }
                "a" => {
                    let mut text = String::new();
                    for child in node.children() {
                        collect_inline_node(&child, &mut text);
                    }
                    match element.attr("href") {
                        Some(href) if !href.is_empty() => {
                            out.push('[');
                            out.push_str(text.trim());
                            out.push_str("](");
                            out.push_str(href);
                            out.push(')');
                        }
                        _ => out.push_str(text.trim()),
                    }
                }
                "img" => out.push_str(&render_image(&element)),
                "br" => out.push('\n'),
                _ => {
                    for child in node.children() {
                        collect_inline_node(&child, out);
                    }
                }
            }
        }
        _ => {}
    }
}

fn wrap_inline(node: &NodeRef<'_, Node>, out: &mut String, marker: &str) {
    let mut text = String::new();
    for child in node.children() {
        collect_inline_node(&child, &mut text);
    }
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return;
    }
    out.push_str(marker);
    out.push_str(trimmed);
    out.push_str(marker);
}

fn render_image(element: &scraper::node::Element) -> String {
    let src = element.attr("src").unwrap_or("");
    let alt = element.attr("alt").unwrap_or("");
    format!("![{}]({})", alt, src)
}

fn is_inline_tag(tag: &str) -> bool {
    matches!(
        tag,
        "strong" | "b" | "em" | "i" | "code" | "a" | "span" | "u" | "s" | "small" | "sub" | "sup"
    )
}
