//! Formatting fixes for migrated content
//!
//! The Ghost HTML export loses structure in predictable ways. This pass
//! repairs the damage in place: inline numbered headings, tab-separated
//! pseudo-tables, code fences without a language hint, and dead
//! `__GHOST_URL__` placeholders. Front-matter and fenced code interiors
//! are never touched.

use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

lazy_static! {
    static ref NUMBERED_HEADING: Regex = Regex::new(r"^(\d+)\s{2,}(.+)$").unwrap();
    static ref LETTERED_HEADING: Regex = Regex::new(r"^(\d+[a-z])\s{2,}(.+)$").unwrap();
    static ref YAML_KEY: Regex = Regex::new(r"^[A-Za-z_]+\s*:").unwrap();
}

/// Counts of what a cleanup pass touched
#[derive(Debug, Default, Clone)]
pub struct CleanupStats {
    pub files_processed: usize,
    pub files_changed: usize,
    pub headings_fixed: usize,
    pub tables_fixed: usize,
    pub code_blocks_fixed: usize,
    pub image_urls_fixed: usize,
    pub errors: Vec<String>,
}

/// Run the cleanup pass over every MDX file in a directory.
/// Files are only rewritten when something actually changed.
pub fn run_dir(content_dir: &Path) -> Result<CleanupStats> {
    let mut stats = CleanupStats::default();

    for entry in WalkDir::new(content_dir)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        let is_mdx = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e == "mdx")
            .unwrap_or(false);
        if !path.is_file() || !is_mdx {
            continue;
        }

        match process_file(path, &mut stats) {
            Ok(changed) => {
                stats.files_processed += 1;
                if changed {
                    stats.files_changed += 1;
                    tracing::info!("Cleaned {:?}", path.file_name().unwrap_or_default());
                }
            }
            Err(e) => {
                let msg = format!("{}: {}", path.display(), e);
                tracing::warn!("Cleanup failed for {}", msg);
                stats.errors.push(msg);
            }
        }
    }

    Ok(stats)
}

fn process_file(path: &Path, stats: &mut CleanupStats) -> Result<bool> {
    let original = fs::read_to_string(path)?;
    let cleaned = clean_content(&original, stats);

    if cleaned != original {
        fs::write(path, cleaned)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Apply all fixes to one document
pub fn clean_content(content: &str, stats: &mut CleanupStats) -> String {
    let had_trailing_newline = content.ends_with('\n');
    let fixed = fix_image_urls(content, stats);
    let fixed = fix_numbered_headings(&fixed, stats);
    let fixed = fix_tables(&fixed, stats);
    let mut fixed = fix_code_fences(&fixed, stats);

    // Line-based passes drop the trailing newline, put it back
    if had_trailing_newline && !fixed.ends_with('\n') {
        fixed.push('\n');
    }
    fixed
}

/// Remove `__GHOST_URL__` placeholders, they never resolve to anything
fn fix_image_urls(content: &str, stats: &mut CleanupStats) -> String {
    let count = content.matches("__GHOST_URL__").count();
    if count == 0 {
        return content.to_string();
    }
    stats.image_urls_fixed += count;
    content.replace("__GHOST_URL__", "")
}

/// Tracks fenced code and front-matter regions while walking lines
struct RegionTracker {
    in_code_block: bool,
    in_frontmatter: bool,
}

impl RegionTracker {
    fn new() -> Self {
        Self {
            in_code_block: false,
            in_frontmatter: false,
        }
    }

    /// Returns true when the line itself is a region delimiter
    fn observe(&mut self, index: usize, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            self.in_code_block = !self.in_code_block;
            return true;
        }
        if trimmed == "---" && (index == 0 || self.in_frontmatter) {
            self.in_frontmatter = !self.in_frontmatter;
            return true;
        }
        false
    }

    fn skip(&self) -> bool {
        self.in_code_block || self.in_frontmatter
    }
}

/// `1  The Prototype Price Tag` becomes `## 1. The Prototype Price Tag`,
/// `6a  Fresh-Start Blueprint` becomes `### 6a. Fresh-Start Blueprint`
fn fix_numbered_headings(content: &str, stats: &mut CleanupStats) -> String {
    let mut tracker = RegionTracker::new();
    let mut out = Vec::new();

    for (index, line) in content.lines().enumerate() {
        if tracker.observe(index, line) || tracker.skip() {
            out.push(line.to_string());
            continue;
        }

        if let Some(caps) = NUMBERED_HEADING.captures(line) {
            stats.headings_fixed += 1;
            out.push(format!("## {}. {}", &caps[1], &caps[2]));
        } else if let Some(caps) = LETTERED_HEADING.captures(line) {
            stats.headings_fixed += 1;
            out.push(format!("### {}. {}", &caps[1], &caps[2]));
        } else {
            out.push(line.to_string());
        }
    }

    out.join("\n")
}

/// Consecutive tab-separated lines become a markdown table, first row as
/// the header
fn fix_tables(content: &str, stats: &mut CleanupStats) -> String {
    let mut tracker = RegionTracker::new();
    let mut out: Vec<String> = Vec::new();
    let mut buffer: Vec<String> = Vec::new();

    fn flush(buffer: &mut Vec<String>, out: &mut Vec<String>, stats: &mut CleanupStats) {
        if buffer.len() >= 2 {
            let rows: Vec<Vec<String>> = buffer
                .iter()
                .map(|row| row.split('\t').map(|c| c.trim().to_string()).collect())
                .collect();
            let cols = rows.iter().map(|r| r.len()).max().unwrap_or(0);

            out.push(format!("| {} |", rows[0].join(" | ")));
            out.push(format!("| {} |", vec!["---"; cols].join(" | ")));
            for row in &rows[1..] {
                out.push(format!("| {} |", row.join(" | ")));
            }
            out.push(String::new());
            stats.tables_fixed += 1;
        } else {
            out.append(buffer);
        }
        buffer.clear();
    }

    for (index, line) in content.lines().enumerate() {
        if tracker.observe(index, line) || tracker.skip() {
            flush(&mut buffer, &mut out, stats);
            out.push(line.to_string());
            continue;
        }

        let looks_like_row = line.contains('\t') && !line.trim().is_empty();
        if looks_like_row {
            buffer.push(line.to_string());
        } else {
            flush(&mut buffer, &mut out, stats);
            out.push(line.to_string());
        }
    }
    flush(&mut buffer, &mut out, stats);

    out.join("\n")
}

/// Guess a language hint from the first line of a code block
fn detect_language(first_line: &str) -> &'static str {
    let trimmed = first_line.trim();

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return "json";
    }
    if YAML_KEY.is_match(trimmed) {
        return "yaml";
    }
    if trimmed.starts_with('$') || trimmed.starts_with("#!") {
        return "bash";
    }
    "text"
}

/// Re-infer a hint for blocks migrated as plain `text`
fn reinfer_language(code: &str) -> Option<&'static str> {
    if code.contains('{') && code.contains('}') && code.contains(':') {
        return Some("json");
    }
    if code.contains("function") || code.contains("const") || code.contains("=>") {
        return Some("typescript");
    }
    if code.contains("if (") || code.contains("throw new") {
        return Some("typescript");
    }
    None
}

/// Add language hints to bare and `text` code fences
fn fix_code_fences(content: &str, stats: &mut CleanupStats) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut in_block = false;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();

        if !trimmed.starts_with("```") {
            out.push(line.to_string());
            i += 1;
            continue;
        }

        if in_block {
            // Closing fence
            in_block = false;
            out.push(line.to_string());
            i += 1;
            continue;
        }

        in_block = true;
        let fence_lang = trimmed.trim_start_matches('`');
        let block_body: String = lines[i + 1..]
            .iter()
            .take_while(|l| !l.trim().starts_with("```"))
            .copied()
            .collect::<Vec<_>>()
            .join("\n");

        if fence_lang.is_empty() {
            let first = lines.get(i + 1).copied().unwrap_or("");
            if !first.trim().is_empty() && !first.trim().starts_with("```") {
                stats.code_blocks_fixed += 1;
                out.push(format!("```{}", detect_language(first)));
                i += 1;
                continue;
            }
        } else if fence_lang == "text" {
            if let Some(lang) = reinfer_language(&block_body) {
                stats.code_blocks_fixed += 1;
                out.push(format!("```{}", lang));
                i += 1;
                continue;
            }
        }

        out.push(line.to_string());
        i += 1;
    }

    out.join("\n")
}
