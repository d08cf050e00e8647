//! Front-matter and block-id stripping
//!
//! Runs before embed resolution so that a note's own metadata and anchor
//! markers never reach the exported text.

use once_cell::sync::Lazy;
use regex::Regex;

/// A `---` block at the very start of the text, delimiters inclusive
static FRONTMATTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A---\r?\n(?s:.*?)(?m:^)---\r?\n").unwrap());

/// A trailing `^id` anchor token, optionally followed by whitespace
static TRAILING_BLOCK_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\^[A-Za-z0-9]+\s*$").unwrap());

/// Strip front matter and/or block ids from note text.
///
/// Front matter is removed first. Block-id removal keeps indentation and
/// only trims whitespace at the end of each line.
pub fn strip(text: &str, remove_metadata: bool, remove_block_ids: bool) -> String {
    let text = if remove_metadata {
        strip_frontmatter(text)
    } else {
        text
    };

    if remove_block_ids {
        strip_block_ids(text)
    } else {
        text.to_string()
    }
}

/// Remove a leading front-matter block, or return the text unchanged
pub fn strip_frontmatter(text: &str) -> &str {
    match FRONTMATTER_RE.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Remove the trailing `^id` token from every line
pub fn strip_block_ids(text: &str) -> String {
    let separator = if text.contains("\r\n") { "\r\n" } else { "\n" };

    text.split(separator)
        .map(strip_line_block_id)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Remove a trailing `^id` token from a single line, trimming the end only
pub fn strip_line_block_id(line: &str) -> &str {
    match TRAILING_BLOCK_ID_RE.find(line) {
        Some(m) => line[..m.start()].trim_end(),
        None => line,
    }
}
