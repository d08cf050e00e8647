//! Markdown parsing utilities using pulldown-cmark
//!
//! Builds structural indexes and recognizes heading markers in raw lines.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use regex::Regex;

use crate::index::{BlockEntry, HeadingEntry, StructuralIndex};

/// `#` repeated 1-6 times, then whitespace, at line start
static HEADING_MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s").unwrap());

/// A line ending in a `^id` anchor token
static BLOCK_ANCHOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\^([A-Za-z0-9]+)\s*$").unwrap());

/// Level of an ATX heading marker at the start of `line`, if any
pub fn heading_level(line: &str) -> Option<u8> {
    HEADING_MARKER_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().len() as u8)
}

/// Byte offsets where each line starts
fn line_starts(content: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(content.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

/// Zero-based line containing byte `offset`
fn line_of(starts: &[usize], offset: usize) -> usize {
    match starts.binary_search(&offset) {
        Ok(line) => line,
        Err(next) => next.saturating_sub(1),
    }
}

fn level_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Extract all headings with the line they start on
pub fn extract_headings(content: &str) -> Vec<HeadingEntry> {
    let starts = line_starts(content);
    let mut headings = Vec::new();
    let mut current: Option<HeadingEntry> = None;

    for (event, range) in Parser::new(content).into_offset_iter() {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some(HeadingEntry {
                    text: String::new(),
                    level: level_number(level),
                    start_line: line_of(&starts, range.start),
                });
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(heading) = current.as_mut() {
                    heading.text.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(mut heading) = current.take() {
                    heading.text = heading.text.trim().to_string();
                    headings.push(heading);
                }
            }
            _ => {}
        }
    }

    headings
}

/// Extract block anchors; the first line carrying an id wins
pub fn extract_block_anchors(content: &str) -> BTreeMap<String, BlockEntry> {
    let mut blocks = BTreeMap::new();

    for (line_num, line) in content.lines().enumerate() {
        if let Some(id) = BLOCK_ANCHOR_RE.captures(line).and_then(|caps| caps.get(1)) {
            blocks
                .entry(id.as_str().to_string())
                .or_insert(BlockEntry { start_line: line_num });
        }
    }

    blocks
}

/// Build the structural index of a note
pub fn build_index(content: &str) -> StructuralIndex {
    StructuralIndex {
        headings: extract_headings(content),
        blocks: extract_block_anchors(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("# Title"), Some(1));
        assert_eq!(heading_level("###### Deep"), Some(6));
        assert_eq!(heading_level("####### Too deep"), None);
        assert_eq!(heading_level("#hashtag"), None);
        assert_eq!(heading_level("  # indented"), None);
        assert_eq!(heading_level("plain"), None);
    }

    #[test]
    fn test_extract_headings() {
        let content = "# Main Title\n\ntext\n## Section `one`\n### Subsection\n";
        let headings = extract_headings(content);
        assert_eq!(headings.len(), 3);
        assert_eq!(headings[0], HeadingEntry { text: "Main Title".into(), level: 1, start_line: 0 });
        assert_eq!(headings[1].text, "Section one");
        assert_eq!(headings[1].start_line, 3);
        assert_eq!(headings[2].level, 3);
        assert_eq!(headings[2].start_line, 4);
    }

    #[test]
    fn test_extract_headings_setext_and_code() {
        let content = "Title\n=====\n\n```\n# not a heading\n```\n";
        let headings = extract_headings(content);
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].text, "Title");
        assert_eq!(headings[0].level, 1);
        assert_eq!(headings[0].start_line, 0);
    }

    #[test]
    fn test_extract_block_anchors() {
        let content = "line1\nline2 ^abc\n  - item ^x9  \nagain ^abc\n";
        let blocks = extract_block_anchors(content);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks["abc"].start_line, 1);
        assert_eq!(blocks["x9"].start_line, 2);
    }

    #[test]
    fn test_build_index() {
        let index = build_index("# A\npara ^p1\n## B\n");
        assert_eq!(index.headings.len(), 2);
        assert_eq!(index.block("p1").map(|b| b.start_line), Some(1));
    }
}
