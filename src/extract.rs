//! Span extraction for heading and block scopes
//!
//! Each extractor tries the structural index first and falls back to
//! scanning raw text when the index is missing or lacks the entry.

use log::debug;
use regex::Regex;

use crate::constants::BLOCK_SIGIL;
use crate::index::StructuralIndex;
use crate::markdown::heading_level;
use crate::strip::strip_line_block_id;

/// Extract the line anchored by `^id`, without its anchor token
pub fn extract_block(text: &str, index: Option<&StructuralIndex>, id: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();
    let token = format!("{}{}", BLOCK_SIGIL, id);

    if let Some(line) = index
        .and_then(|index| index.block(id))
        .and_then(|entry| lines.get(entry.start_line))
    {
        let line = line.trim_end();
        let line = line.strip_suffix(token.as_str()).unwrap_or(line);
        return Some(strip_line_block_id(line).trim_end().to_string());
    }

    debug!("block ^{} not in index, scanning text", id);

    let pattern = format!(r"(?m)^(.*?)[ \t]*\^{}[ \t\r]*$", regex::escape(id));
    if let Some(prefix) = Regex::new(&pattern)
        .ok()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
    {
        return Some(prefix.as_str().trim_end().to_string());
    }

    lines
        .iter()
        .find(|line| line.contains(token.as_str()))
        .map(|line| line.replacen(token.as_str(), "", 1).trim_end().to_string())
}

/// Extract the section under heading `name`.
///
/// The section runs from the heading line up to the next heading of the
/// same or a higher level (fewer `#`), or the end of the document.
pub fn extract_heading(text: &str, index: Option<&StructuralIndex>, name: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();

    if let Some(heading) = index
        .and_then(|index| index.find_heading(name))
        .filter(|heading| heading.start_line < lines.len())
    {
        return Some(section(&lines, heading.start_line, heading.level));
    }

    debug!("heading '{}' not in index, scanning text", name);

    let (start_line, level) = find_heading_line(text, name)?;
    Some(section(&lines, start_line, level))
}

/// Locate an ATX heading for `name` in raw text: (line, level)
pub fn find_heading_line(text: &str, name: &str) -> Option<(usize, u8)> {
    let pattern = format!(r"(?mi)^(#{{1,6}})[ \t]+{}(?:[ \t]+#+)?[ \t]*\r?$", regex::escape(name));
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(text)?;
    let whole = caps.get(0)?;
    let marker = caps.get(1)?;

    let line = text[..whole.start()].matches('\n').count();
    Some((line, marker.as_str().len() as u8))
}

/// Lines from `start` up to the next heading with level <= `level`, trimmed
fn section(lines: &[&str], start: usize, level: u8) -> String {
    let end = lines
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, line)| heading_level(line).is_some_and(|found| found <= level))
        .map_or(lines.len(), |(i, _)| i);

    lines[start..end].join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTLINE: &str = "# A\na1\na2\na3\na4\n## B\nb1\nb2\nb3\nb4\n# C\nc1\n";

    #[test]
    fn test_block_from_index() {
        let text = "line1\n  line2 ^abc\n";
        let index = StructuralIndex::from_text(text);
        assert_eq!(extract_block(text, Some(&index), "abc").as_deref(), Some("  line2"));
    }

    #[test]
    fn test_block_fallback_without_index() {
        let text = "line1\nline2 ^abc\n";
        assert_eq!(extract_block(text, None, "abc").as_deref(), Some("line2"));
    }

    #[test]
    fn test_block_fallback_first_match_wins() {
        let text = "first ^dup\nsecond ^dup\n";
        assert_eq!(extract_block(text, None, "dup").as_deref(), Some("first"));
    }

    #[test]
    fn test_block_substring_fallback() {
        let text = "see ^ref1 inline\n";
        assert_eq!(extract_block(text, None, "ref1").as_deref(), Some("see  inline"));
    }

    #[test]
    fn test_block_stale_index_falls_back() {
        let text = "only ^abc\n";
        let mut index = StructuralIndex::default();
        index.blocks.insert("abc".into(), crate::index::BlockEntry { start_line: 40 });
        assert_eq!(extract_block(text, Some(&index), "abc").as_deref(), Some("only"));
    }

    #[test]
    fn test_block_missing() {
        assert_eq!(extract_block("nothing here\n", None, "nope"), None);
    }

    #[test]
    fn test_heading_runs_to_equal_level() {
        let index = StructuralIndex::from_text(OUTLINE);
        let expected = "# A\na1\na2\na3\na4\n## B\nb1\nb2\nb3\nb4";
        assert_eq!(extract_heading(OUTLINE, Some(&index), "A").as_deref(), Some(expected));
        assert_eq!(extract_heading(OUTLINE, None, "A").as_deref(), Some(expected));
    }

    #[test]
    fn test_heading_nested_stops_at_higher_level() {
        let index = StructuralIndex::from_text(OUTLINE);
        assert_eq!(
            extract_heading(OUTLINE, Some(&index), "b").as_deref(),
            Some("## B\nb1\nb2\nb3\nb4")
        );
    }

    #[test]
    fn test_heading_to_end_of_document() {
        assert_eq!(extract_heading(OUTLINE, None, "C").as_deref(), Some("# C\nc1"));
    }

    #[test]
    fn test_heading_immediately_followed_by_sibling() {
        let text = "## One\n## Two\nbody\n";
        assert_eq!(extract_heading(text, None, "One").as_deref(), Some("## One"));
    }

    #[test]
    fn test_heading_is_idempotent() {
        let first = extract_heading(OUTLINE, None, "A").unwrap();
        let index = StructuralIndex::from_text(&first);
        assert_eq!(extract_heading(&first, Some(&index), "A").as_deref(), Some(first.as_str()));
        assert_eq!(extract_heading(&first, None, "A").as_deref(), Some(first.as_str()));
    }

    #[test]
    fn test_heading_escapes_regex() {
        let text = "# What (and why)?\nbody\n";
        assert_eq!(
            extract_heading(text, None, "What (and why)?").as_deref(),
            Some("# What (and why)?\nbody")
        );
    }

    #[test]
    fn test_heading_matches_whole_text() {
        let text = "# Introduction\nwrong\n# Intro\nright\n";
        let index = StructuralIndex::from_text(text);
        assert_eq!(extract_heading(text, None, "Intro").as_deref(), Some("# Intro\nright"));
        assert_eq!(extract_heading(text, Some(&index), "Intro").as_deref(), Some("# Intro\nright"));
        assert_eq!(find_heading_line("## Intro ##\r\n", "intro"), Some((0, 2)));
        assert_eq!(find_heading_line("# C#\n", "C"), None);
    }

    #[test]
    fn test_heading_missing() {
        assert_eq!(extract_heading(OUTLINE, None, "Z"), None);
    }

    #[test]
    fn test_find_heading_line() {
        assert_eq!(find_heading_line(OUTLINE, "B"), Some((5, 2)));
        assert_eq!(find_heading_line(OUTLINE, "nope"), None);
    }
}
