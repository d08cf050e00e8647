//! Splice application
//!
//! Replaces byte ranges of a text with new content. Splices are applied
//! right to left so every range still refers to the original text: a
//! replacement of a different length only shifts text to its right, which
//! has already been rebuilt.

use std::borrow::Cow;
use std::ops::Range;

use crate::error::{ExportError, Result};

/// Replace `range` of the original text with `replacement`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub range: Range<usize>,
    pub replacement: String,
}

impl Splice {
    /// Create a splice
    pub fn new(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Splice {
            range,
            replacement: replacement.into(),
        }
    }
}

/// Apply splices given in strictly decreasing start order.
///
/// Ranges must not overlap. The replacement is inserted verbatim and never
/// trimmed. Newlines next to a range are outside it, so a directive on its
/// own line keeps exactly one newline on each side and the replacement's own
/// leading or trailing blank lines survive. Mid-line splices get no padding.
pub fn apply_splices(text: &str, splices: Vec<Splice>) -> Result<String> {
    let mut segments: Vec<Cow<'_, str>> = Vec::with_capacity(splices.len() * 2 + 1);
    let mut right_edge = text.len();
    let mut previous_start: Option<usize> = None;

    for Splice { range, replacement } in splices {
        check_bounds(text, &range)?;

        if let Some(previous_start) = previous_start {
            if range.start >= previous_start || range.end > previous_start {
                return Err(ExportError::SpliceOrder {
                    start: range.start,
                    previous_start,
                });
            }
        }

        segments.push(Cow::Borrowed(&text[range.end..right_edge]));
        segments.push(Cow::Owned(replacement));

        right_edge = range.start;
        previous_start = Some(range.start);
    }

    segments.push(Cow::Borrowed(&text[..right_edge]));

    Ok(segments.into_iter().rev().collect())
}

fn check_bounds(text: &str, range: &Range<usize>) -> Result<()> {
    let in_bounds = range.start <= range.end
        && range.end <= text.len()
        && text.is_char_boundary(range.start)
        && text.is_char_boundary(range.end);

    if in_bounds {
        Ok(())
    } else {
        Err(ExportError::SpliceBounds {
            start: range.start,
            end: range.end,
            len: text.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_inline_splice() {
        let result = apply_splices("say ![[x]] now", vec![Splice::new(4..10, "hi")]).unwrap();
        assert_eq!(result, "say hi now");
    }

    #[test]
    fn test_descending_order_with_length_changes() {
        // directives at 5 and 50
        let text = format!("{}![[A]]{}![[B]]{}", "x".repeat(5), "y".repeat(39), "z");
        assert_eq!(&text[5..11], "![[A]]");
        assert_eq!(&text[50..56], "![[B]]");

        let splices = vec![
            Splice::new(50..56, "a much longer replacement for B"),
            Splice::new(5..11, "A"),
        ];
        let result = apply_splices(&text, splices).unwrap();
        assert_eq!(
            result,
            format!("{}A{}a much longer replacement for Bz", "x".repeat(5), "y".repeat(39))
        );
    }

    #[test]
    fn test_ascending_order_is_rejected() {
        let text = format!("{}![[A]]{}![[B]]", "x".repeat(5), "y".repeat(39));
        let splices = vec![
            Splice::new(5..11, "a much longer replacement for A"),
            Splice::new(50..56, "B"),
        ];
        let err = apply_splices(&text, splices).unwrap_err();
        assert!(matches!(err, ExportError::SpliceOrder { start: 50, previous_start: 5 }));
    }

    #[test]
    fn test_naive_ascending_splicing_corrupts_offsets() {
        let text = format!("{}![[A]]{}![[B]]", "x".repeat(5), "y".repeat(39));
        let mut naive = text.clone();
        naive.replace_range(5..11, "a much longer replacement for A");
        naive.replace_range(50..56, "B");

        let correct = apply_splices(
            &text,
            vec![
                Splice::new(50..56, "B"),
                Splice::new(5..11, "a much longer replacement for A"),
            ],
        )
        .unwrap();

        assert_ne!(naive, correct);
        assert!(correct.ends_with("yyyB"));
    }

    #[test]
    fn test_overlapping_splices_rejected() {
        let err = apply_splices("0123456789", vec![Splice::new(4..8, "a"), Splice::new(2..5, "b")]).unwrap_err();
        assert!(matches!(err, ExportError::SpliceOrder { .. }));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let err = apply_splices("short", vec![Splice::new(2..20, "x")]).unwrap_err();
        assert!(matches!(err, ExportError::SpliceBounds { end: 20, len: 5, .. }));
    }

    #[test]
    fn test_block_splice_inserts_replacement_verbatim() {
        let text = "before\n\n![[D]]\n\nafter";
        let result = apply_splices(text, vec![Splice::new(8..14, "\nbody\n")]).unwrap();
        assert_eq!(result, "before\n\n\nbody\n\n\nafter");
    }

    #[test]
    fn test_own_line_splice_keeps_edge_blank_lines() {
        let text = "a\n![[D]]\nb";
        let result = apply_splices(text, vec![Splice::new(2..8, "x\n\ny\n\n")]).unwrap();
        assert_eq!(result, "a\nx\n\ny\n\n\nb");
    }

    #[test]
    fn test_inline_splice_is_not_padded() {
        let result = apply_splices("a ![[D]] b", vec![Splice::new(2..8, "\nx\n")]).unwrap();
        assert_eq!(result, "a \nx\n b");
    }

    #[test]
    fn test_adjacent_replacements_are_not_merged() {
        let splices = vec![Splice::new(6..12, "\nB"), Splice::new(0..6, "A\n")];
        let result = apply_splices("![[A]]![[B]]", splices).unwrap();
        assert_eq!(result, "A\n\nB");
    }

    #[test]
    fn test_splices_on_consecutive_lines() {
        let text = "![[A]]\n![[B]]\n";
        let splices = vec![Splice::new(7..13, "bee\n"), Splice::new(0..6, "ay")];
        let result = apply_splices(text, splices).unwrap();
        assert_eq!(result, "ay\nbee\n\n");
    }

    #[test]
    fn test_no_splices() {
        assert_eq!(apply_splices("unchanged", Vec::new()).unwrap(), "unchanged");
    }
}
