//! Structural index of a note: headings and block anchors with line positions

use std::collections::BTreeMap;

use serde::Serialize;

/// A heading in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingEntry {
    /// Heading text content
    pub text: String,
    /// Heading level (1-6)
    pub level: u8,
    /// Zero-based line the heading starts on
    pub start_line: usize,
}

/// Position of a block anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockEntry {
    /// Zero-based line carrying the anchor
    pub start_line: usize,
}

/// Precomputed outline of one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuralIndex {
    pub headings: Vec<HeadingEntry>,
    /// Anchor id (without `^`) to its position
    pub blocks: BTreeMap<String, BlockEntry>,
}

impl StructuralIndex {
    /// Build an index by parsing note text
    pub fn from_text(text: &str) -> Self {
        crate::markdown::build_index(text)
    }

    /// First heading whose text matches `name`, ignoring case
    pub fn find_heading(&self, name: &str) -> Option<&HeadingEntry> {
        let wanted = name.to_lowercase();
        self.headings
            .iter()
            .find(|heading| heading.text.to_lowercase() == wanted)
    }

    /// Block anchor by id
    pub fn block(&self, id: &str) -> Option<&BlockEntry> {
        self.blocks.get(id)
    }
}
