//! Embed directive discovery
//!
//! Finds `![[path]]`, `![[path#Heading]]` and `![[path#^block]]` markers in
//! one left-to-right pass over unmodified text.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::constants::{BLOCK_SIGIL, SCOPE_SEPARATOR};

/// `!` `[[` path [`#` scope] `]]`, path stops at the first `#` or `]]`
static EMBED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[\[((?:[^#\]\n]|\][^\]#\n])*?\]?)(?:#(.*?))?\]\]").unwrap());

/// What part of the target document an embed refers to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Scope {
    /// The whole document
    FullFile,
    /// The section under a heading (heading text as written)
    Heading(String),
    /// A single anchored line (anchor id without `^`)
    Block(String),
}

impl Scope {
    /// Classify the text after `#`
    pub fn classify(scope: Option<&str>) -> Self {
        match scope {
            None => Scope::FullFile,
            Some(s) => match s.strip_prefix(BLOCK_SIGIL) {
                Some(id) => Scope::Block(id.to_string()),
                None => Scope::Heading(s.to_string()),
            },
        }
    }

    /// The scope as it appears after `#` in a directive
    pub fn raw(&self) -> Option<String> {
        match self {
            Scope::FullFile => None,
            Scope::Heading(heading) => Some(heading.clone()),
            Scope::Block(id) => Some(format!("{}{}", BLOCK_SIGIL, id)),
        }
    }
}

/// An embed directive found in source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedDirective {
    /// Byte range of the whole `![[...]]` in the source text
    pub span: Range<usize>,
    /// Link target, trimmed
    pub target: String,
    pub scope: Scope,
}

impl EmbedDirective {
    /// `target#scope` as written, used in diagnostics
    pub fn display_target(&self) -> String {
        match self.scope.raw() {
            Some(raw) => format!("{}{}{}", self.target, SCOPE_SEPARATOR, raw),
            None => self.target.clone(),
        }
    }
}

/// Find all embed directives in `text`, left to right.
///
/// Spans are non-overlapping and refer to `text` as given.
pub fn discover(text: &str) -> Vec<EmbedDirective> {
    EMBED_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let target = caps.get(1).map_or("", |m| m.as_str()).trim();
            let scope = caps.get(2).map(|m| m.as_str().trim());

            Some(EmbedDirective {
                span: whole.range(),
                target: target.to_string(),
                scope: Scope::classify(scope),
            })
        })
        .collect()
}
