//! Embed resolution engine
//!
//! Rewrites a note so that every `![[...]]` directive is replaced with the
//! content it refers to. Directives are discovered in one pass over the
//! unmodified text, resolved one at a time from the rightmost to the
//! leftmost, and spliced back right to left. Content pulled in from another
//! note is inserted as-is: embeds inside it are not expanded.

use log::{debug, warn};

use crate::constants;
use crate::directive::{discover, EmbedDirective, Scope};
use crate::error::Result;
use crate::extract::{extract_block, extract_heading};
use crate::splice::{apply_splices, Splice};
use crate::vault::Vault;

/// Outcome of resolving one directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Content to insert
    Resolved(String),
    /// Nothing to insert; a diagnostic takes its place
    Unresolved(Unresolved),
}

/// Why a directive could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {
    /// The link target has no document
    FileNotFound,
    /// The document has no such heading or block
    ContentNotFound,
}

impl Resolution {
    /// Text to splice in place of `directive`
    pub fn into_text(self, directive: &EmbedDirective) -> String {
        match self {
            Resolution::Resolved(text) => text,
            Resolution::Unresolved(Unresolved::FileNotFound) => {
                constants::file_not_found(&directive.target)
            }
            Resolution::Unresolved(Unresolved::ContentNotFound) => {
                let scope = directive.scope.raw().unwrap_or_default();
                constants::content_not_found(&directive.target, &scope)
            }
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// Resolve a single directive against `vault`.
///
/// Missing documents and scopes yield [`Resolution::Unresolved`]; only
/// vault failures are errors.
pub async fn resolve_directive<V: Vault>(directive: &EmbedDirective, vault: &V) -> Result<Resolution> {
    let Some(doc) = vault.resolve_link(&directive.target).await? else {
        warn!("embed target not found: {}", directive.target);
        return Ok(Resolution::Unresolved(Unresolved::FileNotFound));
    };

    let text = vault.read_text(&doc).await?;

    let extracted = match &directive.scope {
        Scope::FullFile => Some(text),
        Scope::Heading(heading) => {
            let index = vault.structural_index(&doc).await?;
            extract_heading(&text, index.as_ref(), heading)
        }
        Scope::Block(id) => {
            let index = vault.structural_index(&doc).await?;
            extract_block(&text, index.as_ref(), id)
        }
    };

    match extracted {
        Some(content) => {
            debug!("resolved {} from {}", directive.display_target(), doc);
            Ok(Resolution::Resolved(content))
        }
        None => {
            warn!("embed content not found: {}", directive.display_target());
            Ok(Resolution::Unresolved(Unresolved::ContentNotFound))
        }
    }
}

/// Replace every embed directive in `text` with its resolved content.
///
/// Text without directives is returned unchanged. A vault failure aborts
/// the whole pass.
pub async fn resolve_embeds<V: Vault>(text: &str, vault: &V) -> Result<String> {
    let directives = discover(text);
    if directives.is_empty() {
        return Ok(text.to_string());
    }

    debug!("resolving {} embed(s)", directives.len());

    let mut splices = Vec::with_capacity(directives.len());
    for directive in directives.iter().rev() {
        let resolution = resolve_directive(directive, vault).await?;
        splices.push(Splice::new(directive.span.clone(), resolution.into_text(directive)));
    }

    apply_splices(text, splices)
}
