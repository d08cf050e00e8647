//! Export pipeline: strip, then inline embeds

use log::info;

use crate::config::ExportOptions;
use crate::embed::resolve_embeds;
use crate::error::{ExportError, Result};
use crate::strip::strip;
use crate::vault::Vault;

/// Flatten note text for export
pub async fn export_text<V: Vault>(text: &str, vault: &V, options: &ExportOptions) -> Result<String> {
    let stripped = strip(text, options.remove_metadata, options.remove_block_ids);

    if !options.resolve_embeds {
        return Ok(stripped);
    }

    resolve_embeds(&stripped, vault).await
}

/// Resolve, read and flatten a note by link target
pub async fn export_note<V: Vault>(vault: &V, target: &str, options: &ExportOptions) -> Result<String> {
    let doc = vault
        .resolve_link(target)
        .await?
        .ok_or_else(|| ExportError::NoteNotFound(target.to_string()))?;

    info!("exporting {}", doc);

    let text = vault.read_text(&doc).await?;
    export_text(&text, vault, options).await
}
