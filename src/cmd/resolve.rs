//! Vault and settings resolution for commands

use std::path::Path;

use log::debug;

use emx_export::{util, DocumentRef, ExportError, ExportOptions, FsVault, Overrides, ResolveContext, Result, Vault};

/// Open the selected vault and load its export settings with overrides applied
pub fn open_vault(
    ctx: &ResolveContext,
    vault: Option<&Path>,
    caps: Option<&str>,
    overrides: Overrides,
) -> Result<(FsVault, ExportOptions)> {
    let root = ctx.vault_path(vault, caps)?;
    debug!("vault: {}", util::display_path(&root));

    let options = overrides.apply(ExportOptions::load(&root)?);
    debug!("options: {:?}", options);

    let vault = FsVault::open(&root)?.with_index(options.use_index);
    Ok((vault, options))
}

/// Resolve a note reference or fail with `NoteNotFound`
pub async fn resolve_note(vault: &FsVault, note_name: &str) -> Result<DocumentRef> {
    vault
        .resolve_link(note_name)
        .await?
        .ok_or_else(|| ExportError::NoteNotFound(note_name.to_string()))
}
