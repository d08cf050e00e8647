use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::info;

use emx_export::cli::ExportFlags;
use emx_export::{export_note, util, ExportError, ResolveContext, Result};

pub async fn run(
    ctx: &ResolveContext,
    vault: Option<&Path>,
    caps: Option<&str>,
    note_name: String,
    output: Option<PathBuf>,
    flags: ExportFlags,
) -> Result<()> {
    let (vault, options) = super::resolve::open_vault(ctx, vault, caps, flags.into())?;
    let text = export_note(&vault, &note_name, &options).await?;

    match output {
        Some(path) => {
            tokio::fs::write(&path, text)
                .await
                .map_err(|e| ExportError::io(&path, e))?;
            info!("wrote {}", util::display_path(&path));
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|e| ExportError::io("<stdout>", e))?;
        }
    }

    Ok(())
}
