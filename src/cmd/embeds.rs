//! List embeds in a note along with their resolution status

use std::path::Path;

use serde::Serialize;

use emx_export::cli::ExportFlags;
use emx_export::{
    discover, resolve_directive, strip, EmbedDirective, Resolution, ResolveContext, Result, Unresolved,
    Vault,
};

#[derive(Serialize)]
struct EmbedReport<'a> {
    #[serde(flatten)]
    directive: &'a EmbedDirective,
    status: &'static str,
}

fn status(resolution: &Resolution) -> &'static str {
    match resolution {
        Resolution::Resolved(_) => "ok",
        Resolution::Unresolved(Unresolved::FileNotFound) => "file-not-found",
        Resolution::Unresolved(Unresolved::ContentNotFound) => "content-not-found",
    }
}

pub async fn run(
    ctx: &ResolveContext,
    vault: Option<&Path>,
    caps: Option<&str>,
    note_name: String,
    flags: ExportFlags,
    json: bool,
) -> Result<()> {
    let (vault, options) = super::resolve::open_vault(ctx, vault, caps, flags.into())?;
    let doc = super::resolve::resolve_note(&vault, &note_name).await?;
    let text = vault.read_text(&doc).await?;

    // Spans refer to the text the engine would see
    let text = strip(&text, options.remove_metadata, options.remove_block_ids);
    let directives = discover(&text);

    let mut reports = Vec::with_capacity(directives.len());
    for directive in &directives {
        let resolution = resolve_directive(directive, &vault).await?;
        reports.push(EmbedReport {
            directive,
            status: status(&resolution),
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    if reports.is_empty() {
        println!("No embeds in {}", doc);
    }
    for report in &reports {
        println!(
            "{}..{}\t{}\t{}",
            report.directive.span.start,
            report.directive.span.end,
            report.directive.display_target(),
            report.status
        );
    }

    Ok(())
}
