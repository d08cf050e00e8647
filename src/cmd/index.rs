use std::path::Path;

use emx_export::{ResolveContext, Result, StructuralIndex, Vault};

pub async fn run(
    ctx: &ResolveContext,
    vault: Option<&Path>,
    caps: Option<&str>,
    note_name: String,
    json: bool,
) -> Result<()> {
    let (vault, _) = super::resolve::open_vault(ctx, vault, caps, Default::default())?;
    let doc = super::resolve::resolve_note(&vault, &note_name).await?;
    let index = StructuralIndex::from_text(&vault.read_text(&doc).await?);

    if json {
        println!("{}", serde_json::to_string_pretty(&index)?);
        return Ok(());
    }

    println!("{}", doc);
    for heading in &index.headings {
        println!(
            "  {:>4}  {} {}",
            heading.start_line + 1,
            "#".repeat(heading.level as usize),
            heading.text
        );
    }
    for (id, block) in &index.blocks {
        println!("  {:>4}  ^{}", block.start_line + 1, id);
    }

    Ok(())
}
