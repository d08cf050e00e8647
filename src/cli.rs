use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;

/// emx-export - Flatten Markdown notes for export
///
/// Strips front matter and block anchors, then inlines embeds:
///
/// ```text
/// ![[Note]]            whole note
/// ![[Note#Heading]]    section under a heading
/// ![[Note#^block]]     single anchored line
/// ```
///
/// ## Examples
///
/// ```bash
/// emx-export export "Project Plan"               # Print flattened note
/// emx-export export "Project Plan" -o plan.md    # Write to file
/// emx-export --vault ~/vault export Daily        # Use a specific vault directory
/// emx-export embeds "Project Plan" --json        # List embeds and their status
/// emx-export index "Project Plan"                # Show headings and block anchors
/// ```
///
/// ## Environment Variables
///
/// - `EMX_NOTE_HOME`: Base directory for all capsae (default: ~/.emx-notes)
/// - `EMX_NOTE_DEFAULT`: Default capsa name (overrides .default)
/// - `RUST_LOG`: Log filter (e.g. `emx_export=debug`)
///
/// ## Settings
///
/// `.emx-export.yaml` at the vault root:
///
/// ```yaml
/// remove-metadata: true
/// remove-block-ids: true
/// resolve-embeds: true
/// use-index: true
/// ```
#[derive(Parser, Debug)]
#[command(name = "emx-export")]
#[command(version)]
#[command(about = "Flatten Markdown notes for export")]
pub struct Cli {
    /// Vault directory (overrides --home/--caps)
    #[arg(long, value_name = "PATH", global = true)]
    pub vault: Option<PathBuf>,

    /// Home directory for all notes (default: ~/.emx-notes or $EMX_NOTE_HOME)
    #[arg(long, value_name = "PATH", global = true)]
    pub home: Option<String>,

    /// Name of the capsa (note collection) inside the home directory
    #[arg(short, long, value_name = "CAPSA", global = true)]
    pub caps: Option<String>,

    /// Output in JSON format (for scripting)
    #[arg(short = 'j', long, global = true)]
    pub json: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export a note with front matter stripped and embeds inlined
    #[command(alias = "x")]
    Export {
        /// Note reference (link target, as in `[[...]]`)
        note_name: String,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        flags: ExportFlags,
    },

    /// List the embeds in a note and whether they resolve
    Embeds {
        /// Note reference
        note_name: String,

        #[command(flatten)]
        flags: ExportFlags,
    },

    /// Print the structural index (headings, block anchors) of a note
    Index {
        /// Note reference
        note_name: String,
    },
}

/// Flags that turn export stages off
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ExportFlags {
    /// Keep the front-matter block
    #[arg(long)]
    pub keep_metadata: bool,

    /// Keep trailing `^id` block anchors
    #[arg(long)]
    pub keep_block_ids: bool,

    /// Do not inline embeds
    #[arg(long)]
    pub no_embeds: bool,

    /// Ignore structural indexes and scan note text instead
    #[arg(long)]
    pub no_index: bool,
}

impl From<ExportFlags> for Overrides {
    fn from(flags: ExportFlags) -> Self {
        Overrides {
            keep_metadata: flags.keep_metadata,
            keep_block_ids: flags.keep_block_ids,
            no_embeds: flags.no_embeds,
            no_index: flags.no_index,
        }
    }
}
