pub mod cli;
pub mod config;
pub mod constants;
pub mod directive;
pub mod embed;
pub mod error;
pub mod export;
pub mod extract;
pub mod index;
pub mod markdown;
pub mod resolve;
pub mod splice;
pub mod strip;
pub mod util;
pub mod vault;

pub use cli::{Cli, Command};
pub use config::{ExportOptions, Overrides};
pub use directive::{discover, EmbedDirective, Scope};
pub use embed::{resolve_directive, resolve_embeds, Resolution, Unresolved};
pub use error::{ExportError, Result};
pub use export::{export_note, export_text};
pub use index::{BlockEntry, HeadingEntry, StructuralIndex};
pub use resolve::{notes_path, ResolveContext};
pub use strip::strip;
pub use vault::{DocumentRef, FsVault, MemoryVault, Vault};
