//! Export settings
//!
//! Read from `.emx-export.yaml` at the vault root; command-line flags
//! override individual values.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::SETTINGS_FILENAME;
use crate::error::{ExportError, Result};

/// What an export strips and resolves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ExportOptions {
    /// Drop the leading front-matter block
    pub remove_metadata: bool,
    /// Drop trailing `^id` anchors from every line
    pub remove_block_ids: bool,
    /// Inline `![[...]]` embeds
    pub resolve_embeds: bool,
    /// Serve structural indexes from the vault (off forces text scanning)
    pub use_index: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            remove_metadata: true,
            remove_block_ids: true,
            resolve_embeds: true,
            use_index: true,
        }
    }
}

impl ExportOptions {
    /// Load settings from a vault root. A missing file yields defaults.
    pub fn load(vault_root: &Path) -> Result<Self> {
        let path = vault_root.join(SETTINGS_FILENAME);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ExportError::io(path, e)),
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|source| ExportError::Config { path, source })
    }
}

/// Command-line overrides; each flag can only turn a feature off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub keep_metadata: bool,
    pub keep_block_ids: bool,
    pub no_embeds: bool,
    pub no_index: bool,
}

impl Overrides {
    /// Apply to loaded settings
    pub fn apply(self, mut options: ExportOptions) -> ExportOptions {
        if self.keep_metadata {
            options.remove_metadata = false;
        }
        if self.keep_block_ids {
            options.remove_block_ids = false;
        }
        if self.no_embeds {
            options.resolve_embeds = false;
        }
        if self.no_index {
            options.use_index = false;
        }
        options
    }
}
