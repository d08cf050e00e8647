//! Vault path resolution
//!
//! Locates the vault directory an export reads from:
//! - `--vault PATH` wins outright
//! - otherwise `<home>/<capsa>`, where home is `--home`, `EMX_NOTE_HOME`
//!   or `~/.emx-notes`, and capsa is `--caps`, `EMX_NOTE_DEFAULT` or `.default`

use std::io;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_CAPSA_NAME, DEFAULT_NOTES_DIR, ENV_NOTE_DEFAULT, ENV_NOTE_HOME};
use crate::error::{ExportError, Result};

/// Base notes directory: explicit, then `EMX_NOTE_HOME`, then `~/.emx-notes`
pub fn notes_path(home: Option<&str>) -> PathBuf {
    if let Some(home) = home {
        return PathBuf::from(home);
    }

    if let Some(env_home) = std::env::var(ENV_NOTE_HOME).ok().filter(|s| !s.is_empty()) {
        return PathBuf::from(env_home);
    }

    dirs::home_dir()
        .map(|p| p.join(DEFAULT_NOTES_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_NOTES_DIR))
}

/// Resolution context for locating vaults
#[derive(Debug, Clone)]
pub struct ResolveContext {
    /// The base notes directory
    pub home: PathBuf,
    /// The explicitly specified default capsa name (EMX_NOTE_DEFAULT)
    pub default_override: Option<String>,
}

impl ResolveContext {
    /// Create a new resolve context
    pub fn new(home: PathBuf) -> Self {
        // Treat empty strings as None
        let default_override = std::env::var(ENV_NOTE_DEFAULT)
            .ok()
            .filter(|s| !s.is_empty());

        Self {
            home,
            default_override,
        }
    }

    /// Default capsa name: `EMX_NOTE_DEFAULT`, else `.default`
    pub fn default_capsa_name(&self) -> String {
        self.default_override
            .clone()
            .unwrap_or_else(|| DEFAULT_CAPSA_NAME.to_string())
    }

    /// Vault directory for an explicit path or a capsa name
    pub fn vault_path(&self, vault: Option<&Path>, caps: Option<&str>) -> Result<PathBuf> {
        let path = match vault {
            Some(path) => path.to_path_buf(),
            None => {
                let name = caps.map_or_else(|| self.default_capsa_name(), str::to_string);
                if name.contains(['/', '\\']) || name == ".." {
                    return Err(ExportError::InvalidPath(format!(
                        "capsa name '{}' must not contain path separators",
                        name
                    )));
                }
                self.home.join(name)
            }
        };

        if !path.is_dir() {
            return Err(ExportError::io(
                &path,
                io::Error::new(io::ErrorKind::NotFound, "vault directory not found"),
            ));
        }

        Ok(dunce::canonicalize(&path).unwrap_or(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn test_context(home: &Path) -> ResolveContext {
        ResolveContext {
            home: home.to_path_buf(),
            default_override: None,
        }
    }

    #[test]
    fn test_notes_path_explicit() {
        assert_eq!(notes_path(Some("/tmp/notes")), PathBuf::from("/tmp/notes"));
    }

    #[test]
    fn test_default_capsa_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = test_context(dir.path());
        assert_eq!(ctx.default_capsa_name(), DEFAULT_CAPSA_NAME);
        ctx.default_override = Some("work".to_string());
        assert_eq!(ctx.default_capsa_name(), "work");
    }

    #[test]
    fn test_vault_path_by_capsa() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("work")).unwrap();
        fs::create_dir_all(dir.path().join(DEFAULT_CAPSA_NAME)).unwrap();
        let ctx = test_context(dir.path());

        let work = ctx.vault_path(None, Some("work")).unwrap();
        assert!(work.ends_with("work"));
        let default = ctx.vault_path(None, None).unwrap();
        assert!(default.ends_with(DEFAULT_CAPSA_NAME));
    }

    #[test]
    fn test_vault_path_explicit_wins() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("elsewhere");
        fs::create_dir_all(&explicit).unwrap();
        let ctx = test_context(dir.path());

        let path = ctx.vault_path(Some(&explicit), Some("ignored")).unwrap();
        assert!(path.ends_with("elsewhere"));
    }

    #[test]
    fn test_vault_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = test_context(dir.path());
        assert!(matches!(ctx.vault_path(None, Some("missing")), Err(ExportError::Io { .. })));
        assert!(matches!(ctx.vault_path(None, Some("../x")), Err(ExportError::InvalidPath(_))));
    }
}
