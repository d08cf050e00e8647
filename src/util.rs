//! Utility functions for secure path handling

use std::path::{Path, PathBuf};

use crate::error::{ExportError, Result};

/// Resolve a vault-relative path, ensuring it stays within the vault directory.
///
/// `..` components that would climb above `base` and absolute paths are
/// rejected.
pub fn secure_path(base: &Path, relative: &str) -> Result<PathBuf> {
    let mut parts: Vec<&str> = Vec::new();

    for component in relative.split(['/', '\\']) {
        match component {
            "" | "." => continue,
            ".." => {
                if parts.pop().is_none() {
                    return Err(ExportError::InvalidPath(format!(
                        "'{}' escapes the vault directory",
                        relative
                    )));
                }
            }
            _ => {
                if component.len() >= 2 && component.as_bytes()[1] == b':' {
                    return Err(ExportError::InvalidPath(format!(
                        "'{}' is an absolute path",
                        relative
                    )));
                }
                parts.push(component);
            }
        }
    }

    if relative.starts_with('/') || relative.starts_with('\\') {
        return Err(ExportError::InvalidPath(format!(
            "'{}' is an absolute path",
            relative
        )));
    }

    let mut result = base.to_path_buf();
    result.extend(parts);
    Ok(result)
}

/// Normalize a link target: forward slashes, no surrounding space, no leading `./`
pub fn normalize_target(target: &str) -> String {
    let target = target.trim().replace('\\', "/");
    let mut rest = target.as_str();
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped;
    }
    rest.to_string()
}

/// Display a path with forward slashes (cross-platform standard)
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
