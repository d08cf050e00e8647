//! Error types for emx-export

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type used across the crate
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that abort an export.
///
/// Unresolvable embeds are not errors: they degrade to inline diagnostic
/// text. Only infrastructure failures end up here.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Invalid settings file '{}': {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Splice at {start} must end before the previous splice at {previous_start}")]
    SpliceOrder { start: usize, previous_start: usize },

    #[error("Splice range {start}..{end} is out of bounds for text of length {len}")]
    SpliceBounds { start: usize, end: usize, len: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExportError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}
