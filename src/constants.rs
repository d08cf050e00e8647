//! Constants for emx-export
//!
//! Directive syntax, diagnostic formats, file names and environment
//! variables used throughout the codebase.

// === Directive Syntax ===

/// Separator between target path and scope
pub const SCOPE_SEPARATOR: char = '#';

/// Sigil marking a block-anchor scope or token
pub const BLOCK_SIGIL: char = '^';

// === Diagnostics ===

/// Inline diagnostic prefix when a link target has no document
pub const FILE_NOT_FOUND_PREFIX: &str = "[File not found: ";

/// Inline diagnostic prefix when a heading or block scope has no content
pub const CONTENT_NOT_FOUND_PREFIX: &str = "[Content not found: ";

/// Closing bracket of inline diagnostics
pub const DIAGNOSTIC_SUFFIX: &str = "]";

// === File and Directory Names ===

/// Default notes directory under the user's home
pub const DEFAULT_NOTES_DIR: &str = ".emx-notes";

/// Default capsa (vault) name under the notes directory
pub const DEFAULT_CAPSA_NAME: &str = ".default";

/// Settings file at the vault root
pub const SETTINGS_FILENAME: &str = ".emx-export.yaml";

/// Default extension for notes
pub const MARKDOWN_EXTENSION: &str = "md";

// === Environment ===

/// Base directory for all capsae
pub const ENV_NOTE_HOME: &str = "EMX_NOTE_HOME";

/// Default capsa name override
pub const ENV_NOTE_DEFAULT: &str = "EMX_NOTE_DEFAULT";

/// `[File not found: <target>]`
pub fn file_not_found(target: &str) -> String {
    format!("{}{}{}", FILE_NOT_FOUND_PREFIX, target, DIAGNOSTIC_SUFFIX)
}

/// `[Content not found: <target>#<scope>]`
pub fn content_not_found(target: &str, scope_raw: &str) -> String {
    format!(
        "{}{}{}{}{}",
        CONTENT_NOT_FOUND_PREFIX, target, SCOPE_SEPARATOR, scope_raw, DIAGNOSTIC_SUFFIX
    )
}
