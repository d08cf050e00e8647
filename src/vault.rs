//! Document collaborators for embed resolution
//!
//! The engine needs three capabilities from whatever holds the notes:
//! resolve a link target to a document, read its text, and (optionally)
//! provide a structural index. [`FsVault`] serves a directory of Markdown
//! files; [`MemoryVault`] serves text already in memory.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::debug;

use crate::constants::MARKDOWN_EXTENSION;
use crate::error::{ExportError, Result};
use crate::index::StructuralIndex;
use crate::util;

/// Identifier of a document inside a vault (forward-slash relative path)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentRef {
    pub id: String,
}

impl DocumentRef {
    pub fn new(id: impl Into<String>) -> Self {
        DocumentRef { id: id.into() }
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Source of documents for embed resolution.
///
/// `Ok(None)` is an expected answer for both lookups; `Err` means the
/// storage itself failed and aborts the export.
#[allow(async_fn_in_trait)]
pub trait Vault {
    /// Resolve a human-readable link target to a document
    async fn resolve_link(&self, target: &str) -> Result<Option<DocumentRef>>;

    /// Read the full text of a document
    async fn read_text(&self, doc: &DocumentRef) -> Result<String>;

    /// Structural index of a document, if one is available
    async fn structural_index(&self, doc: &DocumentRef) -> Result<Option<StructuralIndex>>;
}

/// Candidate document ids for a link target: as written, then with `.md`
fn link_candidates(target: &str) -> Vec<String> {
    let mut candidates = vec![target.to_string()];
    if Path::new(target).extension().is_none() {
        candidates.push(format!("{}.{}", target, MARKDOWN_EXTENSION));
    }
    candidates
}

/// Whether vault-relative `id` matches `candidate` by trailing path components
fn suffix_matches(id: &str, candidate: &str) -> bool {
    let id = id.to_lowercase();
    let candidate = candidate.to_lowercase();
    id == candidate || id.ends_with(&format!("/{}", candidate))
}

// === FsVault ===

/// A vault backed by a directory of notes.
///
/// The most recently read document is kept so its index is built from the
/// same text the extractors run over.
#[derive(Debug)]
pub struct FsVault {
    root: PathBuf,
    use_index: bool,
    last_read: Mutex<Option<(String, String)>>,
}

impl FsVault {
    /// Open a vault rooted at `root`, which must be a directory
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let root = dunce::canonicalize(root).map_err(|e| ExportError::io(root, e))?;
        if !root.is_dir() {
            return Err(ExportError::io(
                &root,
                io::Error::new(io::ErrorKind::InvalidInput, "vault root is not a directory"),
            ));
        }

        Ok(FsVault {
            root,
            use_index: true,
            last_read: Mutex::new(None),
        })
    }

    /// Enable or disable serving structural indexes
    pub fn with_index(mut self, use_index: bool) -> Self {
        self.use_index = use_index;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a document
    pub fn path_of(&self, doc: &DocumentRef) -> Result<PathBuf> {
        util::secure_path(&self.root, &doc.id)
    }

    async fn is_file(path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    /// All non-hidden files under the root, as sorted relative ids
    pub async fn list_documents(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir)
                .await
                .map_err(|e| ExportError::io(&dir, e))?;

            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| ExportError::io(&dir, e))?
            {
                if entry.file_name().to_string_lossy().starts_with('.') {
                    continue;
                }

                let path = entry.path();
                let file_type = entry
                    .file_type()
                    .await
                    .map_err(|e| ExportError::io(&path, e))?;

                if file_type.is_dir() {
                    pending.push(path);
                } else if file_type.is_file() {
                    if let Ok(relative) = path.strip_prefix(&self.root) {
                        ids.push(util::display_path(relative));
                    }
                }
            }
        }

        ids.sort();
        Ok(ids)
    }
}

impl Vault for FsVault {
    async fn resolve_link(&self, target: &str) -> Result<Option<DocumentRef>> {
        let target = util::normalize_target(target);
        if target.is_empty() {
            return Ok(None);
        }

        let candidates = link_candidates(&target);

        for candidate in &candidates {
            let path = match util::secure_path(&self.root, candidate) {
                Ok(path) => path,
                Err(e) => {
                    debug!("link '{}' rejected: {}", target, e);
                    return Ok(None);
                }
            };
            if Self::is_file(&path).await {
                debug!("link '{}' resolved to '{}'", target, candidate);
                return Ok(Some(DocumentRef::new(candidate.as_str())));
            }
        }

        let documents = self.list_documents().await?;
        let found = documents
            .into_iter()
            .filter(|id| candidates.iter().any(|c| suffix_matches(id, c)))
            .min_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

        if let Some(id) = &found {
            debug!("link '{}' resolved by name to '{}'", target, id);
        }

        Ok(found.map(DocumentRef::new))
    }

    async fn read_text(&self, doc: &DocumentRef) -> Result<String> {
        let path = self.path_of(doc)?;
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ExportError::io(path, e))?;

        if self.use_index {
            if let Ok(mut last) = self.last_read.lock() {
                *last = Some((doc.id.clone(), text.clone()));
            }
        }
        Ok(text)
    }

    async fn structural_index(&self, doc: &DocumentRef) -> Result<Option<StructuralIndex>> {
        if !self.use_index {
            return Ok(None);
        }

        let cached = self
            .last_read
            .lock()
            .ok()
            .and_then(|mut last| match last.take() {
                Some((id, text)) if id == doc.id => Some(text),
                _ => None,
            });

        let text = match cached {
            Some(text) => text,
            None => {
                debug!("no cached text for '{}', reading", doc);
                self.read_text(doc).await?
            }
        };
        Ok(Some(StructuralIndex::from_text(&text)))
    }
}

// === MemoryVault ===

#[derive(Debug, Clone)]
struct MemoryDocument {
    text: String,
    index: Option<StructuralIndex>,
}

/// A vault holding documents in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryVault {
    documents: BTreeMap<String, MemoryDocument>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with an index built from its text
    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        let index = Some(StructuralIndex::from_text(&text));
        self.documents.insert(id.into(), MemoryDocument { text, index });
        self
    }

    /// Add a document without an index (lookups take the fallback paths)
    pub fn insert_unindexed(&mut self, id: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.documents.insert(
            id.into(),
            MemoryDocument {
                text: text.into(),
                index: None,
            },
        );
        self
    }

    /// Add a document with an explicit index
    pub fn insert_with_index(
        &mut self,
        id: impl Into<String>,
        text: impl Into<String>,
        index: StructuralIndex,
    ) -> &mut Self {
        self.documents.insert(
            id.into(),
            MemoryDocument {
                text: text.into(),
                index: Some(index),
            },
        );
        self
    }

    fn document(&self, doc: &DocumentRef) -> Result<&MemoryDocument> {
        self.documents
            .get(&doc.id)
            .ok_or_else(|| ExportError::NoteNotFound(doc.id.clone()))
    }
}

impl Vault for MemoryVault {
    async fn resolve_link(&self, target: &str) -> Result<Option<DocumentRef>> {
        let target = util::normalize_target(target);
        let candidates = link_candidates(&target);

        if let Some(id) = candidates.iter().find(|c| self.documents.contains_key(c.as_str())) {
            return Ok(Some(DocumentRef::new(id.as_str())));
        }

        Ok(self
            .documents
            .keys()
            .find(|id| candidates.iter().any(|c| suffix_matches(id, c)))
            .map(|id| DocumentRef::new(id.as_str())))
    }

    async fn read_text(&self, doc: &DocumentRef) -> Result<String> {
        Ok(self.document(doc)?.text.clone())
    }

    async fn structural_index(&self, doc: &DocumentRef) -> Result<Option<StructuralIndex>> {
        Ok(self.document(doc)?.index.clone())
    }
}
