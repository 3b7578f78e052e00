//! Read-side section store capability.
//!
//! The surrounding system owns the real store and its connection lifecycle; retrieval only
//! borrows a handle for the duration of one call. Two implementations ship with the crate:
//! [`MemoryStore`] and the directory-backed [`SnapshotStore`].

pub mod memory;
pub mod snapshot;

use std::path::PathBuf;

use thiserror::Error;

use crate::document::{Document, DocumentId, Section, SectionHeading, SectionPath};
use crate::types::Patterns;

pub use memory::MemoryStore;
pub use snapshot::{SnapshotDocumentEntry, SnapshotFile, SnapshotManifest, SnapshotStore};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Store integrity error: {0}")]
    Integrity(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub trait SectionStore {
    /// `Ok(None)` when no document has this id.
    fn resolve_document(&self, id: &DocumentId) -> Result<Option<Document>, StoreError>;

    /// Sections whose heading matches any pattern under
    /// [`crate::retrieval::matcher::heading_matches`].
    fn find_sections_by_patterns(
        &self,
        document_id: &DocumentId,
        patterns: &Patterns,
    ) -> Result<Vec<SectionHeading>, StoreError>;

    /// Every section lying in the subtree of any of `roots`, sorted by path.
    fn find_subtree_sections(
        &self,
        document_id: &DocumentId,
        roots: &[SectionPath],
    ) -> Result<Vec<Section>, StoreError>;
}

impl<T: SectionStore + ?Sized> SectionStore for &T {
    fn resolve_document(&self, id: &DocumentId) -> Result<Option<Document>, StoreError> {
        (**self).resolve_document(id)
    }

    fn find_sections_by_patterns(
        &self,
        document_id: &DocumentId,
        patterns: &Patterns,
    ) -> Result<Vec<SectionHeading>, StoreError> {
        (**self).find_sections_by_patterns(document_id, patterns)
    }

    fn find_subtree_sections(
        &self,
        document_id: &DocumentId,
        roots: &[SectionPath],
    ) -> Result<Vec<Section>, StoreError> {
        (**self).find_subtree_sections(document_id, roots)
    }
}
