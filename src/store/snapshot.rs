// Read-only: no mutation, no "update" methods.
// A document file is verified against the manifest once, on first load; every later query
// against the same store is answered from that verified copy.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::{Document, DocumentId, Section, SectionHeading, SectionPath};
use crate::retrieval::expander::collect_subtrees;
use crate::retrieval::matcher::matches_any;
use crate::store::{SectionStore, StoreError};
use crate::types::identifiers::ContentDigest;
use crate::types::Patterns;

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDocumentEntry {
    pub id: DocumentId,
    pub digest: ContentDigest,
    /// Relative to the snapshot root, e.g. `documents/38331.json`.
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotManifest {
    pub snapshot_version: String,
    pub created_at: DateTime<Utc>, // informational only
    pub document_count: usize,
    pub documents: Vec<SnapshotDocumentEntry>,
}

/// Contents of one document file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub document: Document,
    pub sections: Vec<Section>,
}

/// Directory of section trees exported by the ingestion pipeline:
///
/// ```text
/// <root>/manifest.json
/// <root>/documents/<file>.json
/// ```
#[derive(Debug)]
pub struct SnapshotStore {
    pub root: PathBuf,
    pub manifest: SnapshotManifest,
    loaded: Mutex<BTreeMap<DocumentId, Arc<SnapshotFile>>>,
}

impl SnapshotStore {
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        let manifest_path = root.join(MANIFEST_FILE);
        let bytes = fs::read(&manifest_path).map_err(|source| StoreError::Io {
            path: manifest_path.clone(),
            source,
        })?;
        let manifest: SnapshotManifest = serde_json::from_slice(&bytes)?;

        if manifest.document_count != manifest.documents.len() {
            return Err(StoreError::Integrity(format!(
                "Manifest declares {} documents but lists {}",
                manifest.document_count,
                manifest.documents.len()
            )));
        }

        let mut seen = BTreeSet::new();
        for entry in &manifest.documents {
            if !seen.insert(&entry.id) {
                return Err(StoreError::Integrity(format!(
                    "Duplicate document ID in manifest: {}",
                    entry.id
                )));
            }
        }

        tracing::debug!(
            root = %root.display(),
            documents = manifest.document_count,
            snapshot_version = %manifest.snapshot_version,
            "opened section snapshot"
        );

        Ok(SnapshotStore {
            root,
            manifest,
            loaded: Mutex::new(BTreeMap::new()),
        })
    }

    fn entry(&self, id: &DocumentId) -> Option<&SnapshotDocumentEntry> {
        self.manifest.documents.iter().find(|entry| &entry.id == id)
    }

    /// The verified contents of one document file. `Ok(None)` if the manifest does not
    /// list `id`.
    ///
    /// The file is read and checked on the first call for `id` only; later calls share that
    /// copy, so one store never mixes two versions of a document.
    pub fn load(&self, id: &DocumentId) -> Result<Option<Arc<SnapshotFile>>, StoreError> {
        let Some(entry) = self.entry(id) else {
            return Ok(None);
        };

        let mut loaded = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(file) = loaded.get(id) {
            return Ok(Some(Arc::clone(file)));
        }

        let file = Arc::new(self.read_verified(entry)?);
        loaded.insert(entry.id.clone(), Arc::clone(&file));
        tracing::debug!(
            document_id = %entry.id,
            file = %entry.file,
            "loaded snapshot document"
        );
        Ok(Some(file))
    }

    fn read_verified(&self, entry: &SnapshotDocumentEntry) -> Result<SnapshotFile, StoreError> {
        let path = self.root.join(&entry.file);
        let bytes = fs::read(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        let actual = ContentDigest::from_content(&bytes);
        if actual != entry.digest {
            return Err(StoreError::Integrity(format!(
                "Digest mismatch for {}: manifest says {}, content hashes to {}",
                entry.id, entry.digest, actual,
            )));
        }

        let file: SnapshotFile = serde_json::from_slice(&bytes)?;
        if file.document.id != entry.id {
            return Err(StoreError::Integrity(format!(
                "Document ID mismatch in {}: expected {}, found {}",
                entry.file, entry.id, file.document.id
            )));
        }

        Ok(file)
    }

    fn sections(&self, id: &DocumentId) -> Result<Vec<Section>, StoreError> {
        Ok(self
            .load(id)?
            .map(|file| file.sections.clone())
            .unwrap_or_default())
    }
}

impl SectionStore for SnapshotStore {
    fn resolve_document(&self, id: &DocumentId) -> Result<Option<Document>, StoreError> {
        Ok(self.load(id)?.map(|file| file.document.clone()))
    }

    fn find_sections_by_patterns(
        &self,
        document_id: &DocumentId,
        patterns: &Patterns,
    ) -> Result<Vec<SectionHeading>, StoreError> {
        let Some(file) = self.load(document_id)? else {
            return Ok(Vec::new());
        };
        Ok(file
            .sections
            .iter()
            .filter(|section| matches_any(&section.heading, patterns.iter()))
            .map(Section::as_heading)
            .collect())
    }

    fn find_subtree_sections(
        &self,
        document_id: &DocumentId,
        roots: &[SectionPath],
    ) -> Result<Vec<Section>, StoreError> {
        Ok(collect_subtrees(self.sections(document_id)?, roots))
    }
}
