#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{TimeZone, Utc};
use section_retrieval::document::{Document, DocumentId, Section, SectionHeading, SectionPath};
use section_retrieval::store::{
    MemoryStore, SectionStore, SnapshotDocumentEntry, SnapshotFile, SnapshotManifest, StoreError,
};
use section_retrieval::types::{ContentDigest, Patterns};

pub const RRC_ID: &str = "6f1c1d0e-38331";

pub fn path(raw: &str) -> SectionPath {
    SectionPath::parse(raw).unwrap()
}

pub fn section(raw_path: &str, heading: &str, level: u32, content: &str) -> Section {
    Section::new(path(raw_path), heading, level, content)
}

pub fn rrc_document() -> Document {
    Document::new(DocumentId::new(RRC_ID), "38.331", "17.3.0", 17)
        .with_extracted_at(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
}

/// The three-section document of the reference scenario.
pub fn scenario_sections() -> Vec<Section> {
    vec![
        section("A", "5.2 Random Access", 1, "Intro text"),
        section("A.1", "5.2.1 Contention", 2, "Detail"),
        section("B", "5.3 Other", 1, "Unrelated"),
    ]
}

/// A deeper tree with numeric paths, stored out of order.
pub fn deep_sections() -> Vec<Section> {
    vec![
        section("5.2.10", "5.2.10 Late sibling", 3, "tenth"),
        section("5", "5 Procedures", 1, "Overview of procedures."),
        section("5.2", "5.2 Random Access", 2, "RA intro"),
        section("5.20", "5.20 Unrelated twentieth", 2, "must not leak"),
        section("5.2.2", "5.2.2 Contention free", 3, ""),
        section("5.2.1", "5.2.1 Contention based", 3, "CB body"),
        section("5.2.1.1", "5.2.1.1 Msg1", 4, "   preamble   "),
        section("5.3", "5.3 Paging", 2, "paging body"),
        section("6", "6 Messages", 1, "ASN.1"),
    ]
}

pub fn scenario_store() -> MemoryStore {
    MemoryStore::new()
        .with_document(rrc_document(), scenario_sections())
        .unwrap()
}

pub fn deep_store() -> MemoryStore {
    MemoryStore::new()
        .with_document(rrc_document(), deep_sections())
        .unwrap()
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn patterns(items: &[&str]) -> Patterns {
    Patterns::new(strings(items)).unwrap()
}

/// Writes a snapshot directory the way the export pipeline lays it out.
pub fn write_snapshot(root: &Path, files: &[SnapshotFile]) {
    fs::create_dir_all(root.join("documents")).unwrap();

    let mut documents = Vec::new();
    for (i, file) in files.iter().enumerate() {
        let relative = format!("documents/{i:04}.json");
        let bytes = serde_json::to_vec_pretty(file).unwrap();
        fs::write(root.join(&relative), &bytes).unwrap();
        documents.push(SnapshotDocumentEntry {
            id: file.document.id.clone(),
            digest: ContentDigest::from_content(&bytes),
            file: relative,
        });
    }

    let manifest = SnapshotManifest {
        snapshot_version: "sha256:fixture".into(),
        created_at: Utc.timestamp_opt(0, 0).unwrap(),
        document_count: documents.len(),
        documents,
    };
    fs::write(
        root.join("manifest.json"),
        serde_json::to_vec_pretty(&manifest).unwrap(),
    )
    .unwrap();
}

/// Store whose every query fails, as a dropped connection would.
pub struct UnavailableStore;

impl SectionStore for UnavailableStore {
    fn resolve_document(&self, _id: &DocumentId) -> Result<Option<Document>, StoreError> {
        Err(StoreError::Unavailable("connection reset by peer".into()))
    }

    fn find_sections_by_patterns(
        &self,
        _document_id: &DocumentId,
        _patterns: &Patterns,
    ) -> Result<Vec<SectionHeading>, StoreError> {
        Err(StoreError::Unavailable("connection reset by peer".into()))
    }

    fn find_subtree_sections(
        &self,
        _document_id: &DocumentId,
        _roots: &[SectionPath],
    ) -> Result<Vec<Section>, StoreError> {
        Err(StoreError::Unavailable("connection reset by peer".into()))
    }
}

/// Wraps a store and counts queries.
pub struct CountingStore<S> {
    pub inner: S,
    pub calls: AtomicUsize,
}

impl<S> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<S: SectionStore> SectionStore for CountingStore<S> {
    fn resolve_document(&self, id: &DocumentId) -> Result<Option<Document>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.resolve_document(id)
    }

    fn find_sections_by_patterns(
        &self,
        document_id: &DocumentId,
        patterns: &Patterns,
    ) -> Result<Vec<SectionHeading>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_sections_by_patterns(document_id, patterns)
    }

    fn find_subtree_sections(
        &self,
        document_id: &DocumentId,
        roots: &[SectionPath],
    ) -> Result<Vec<Section>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_subtree_sections(document_id, roots)
    }
}

/// Store that answers the subtree query with a fixed row set, whatever the roots.
pub struct FixedSubtreeStore {
    pub inner: MemoryStore,
    pub subtree_rows: Vec<Section>,
}

impl SectionStore for FixedSubtreeStore {
    fn resolve_document(&self, id: &DocumentId) -> Result<Option<Document>, StoreError> {
        self.inner.resolve_document(id)
    }

    fn find_sections_by_patterns(
        &self,
        document_id: &DocumentId,
        patterns: &Patterns,
    ) -> Result<Vec<SectionHeading>, StoreError> {
        self.inner.find_sections_by_patterns(document_id, patterns)
    }

    fn find_subtree_sections(
        &self,
        _document_id: &DocumentId,
        _roots: &[SectionPath],
    ) -> Result<Vec<Section>, StoreError> {
        Ok(self.subtree_rows.clone())
    }
}
