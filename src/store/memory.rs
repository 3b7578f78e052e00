use std::collections::BTreeMap;

use crate::document::{Document, DocumentId, Section, SectionHeading, SectionPath};
use crate::retrieval::expander::collect_subtrees;
use crate::retrieval::matcher::matches_any;
use crate::store::{SectionStore, StoreError};
use crate::types::Patterns;

#[derive(Debug, Clone)]
struct StoredDocument {
    document: Document,
    sections: Vec<Section>,
}

/// In-process store over already-built section trees.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: BTreeMap<DocumentId, StoredDocument>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a document with its sections, replacing any previous entry with the same id.
    /// Fails if two sections share a path.
    pub fn insert(&mut self, document: Document, sections: Vec<Section>) -> Result<(), StoreError> {
        let mut paths: Vec<&SectionPath> = sections.iter().map(|s| &s.path).collect();
        paths.sort();
        if let Some(pair) = paths.windows(2).find(|w| w[0] == w[1]) {
            return Err(StoreError::Integrity(format!(
                "Duplicate section path '{}' in document '{}'",
                pair[0], document.id
            )));
        }

        self.documents.insert(
            document.id.clone(),
            StoredDocument { document, sections },
        );
        Ok(())
    }

    pub fn with_document(
        mut self,
        document: Document,
        sections: Vec<Section>,
    ) -> Result<Self, StoreError> {
        self.insert(document, sections)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn sections_of(&self, document_id: &DocumentId) -> &[Section] {
        self.documents
            .get(document_id)
            .map(|stored| stored.sections.as_slice())
            .unwrap_or(&[])
    }
}

impl SectionStore for MemoryStore {
    fn resolve_document(&self, id: &DocumentId) -> Result<Option<Document>, StoreError> {
        Ok(self.documents.get(id).map(|stored| stored.document.clone()))
    }

    fn find_sections_by_patterns(
        &self,
        document_id: &DocumentId,
        patterns: &Patterns,
    ) -> Result<Vec<SectionHeading>, StoreError> {
        Ok(self
            .sections_of(document_id)
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
        Ok(collect_subtrees(self.sections_of(document_id).iter().cloned(), roots))
    }
}
