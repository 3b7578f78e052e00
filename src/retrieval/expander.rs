//! Subtree expansion: every section that is a matched section or lies below one, once each,
//! in document order.

use crate::document::{Document, Section, SectionPath};
use crate::store::{SectionStore, StoreError};
use crate::types::{MatchedSections, Patterns, RetrievalError};

/// Selects the sections lying in the subtree of any of `roots`, de-duplicated by path and
/// sorted into document order.
pub fn collect_subtrees(
    sections: impl IntoIterator<Item = Section>,
    roots: &[SectionPath],
) -> Vec<Section> {
    let selected = sections
        .into_iter()
        .filter(|section| within_any(&section.path, roots))
        .collect();
    into_document_order(selected)
}

/// Sorts by path and drops repeated paths, keeping the first occurrence.
pub fn into_document_order(mut sections: Vec<Section>) -> Vec<Section> {
    sections.sort_by(|a, b| a.path.cmp(&b.path));
    sections.dedup_by(|later, earlier| later.path == earlier.path);

    debug_assert!(sections.windows(2).all(|w| w[0].path < w[1].path));
    sections
}

fn within_any(path: &SectionPath, roots: &[SectionPath]) -> bool {
    roots.iter().any(|root| path.is_descendant_or_self(root))
}

/// Runs the subtree query for `matched` and normalizes its rows.
///
/// Rows outside every matched subtree mean the store broke its contract and surface as a
/// [`RetrievalError::RetrievalFailure`]. An empty result is an
/// [`RetrievalError::ExpansionFailure`].
pub fn expand_sections<S: SectionStore>(
    store: &S,
    document: &Document,
    matched: &MatchedSections,
    patterns: &Patterns,
) -> Result<Vec<Section>, RetrievalError> {
    let roots = matched.paths();
    let rows = store
        .find_subtree_sections(&document.id, &roots)
        .map_err(|e| {
            RetrievalError::failure(
                format!("subtree lookup failed for document '{}'", document.label()),
                e,
            )
        })?;

    if let Some(stray) = rows.iter().find(|row| !within_any(&row.path, &roots)) {
        return Err(RetrievalError::failure(
            format!("subtree lookup failed for document '{}'", document.label()),
            StoreError::Integrity(format!(
                "section '{}' at path '{}' is outside every matched subtree",
                stray.heading, stray.path
            )),
        ));
    }

    let sections = into_document_order(rows);
    if sections.is_empty() {
        return Err(RetrievalError::ExpansionFailure {
            document: document.label(),
            patterns: patterns.as_slice().to_vec(),
        });
    }

    Ok(sections)
}
