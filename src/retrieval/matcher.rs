//! Heading-prefix matching.
//!
//! A heading matches pattern `p` iff, ignoring case, it starts with `p` followed by a space.
//! The space is a token boundary: `"5.2"` matches `"5.2 Random Access"` but not
//! `"5.20 Something"`.

use crate::document::Document;
use crate::store::SectionStore;
use crate::types::{MatchedSections, Patterns, RetrievalError};

pub fn heading_matches(heading: &str, pattern: &str) -> bool {
    let heading = heading.to_lowercase();
    let pattern = pattern.to_lowercase();
    heading
        .strip_prefix(pattern.as_str())
        .is_some_and(|rest| rest.starts_with(' '))
}

/// Logical OR over `patterns`.
pub fn matches_any<'a>(heading: &str, patterns: impl IntoIterator<Item = &'a str>) -> bool {
    patterns
        .into_iter()
        .any(|pattern| heading_matches(heading, pattern))
}

/// Runs the pattern lookup against `store`. Zero matches is a [`RetrievalError::NoMatch`].
pub fn match_sections<S: SectionStore>(
    store: &S,
    document: &Document,
    patterns: &Patterns,
) -> Result<MatchedSections, RetrievalError> {
    let rows = store
        .find_sections_by_patterns(&document.id, patterns)
        .map_err(|e| {
            RetrievalError::failure(
                format!("pattern lookup failed for document '{}'", document.label()),
                e,
            )
        })?;

    MatchedSections::from_rows(rows).ok_or_else(|| RetrievalError::NoMatch {
        document: document.label(),
        patterns: patterns.as_slice().to_vec(),
    })
}
