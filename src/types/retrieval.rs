use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{SectionHeading, SectionPath};
use crate::types::error::RetrievalError;
use crate::types::identifiers::{ContentDigest, DocumentId};

/// Validated, non-empty list of heading-prefix patterns.
///
/// Patterns are literal text; matching is case-insensitive and requires a space after the
/// pattern (see [`crate::retrieval::matcher`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Patterns(Vec<String>);

impl Patterns {
    pub fn new(patterns: Vec<String>) -> Result<Self, RetrievalError> {
        if patterns.is_empty() {
            return Err(RetrievalError::InvalidArgument(
                "Missing required argument: patterns".into(),
            ));
        }
        Ok(Patterns(patterns))
    }

    /// Accepts a JSON array of strings, as stored alongside procedures.
    /// No coercion is attempted: numbers, nulls and nested values are rejected.
    pub fn from_json(value: &Value) -> Result<Self, RetrievalError> {
        let items = match value {
            Value::Array(items) => items,
            Value::Null => {
                return Err(RetrievalError::InvalidArgument(
                    "Missing required argument: patterns".into(),
                ))
            }
            other => {
                return Err(RetrievalError::InvalidArgument(format!(
                    "Patterns must be a list of strings, got {other}"
                )))
            }
        };

        let patterns = items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(RetrievalError::InvalidArgument(format!(
                    "All patterns must be strings, got {other}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Patterns::new(patterns)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Output of the matching stage and input of the expansion stage. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedSections {
    sections: Vec<SectionHeading>,
}

impl MatchedSections {
    /// `None` when nothing matched.
    pub fn from_rows(sections: Vec<SectionHeading>) -> Option<Self> {
        if sections.is_empty() {
            None
        } else {
            Some(MatchedSections { sections })
        }
    }

    pub fn paths(&self) -> Vec<SectionPath> {
        self.sections.iter().map(|s| s.path.clone()).collect()
    }

    pub fn headings(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.heading.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionHeading> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Metadata describing one retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalMetadata {
    pub document_id: DocumentId,
    pub spec: String,
    pub version: String,
    pub patterns: Vec<String>,

    pub sections_matched: usize,
    pub sections_rendered: usize,
    pub matched_headings: Vec<String>,

    /// Hash of the retrieval config and the rendered digest.
    pub render_version: String,
}

/// The final result of a retrieval: rendered Markdown plus provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub markdown: String,
    pub digest: ContentDigest,
    pub metadata: RetrievalMetadata,
}
