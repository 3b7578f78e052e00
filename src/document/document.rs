use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::identifiers::DocumentId;

/// A stored specification document.
///
/// Owned by the document store; this crate only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    /// Display name, e.g. `"38.331"`.
    pub spec: String,
    pub version: String,
    pub release: u32,
    /// Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_at: Option<DateTime<Utc>>,
}

impl Document {
    pub fn new(
        id: DocumentId,
        spec: impl Into<String>,
        version: impl Into<String>,
        release: u32,
    ) -> Self {
        Document {
            id,
            spec: spec.into(),
            version: version.into(),
            release,
            extracted_at: None,
        }
    }

    pub fn with_extracted_at(mut self, at: DateTime<Utc>) -> Self {
        self.extracted_at = Some(at);
        self
    }

    /// `"{spec} {version}"`, the label used in diagnostics.
    pub fn label(&self) -> String {
        format!("{} {}", self.spec, self.version)
    }
}
