use serde::{Deserialize, Serialize};

use super::path::SectionPath;

/// One headed section of a document. `content` excludes the bodies of its descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub path: SectionPath,
    pub heading: String,
    /// Heading depth, 1 for top-level. Trusted as stored.
    pub level: u32,
    #[serde(default)]
    pub content: String,
}

impl Section {
    pub fn new(
        path: SectionPath,
        heading: impl Into<String>,
        level: u32,
        content: impl Into<String>,
    ) -> Self {
        Section {
            path,
            heading: heading.into(),
            level,
            content: content.into(),
        }
    }

    pub fn as_heading(&self) -> SectionHeading {
        SectionHeading {
            heading: self.heading.clone(),
            path: self.path.clone(),
        }
    }
}

/// The `{heading, path}` projection returned by pattern lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionHeading {
    pub heading: String,
    pub path: SectionPath,
}
