//! Hierarchical section paths.
//!
//! A path is a dotted sequence of segments (`"3.1.10"`) that encodes where a section sits in
//! its document's tree. Two relations are defined on it:
//!
//! - containment: `q` lies in the subtree of `p` iff `q`'s segments start with `p`'s;
//! - a total order in which parents precede children and siblings follow their segment
//!   order, i.e. sorting by it yields document reading order.
//!
//! Segments are compared structurally, never as raw text, so `"1.10"` sorts after `"1.9"`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("Section path is empty")]
    Empty,
    #[error("Section path '{0}' contains an empty segment")]
    EmptySegment(String),
    #[error("Section path '{path}' contains invalid segment '{segment}'")]
    InvalidSegment { path: String, segment: String },
}

/// One level of a [`SectionPath`].
///
/// Numbers order before labels. Numbers compare numerically, labels lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    Number(u64),
    Label(String),
}

impl Segment {
    fn parse(raw: &str, path: &str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::EmptySegment(path.to_string()));
        }

        let valid = raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PathError::InvalidSegment {
                path: path.to_string(),
                segment: raw.to_string(),
            });
        }

        // Zero-padded digit runs stay labels so the text form round-trips exactly.
        let numeric =
            raw.chars().all(|c| c.is_ascii_digit()) && (raw == "0" || !raw.starts_with('0'));
        if numeric {
            if let Ok(n) = raw.parse::<u64>() {
                return Ok(Segment::Number(n));
            }
        }

        Ok(Segment::Label(raw.to_string()))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Number(n) => write!(f, "{n}"),
            Segment::Label(l) => f.write_str(l),
        }
    }
}

/// Position of a section in its document tree.
///
/// The derived ordering is lexicographic over segments with a proper prefix first, which is
/// exactly pre-order traversal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SectionPath {
    segments: Vec<Segment>,
}

impl SectionPath {
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::Empty);
        }

        let segments = raw
            .split('.')
            .map(|segment| Segment::parse(segment, raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments; a top-level section has depth 1.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn parent(&self) -> Option<SectionPath> {
        if self.segments.len() <= 1 {
            return None;
        }
        Some(SectionPath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// True iff `self` is `ancestor` or nested anywhere below it.
    pub fn is_descendant_or_self(&self, ancestor: &SectionPath) -> bool {
        self.segments.starts_with(&ancestor.segments)
    }
}

/// True iff `candidate` equals `ancestor` or lies in its subtree.
pub fn is_descendant_or_self(candidate: &SectionPath, ancestor: &SectionPath) -> bool {
    candidate.is_descendant_or_self(ancestor)
}

/// Document-order comparison of two paths.
pub fn compare(a: &SectionPath, b: &SectionPath) -> Ordering {
    a.cmp(b)
}

impl fmt::Display for SectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for SectionPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionPath::parse(s)
    }
}

impl TryFrom<String> for SectionPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        SectionPath::parse(&value)
    }
}

impl From<SectionPath> for String {
    fn from(path: SectionPath) -> Self {
        path.to_string()
    }
}
