pub mod document;
pub mod path;
pub mod section;

pub use crate::types::identifiers::DocumentId;
pub use document::Document;
pub use path::{compare, is_descendant_or_self, PathError, SectionPath, Segment};
pub use section::{Section, SectionHeading};
