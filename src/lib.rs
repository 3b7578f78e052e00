//! Hierarchical section retrieval and rendering for large structured specifications.
//!
//! `section-retrieval` resolves heading patterns (`"5.2"`) to sections of a stored
//! document, expands each match to its full subtree using hierarchical section paths,
//! orders the result into document order and renders it as one nested Markdown text.
//! Rendering is a pure function: identical inputs produce identical output, byte-for-byte.
//!
//! The section store is a collaborator ([`store::SectionStore`]); the crate only reads it.

pub mod document;
pub mod logging;
pub mod render;
pub mod retrieval;
pub mod store;
pub mod types;

pub use document::{Document, DocumentId, Section, SectionHeading, SectionPath};
pub use retrieval::{RetrievalConfig, SectionRetriever};
pub use store::{MemoryStore, SectionStore, SnapshotStore, StoreError};
pub use types::{ErrorKind, RetrievalError, RetrievalResult};
