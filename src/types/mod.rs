pub mod error;
pub mod identifiers;
pub mod retrieval;

pub use error::{ErrorKind, RetrievalError};
pub use identifiers::{ContentDigest, DocumentId};
pub use retrieval::{MatchedSections, Patterns, RetrievalMetadata, RetrievalResult};
