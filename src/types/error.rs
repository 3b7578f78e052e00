use std::error::Error as StdError;

use thiserror::Error;

/// Stable classification of retrieval failures.
///
/// The request layer maps caller faults to "bad request" / "not found" responses and the
/// rest to internal errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    DocumentNotFound,
    NoMatch,
    ExpansionFailure,
    RetrievalFailure,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "ERR_INVALID_ARGUMENT",
            ErrorKind::DocumentNotFound => "ERR_DOCUMENT_NOT_FOUND",
            ErrorKind::NoMatch => "ERR_NO_MATCH",
            ErrorKind::ExpansionFailure => "ERR_EXPANSION_FAILURE",
            ErrorKind::RetrievalFailure => "ERR_RETRIEVAL_FAILURE",
        }
    }

    /// Outcomes triggered by the request itself rather than by a fault in the system.
    pub fn is_caller_fault(&self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidArgument | ErrorKind::DocumentNotFound | ErrorKind::NoMatch
        )
    }
}

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Document with ID '{document_id}' not found")]
    DocumentNotFound { document_id: String },

    #[error("No sections found for document '{document}' with the given patterns: {patterns:?}")]
    NoMatch {
        document: String,
        patterns: Vec<String>,
    },

    #[error("Hierarchical expansion returned no sections for document '{document}' with the given patterns: {patterns:?}")]
    ExpansionFailure {
        document: String,
        patterns: Vec<String>,
    },

    #[error("Failed to retrieve sections: {context}")]
    RetrievalFailure {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync + 'static>,
    },
}

impl RetrievalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RetrievalError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            RetrievalError::DocumentNotFound { .. } => ErrorKind::DocumentNotFound,
            RetrievalError::NoMatch { .. } => ErrorKind::NoMatch,
            RetrievalError::ExpansionFailure { .. } => ErrorKind::ExpansionFailure,
            RetrievalError::RetrievalFailure { .. } => ErrorKind::RetrievalFailure,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    pub(crate) fn failure<E>(context: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        RetrievalError::RetrievalFailure {
            context: context.into(),
            source: Box::new(source),
        }
    }
}
