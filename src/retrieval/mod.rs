//! Retrieval orchestration: validate → resolve document → match → expand → render.
//!
//! Each stage depends on the previous one's output, so they run strictly in sequence
//! and the first failure ends the call. No partial result is ever returned.

pub mod config;
pub mod expander;
pub mod matcher;

use std::fmt;
use std::time::Instant;

use serde_json::Value;
use tracing::Dispatch;

use crate::document::DocumentId;
use crate::logging::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use crate::render::render_markdown;
use crate::store::SectionStore;
use crate::types::{
    ContentDigest, Patterns, RetrievalError, RetrievalMetadata, RetrievalResult,
};

pub use config::RetrievalConfig;
pub use expander::{collect_subtrees, expand_sections, into_document_order};
pub use matcher::{heading_matches, match_sections, matches_any};

const OP: &str = "retrieve_sections";

/// Counts reached before a failure, for diagnostics.
#[derive(Debug, Default)]
struct Progress {
    sections_matched: Option<usize>,
    sections_retrieved: Option<usize>,
}

/// Renders the subtrees of the sections whose headings match a set of patterns.
///
/// The store and the diagnostic sink are explicit collaborators: the retriever borrows
/// whatever store handle it is given and, when a [`Dispatch`] is attached, routes every
/// event of a call to it instead of the global subscriber. It holds no other state.
pub struct SectionRetriever<S> {
    store: S,
    config: RetrievalConfig,
    dispatch: Option<Dispatch>,
}

impl<S> SectionRetriever<S>
where
    S: SectionStore,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: RetrievalConfig::v0(),
            dispatch: None,
        }
    }

    pub fn with_config(mut self, config: RetrievalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Rendered Markdown for the subtrees matching `patterns` in `document_id`.
    pub fn render_sections(
        &self,
        document_id: &DocumentId,
        patterns: &[String],
    ) -> Result<String, RetrievalError> {
        self.retrieve(document_id, patterns).map(|result| result.markdown)
    }

    /// Like [`Self::render_sections`], with patterns given as a JSON array of strings.
    pub fn render_sections_json(
        &self,
        document_id: &DocumentId,
        patterns: &Value,
    ) -> Result<String, RetrievalError> {
        self.retrieve_json(document_id, patterns)
            .map(|result| result.markdown)
    }

    pub fn retrieve(
        &self,
        document_id: &DocumentId,
        patterns: &[String],
    ) -> Result<RetrievalResult, RetrievalError> {
        self.execute(document_id, &patterns, || Patterns::new(patterns.to_vec()))
    }

    pub fn retrieve_json(
        &self,
        document_id: &DocumentId,
        patterns: &Value,
    ) -> Result<RetrievalResult, RetrievalError> {
        self.execute(document_id, patterns, || Patterns::from_json(patterns))
    }

    fn execute<F>(
        &self,
        document_id: &DocumentId,
        raw_patterns: &dyn fmt::Debug,
        parse: F,
    ) -> Result<RetrievalResult, RetrievalError>
    where
        F: FnOnce() -> Result<Patterns, RetrievalError>,
    {
        self.in_dispatch(|| {
            let span = tracing::info_span!("retrieve_sections", document_id = %document_id);
            let _enter = span.enter();

            let started = Instant::now();
            tracing::info!(op = OP, event = EVENT_START, patterns = ?raw_patterns);

            let mut progress = Progress::default();
            let outcome = self.run(document_id, parse, &mut progress);
            let duration_ms = started.elapsed().as_millis() as u64;

            match &outcome {
                Ok(result) => {
                    tracing::info!(
                        op = OP,
                        event = EVENT_END,
                        duration_ms,
                        sections_matched = result.metadata.sections_matched,
                        sections_rendered = result.metadata.sections_rendered,
                        digest = %result.digest,
                    );
                }
                Err(err) => log_failure(err, raw_patterns, &progress, duration_ms),
            }

            outcome
        })
    }

    fn in_dispatch<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }

    fn run<F>(
        &self,
        document_id: &DocumentId,
        parse: F,
        progress: &mut Progress,
    ) -> Result<RetrievalResult, RetrievalError>
    where
        F: FnOnce() -> Result<Patterns, RetrievalError>,
    {
        // 0. Validation, before any store access
        self.config.validate()?;
        if document_id.is_blank() {
            return Err(RetrievalError::InvalidArgument(
                "Missing required argument: document_id".into(),
            ));
        }
        let patterns = parse()?;

        // 1. Resolve document
        let document = self
            .store
            .resolve_document(document_id)
            .map_err(|e| {
                RetrievalError::failure(format!("document lookup failed for '{document_id}'"), e)
            })?
            .ok_or_else(|| RetrievalError::DocumentNotFound {
                document_id: document_id.to_string(),
            })?;

        // 2. Match headings
        let matched = match_sections(&self.store, &document, &patterns)?;
        progress.sections_matched = Some(matched.len());

        tracing::info!(
            op = OP,
            document = %document.label(),
            sections_matched = matched.len(),
            "found matching sections"
        );
        if self.config.log_matched_headings {
            tracing::debug!(
                op = OP,
                document = %document.label(),
                headings = %matched.headings().join(", "),
                "matched sections"
            );
        }

        // 3. Expand subtrees
        let sections = expand_sections(&self.store, &document, &matched, &patterns)?;
        progress.sections_retrieved = Some(sections.len());

        tracing::debug!(
            op = OP,
            document = %document.label(),
            sections_retrieved = sections.len(),
            roots = %matched
                .paths()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            "retrieved sections including subsections"
        );

        // 4. Render
        let markdown = render_markdown(&document.spec, &sections).map_err(|e| {
            RetrievalError::failure(
                format!("rendering failed for document '{}'", document.label()),
                e,
            )
        })?;

        let digest = ContentDigest::from_content(markdown.as_bytes());
        let render_version = self
            .config
            .render_version(&digest)
            .map_err(|e| RetrievalError::failure("retrieval config could not be serialized", e))?;

        let metadata = RetrievalMetadata {
            document_id: document.id.clone(),
            spec: document.spec.clone(),
            version: document.version.clone(),
            patterns: patterns.as_slice().to_vec(),
            sections_matched: matched.len(),
            sections_rendered: sections.len(),
            matched_headings: matched.headings(),
            render_version,
        };

        Ok(RetrievalResult {
            markdown,
            digest,
            metadata,
        })
    }
}

fn log_failure(
    err: &RetrievalError,
    raw_patterns: &dyn fmt::Debug,
    progress: &Progress,
    duration_ms: u64,
) {
    let cause = std::error::Error::source(err).map(ToString::to_string);

    if err.kind().is_caller_fault() {
        tracing::warn!(
            op = OP,
            event = EVENT_END_ERROR,
            duration_ms,
            err_code = err.code(),
            patterns = ?raw_patterns,
            sections_matched = ?progress.sections_matched,
            sections_retrieved = ?progress.sections_retrieved,
            error = %err,
        );
    } else {
        tracing::error!(
            op = OP,
            event = EVENT_END_ERROR,
            duration_ms,
            err_code = err.code(),
            patterns = ?raw_patterns,
            sections_matched = ?progress.sections_matched,
            sections_retrieved = ?progress.sections_retrieved,
            error = %err,
            cause = ?cause,
        );
    }
}
