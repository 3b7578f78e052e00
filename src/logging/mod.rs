//! Structured logging for section retrieval.
//!
//! Retrieval emits `tracing` events carrying `op`, `event` and stage counts. Where they go is
//! decided by the caller:
//!
//! - `init(profile)` installs a process-wide subscriber once;
//! - a [`tracing::Dispatch`] handed to `SectionRetriever::with_dispatch` scopes one
//!   retriever's events to that sink;
//! - [`TestCapture`] records events in memory for assertions.

pub mod capture;
pub mod init;

pub use capture::{CapturedEvent, TestCapture};
pub use init::{init, Profile};

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
