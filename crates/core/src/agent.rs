//! Agent collaborator traits and the shared execution log.
//!
//! An agent is streamed in one of two ways, depending on what it offers:
//!
//! - [`StreamingAgent`] yields its own incremental feed of log entries and
//!   outputs; the adapter consumes it directly.
//! - [`LoggedAgent`] only offers a blocking `run` and an [`AgentLog`] it
//!   appends to while running; the adapter runs it on a worker and reads
//!   the log as it grows.

use futures::stream::BoxStream;
use std::sync::{Arc, PoisonError, RwLock};

use crate::entry::RawLogEntry;
use crate::error::AgentError;
use crate::output::{AgentEvent, AgentOutput};

/// A thread-safe, append-only execution log.
///
/// Cloning yields another handle to the same log. Entries are never
/// removed or rewritten, so `len()` only grows and any prefix a reader
/// has seen stays valid.
#[derive(Debug, Clone, Default)]
pub struct AgentLog {
    entries: Arc<RwLock<Vec<RawLogEntry>>>,
}

impl AgentLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. The write is visible to every handle once this returns.
    pub fn append(&self, entry: RawLogEntry) {
        // A poisoned lock still holds a valid prefix: appends are the only writes.
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    /// Number of entries appended so far.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries at positions `cursor..len`, read under one lock.
    pub fn read_from(&self, cursor: usize) -> Vec<RawLogEntry> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(cursor..).map(<[_]>::to_vec).unwrap_or_default()
    }

    /// A copy of the whole log.
    pub fn snapshot(&self) -> Vec<RawLogEntry> {
        self.read_from(0)
    }
}

/// An agent that exposes only a blocking run plus its execution log.
///
/// `run` is called on a dedicated blocking worker and may take as long as
/// it needs; it must append every step to the log returned by `logs`.
/// Step failures belong in the log as `error` entries; `Err` is for runs
/// that could not produce any final value.
pub trait LoggedAgent: Send + Sync + 'static {
    /// Handle to the log this agent appends to.
    fn logs(&self) -> AgentLog;

    /// Run the agent to completion.
    fn run(&self, prompt: &str) -> Result<AgentOutput, AgentError>;
}

/// An agent with a native incremental output stream.
///
/// The stream yields log entries interleaved with typed outputs, in
/// execution order; the last output is the run's final answer.
pub trait StreamingAgent: Send + Sync {
    fn run_stream<'a>(&'a self, prompt: &'a str)
    -> BoxStream<'a, Result<AgentEvent, AgentError>>;
}
