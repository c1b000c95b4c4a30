//! Polling mode: run a blocking agent on a worker and read its log forward.
//!
//! The worker is a `spawn_blocking` task; its `JoinHandle` is the only
//! channel for the run's return value. While it runs, the consumer's task
//! checks the shared log every `poll_interval` and classifies whatever was
//! appended past the cursor. Once the worker reports completion it is
//! joined and one last drain picks up any entries appended after the
//! previous poll. `join_timeout` only bounds that join in case it stalls.

use agentstream_core::agent::{AgentLog, LoggedAgent};
use agentstream_core::entry::RawLogEntry;
use agentstream_core::error::AgentError;
use agentstream_core::message::Message;
use agentstream_core::output::AgentOutput;
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::DriverOptions;
use crate::classifier::classify;
use crate::terminal::{failure_message, terminal_message};

/// Position in an agent log: the number of entries already consumed.
///
/// The cursor only moves forward, and only by the number of entries
/// actually read, so every entry is handed out exactly once no matter how
/// often or how late the log is polled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogCursor {
    position: usize,
}

impl LogCursor {
    pub fn starting_at(position: usize) -> Self {
        Self { position }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Take every entry appended since the last call and advance past them.
    pub fn take_new(&mut self, log: &AgentLog) -> Vec<RawLogEntry> {
        let entries = log.read_from(self.position);
        self.position += entries.len();
        entries
    }
}

/// Streams a [`LoggedAgent`] by polling its log.
#[derive(Debug, Clone, Default)]
pub struct PollingDriver {
    options: DriverOptions,
}

impl PollingDriver {
    pub fn new(options: DriverOptions) -> Self {
        Self { options }
    }

    /// Start streaming `agent` on `prompt`.
    ///
    /// The worker is spawned on the first poll of the returned stream, so
    /// this must be consumed inside a Tokio runtime.
    pub fn run<A: LoggedAgent>(
        &self,
        agent: Arc<A>,
        prompt: impl Into<String>,
    ) -> BoxStream<'static, Message> {
        let state = PollState {
            log: agent.logs(),
            launch: Some((agent, prompt.into())),
            worker: None,
            cursor: LogCursor::default(),
            pending: VecDeque::new(),
            options: self.options.clone(),
        };

        stream::unfold(state, |mut state| async move {
            let message = state.next_message().await?;
            Some((message, state))
        })
        .boxed()
    }
}

struct Worker {
    handle: JoinHandle<Result<AgentOutput, AgentError>>,
    ticker: Interval,
}

struct PollState<A> {
    log: AgentLog,
    launch: Option<(Arc<A>, String)>,
    worker: Option<Worker>,
    cursor: LogCursor,
    pending: VecDeque<Message>,
    options: DriverOptions,
}

impl<A: LoggedAgent> PollState<A> {
    async fn next_message(&mut self) -> Option<Message> {
        loop {
            if let Some(message) = self.pending.pop_front() {
                return Some(message);
            }

            if let Some((agent, prompt)) = self.launch.take() {
                self.worker = Some(self.spawn(agent, prompt));
                continue;
            }

            // No launch and no worker: the terminal message has been handed out.
            let worker = self.worker.as_mut()?;

            // Sample completion before reading so a finished worker's last
            // entries are always picked up by the drain below.
            let finished = worker.handle.is_finished();
            let drained = drain(&mut self.cursor, &self.log, &mut self.pending);

            if finished {
                let worker = self.worker.take()?;
                let terminal = join_worker(worker.handle, self.options.join_timeout).await;
                drain(&mut self.cursor, &self.log, &mut self.pending);
                info!(entries = self.cursor.position(), "Agent stream finished");
                self.pending.push_back(terminal);
                continue;
            }

            if drained == 0 {
                worker.ticker.tick().await;
            }
        }
    }

    fn spawn(&mut self, agent: Arc<A>, prompt: String) -> Worker {
        // Entries from earlier runs sharing this log are not part of this stream.
        self.cursor = LogCursor::starting_at(self.log.len());
        info!(
            cursor = self.cursor.position(),
            poll_interval_ms = self.options.poll_interval.as_millis() as u64,
            "Starting agent worker"
        );

        let handle = tokio::task::spawn_blocking(move || agent.run(&prompt));

        let period = self.options.poll_interval.max(Duration::from_millis(1));
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Worker { handle, ticker }
    }
}

impl<A> Drop for PollState<A> {
    fn drop(&mut self) {
        if let Some(worker) = &self.worker
            && !worker.handle.is_finished()
        {
            debug!(
                entries = self.cursor.position(),
                "Agent stream dropped while worker still running; worker left to finish"
            );
        }
    }
}

/// Classify everything past the cursor into `pending`. Returns the number of entries read.
fn drain(cursor: &mut LogCursor, log: &AgentLog, pending: &mut VecDeque<Message>) -> usize {
    let entries = cursor.take_new(log);
    if !entries.is_empty() {
        debug!(
            new_entries = entries.len(),
            cursor = cursor.position(),
            "Classifying new log entries"
        );
    }
    for entry in &entries {
        pending.extend(classify(entry));
    }
    entries.len()
}

async fn join_worker(
    handle: JoinHandle<Result<AgentOutput, AgentError>>,
    timeout: Duration,
) -> Message {
    let outcome = match tokio::time::timeout(timeout, handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(AgentError::WorkerPanicked(join_error.to_string())),
        Err(_) => Err(AgentError::JoinTimeout {
            timeout_ms: timeout.as_millis() as u64,
        }),
    };

    match outcome {
        Ok(output) => terminal_message(output),
        Err(e) => {
            warn!("Agent run ended without output: {e}");
            failure_message(&e)
        }
    }
}
