//! Native-stream mode: forward an agent's own incremental feed.
//!
//! Runs on the consumer's task; no workers are created. Log entries are
//! classified, outputs are wrapped directly, and the order is exactly
//! what the agent yields.

use agentstream_core::agent::StreamingAgent;
use agentstream_core::error::AgentError;
use agentstream_core::message::Message;
use agentstream_core::output::AgentEvent;
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

use crate::classifier::classify;
use crate::terminal::{failure_message, terminal_message};

/// Streams a [`StreamingAgent`] through its native feed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeDriver;

impl NativeDriver {
    /// Start streaming `agent` on `prompt`.
    ///
    /// A feed that ends without yielding any output, or that yields an
    /// error, is closed with one error-flagged message.
    pub fn run<'a, A>(&self, agent: &'a A, prompt: &'a str) -> BoxStream<'a, Message>
    where
        A: StreamingAgent + ?Sized,
    {
        let state = NativeState {
            events: agent.run_stream(prompt),
            pending: VecDeque::new(),
            outputs: 0,
            entries: 0,
            done: false,
        };

        stream::unfold(state, |mut state| async move {
            let message = state.next_message().await?;
            Some((message, state))
        })
        .boxed()
    }
}

struct NativeState<'a> {
    events: BoxStream<'a, Result<AgentEvent, AgentError>>,
    pending: VecDeque<Message>,
    outputs: usize,
    entries: usize,
    done: bool,
}

impl NativeState<'_> {
    async fn next_message(&mut self) -> Option<Message> {
        loop {
            if let Some(message) = self.pending.pop_front() {
                return Some(message);
            }
            if self.done {
                return None;
            }

            match self.events.next().await {
                Some(Ok(AgentEvent::Entry(entry))) => {
                    self.entries += 1;
                    let messages = classify(&entry);
                    debug!(
                        entry = self.entries,
                        messages = messages.len(),
                        "Classified native log entry"
                    );
                    self.pending.extend(messages);
                }
                Some(Ok(AgentEvent::Output(output))) => {
                    self.outputs += 1;
                    self.pending.push_back(terminal_message(output));
                }
                Some(Err(e)) => {
                    warn!("Agent stream failed: {e}");
                    self.done = true;
                    self.pending.push_back(failure_message(&e));
                }
                None => {
                    self.done = true;
                    if self.outputs == 0 {
                        warn!(entries = self.entries, "Agent stream ended without output");
                        self.pending
                            .push_back(failure_message(&AgentError::MissingOutput));
                    } else {
                        info!(entries = self.entries, "Agent stream finished");
                    }
                }
            }
        }
    }
}
