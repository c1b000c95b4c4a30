//! Stream drivers: run an agent and emit its messages as they happen.
//!
//! Two drivers, one per agent capability:
//!
//! - [`NativeDriver`] forwards a [`StreamingAgent`]'s own feed. It runs
//!   entirely on the consumer's task.
//! - [`PollingDriver`] runs a [`LoggedAgent`] on a blocking worker and
//!   polls its shared log on a fixed interval, tracking progress with a
//!   [`LogCursor`].
//!
//! Both return a lazy stream: nothing runs until it is first polled, and
//! it ends after exactly one terminal message.
//!
//! Dropping a polling stream early does not stop the worker. Agents are
//! not interruptible, so callers that abandon streams must bound the
//! agent's run themselves.

pub mod native;
pub mod polling;

pub use native::NativeDriver;
pub use polling::{LogCursor, PollingDriver};

use agentstream_config::StreamConfig;
use agentstream_core::agent::{LoggedAgent, StreamingAgent};
use agentstream_core::message::Message;
use futures::stream::BoxStream;
use std::sync::Arc;
use std::time::Duration;

/// Timing knobs for the polling driver.
#[derive(Debug, Clone)]
pub struct DriverOptions {
    /// How often the agent log is checked for new entries
    pub poll_interval: Duration,
    /// Bound on joining a worker that already reports completion; only hit if the join stalls
    pub join_timeout: Duration,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            join_timeout: Duration::from_millis(100),
        }
    }
}

impl From<&StreamConfig> for DriverOptions {
    fn from(config: &StreamConfig) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            join_timeout: Duration::from_millis(config.join_timeout_ms),
        }
    }
}

/// Stream a log-only agent with default options.
pub fn stream_logged<A: LoggedAgent>(
    agent: Arc<A>,
    prompt: impl Into<String>,
) -> BoxStream<'static, Message> {
    PollingDriver::default().run(agent, prompt)
}

/// Stream an agent through its native feed.
pub fn stream_native<'a, A>(agent: &'a A, prompt: &'a str) -> BoxStream<'a, Message>
where
    A: StreamingAgent + ?Sized,
{
    NativeDriver.run(agent, prompt)
}
