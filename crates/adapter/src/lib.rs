//! The log-to-chat streaming adapter.
//!
//! Runs an agent and converts its execution trace into chat messages
//! while it is still running:
//!
//! 1. **Classify** each raw log entry into 0–4 messages ([`classifier`])
//! 2. **Drive** the agent, discovering new entries as they appear
//!    ([`driver`]), either from its native stream or by polling its log
//! 3. **Finish** with exactly one terminal message built from the agent's
//!    return value ([`terminal`])
//!
//! Messages come out in log order, each entry is classified exactly once,
//! and the terminal message is always last.

pub mod classifier;
pub mod driver;
pub mod terminal;

pub use classifier::{CODE_INTERPRETER, classify, classify_all};
pub use driver::{
    DriverOptions, LogCursor, NativeDriver, PollingDriver, stream_logged, stream_native,
};
pub use terminal::{failure_message, terminal_message};
