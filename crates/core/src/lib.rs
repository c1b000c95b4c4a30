//! # AgentStream Core
//!
//! Domain types, collaborator traits, and error definitions for the
//! AgentStream log-to-chat adapter. This crate has **zero framework
//! dependencies**; it defines the values that flow from an agent's
//! execution trace to a chat transcript, and the traits an agent must
//! implement to be streamed.
//!
//! ## Flow
//!
//! ```text
//! agent ──(RawLogEntry | AgentOutput)──▶ adapter ──(Message)──▶ Transcript / UI
//! ```

pub mod agent;
pub mod entry;
pub mod error;
pub mod message;
pub mod output;
pub mod transcript;
pub mod wire;

// Re-export key types at crate root for ergonomics
pub use agent::{AgentLog, LoggedAgent, StreamingAgent};
pub use entry::{RawLogEntry, ToolCallEntry};
pub use error::{AgentError, Error, Result};
pub use message::{FileData, Message, MessageContent, Role};
pub use output::{AgentEvent, AgentOutput};
pub use transcript::Transcript;
pub use wire::{ThoughtMetadata, WireFile, WireMessage};
