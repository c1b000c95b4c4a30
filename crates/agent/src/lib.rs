//! A scripted agent collaborator.
//!
//! [`ScriptedAgent`] replays a fixed [`Script`] of log entries, with
//! optional delays between them, and then returns a scripted outcome. It
//! implements both collaborator capabilities, so the same script can be
//! streamed through either driver. The CLI's `replay` command and the
//! adapter's integration tests run on it.

pub mod script;
pub mod scripted;

pub use script::{Script, ScriptError, ScriptOutcome, ScriptStep};
pub use scripted::ScriptedAgent;
