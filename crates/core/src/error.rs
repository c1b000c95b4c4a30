//! Error types for the AgentStream domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Agent-side failures have their own enum so they can be rendered
//! into the stream instead of propagated.

use thiserror::Error;

/// The top-level error type for all AgentStream operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Agent errors ---
    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    // --- Collaborator contract violations ---
    #[error("Malformed log entry: {0}")]
    MalformedEntry(String),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the agent run itself, as seen by the stream driver.
///
/// None of these end a stream silently: the driver turns each one into a
/// final error-flagged message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgentError {
    #[error("Agent run failed: {0}")]
    RunFailed(String),

    #[error("Agent worker terminated abnormally: {0}")]
    WorkerPanicked(String),

    #[error("Agent worker did not finish within {timeout_ms}ms")]
    JoinTimeout { timeout_ms: u64 },

    #[error("Agent stream interrupted: {0}")]
    StreamInterrupted(String),

    #[error("Agent stream ended without a final output")]
    MissingOutput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_error_displays_correctly() {
        let err = Error::Agent(AgentError::JoinTimeout { timeout_ms: 100 });
        assert!(err.to_string().contains("100ms"));
        assert!(err.to_string().starts_with("Agent error"));
    }

    #[test]
    fn malformed_entry_displays_reason() {
        let err = Error::MalformedEntry("missing field `tool_arguments`".into());
        assert!(err.to_string().contains("tool_arguments"));
    }
}
