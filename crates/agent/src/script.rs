//! Script format.
//!
//! ```json
//! {
//!   "steps": [
//!     { "rationale": "I should look up the weather" },
//!     { "delay_ms": 200, "tool_call": { "tool_name": "search", "tool_arguments": "weather" } },
//!     { "observation": "72F and sunny" }
//!   ],
//!   "outcome": { "output": { "type": "text", "value": "72F" } }
//! }
//! ```

use agentstream_core::entry::RawLogEntry;
use agentstream_core::error::AgentError;
use agentstream_core::output::AgentOutput;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A full agent run: log steps, then an outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub steps: Vec<ScriptStep>,

    pub outcome: ScriptOutcome,
}

/// One log entry and how long to wait before appending it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptStep {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub delay_ms: u64,

    #[serde(flatten)]
    pub entry: RawLogEntry,
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

impl ScriptStep {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// How the scripted run ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptOutcome {
    /// The run returns this value
    Output(AgentOutput),
    /// The run fails without a value
    Failure(String),
}

impl ScriptOutcome {
    pub fn result(&self) -> Result<AgentOutput, AgentError> {
        match self {
            Self::Output(output) => Ok(output.clone()),
            Self::Failure(reason) => Err(AgentError::RunFailed(reason.clone())),
        }
    }
}

impl Script {
    /// A script with no steps that returns `output`.
    pub fn answering(output: impl Into<AgentOutput>) -> Self {
        Self {
            steps: Vec::new(),
            outcome: ScriptOutcome::Output(output.into()),
        }
    }

    /// A script with no steps that fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            steps: Vec::new(),
            outcome: ScriptOutcome::Failure(reason.into()),
        }
    }

    /// Append a step with no delay.
    pub fn step(self, entry: RawLogEntry) -> Self {
        self.step_after(Duration::ZERO, entry)
    }

    /// Append a step appended `delay` after the previous one.
    pub fn step_after(mut self, delay: Duration, entry: RawLogEntry) -> Self {
        self.steps.push(ScriptStep {
            delay_ms: delay.as_millis() as u64,
            entry,
        });
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path).map_err(|e| ScriptError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json(&content)
    }
}

/// Script loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Failed to read script at {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),
}
