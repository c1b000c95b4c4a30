//! Agent outputs and native stream items.

use serde::{Deserialize, Serialize};

use crate::entry::{RawLogEntry, value_to_text};

/// The value an agent run returns.
///
/// Text covers both plain strings and text wrapped by the agent library;
/// images and audio are references to files the agent produced. Anything
/// else is kept as a JSON value and shown in its string form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AgentOutput {
    Text(String),
    Image(String),
    Audio(String),
    Other(serde_json::Value),
}

impl From<String> for AgentOutput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for AgentOutput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl std::fmt::Display for AgentOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text}"),
            Self::Image(path) | Self::Audio(path) => write!(f, "{path}"),
            Self::Other(value) => write!(f, "{}", value_to_text(value)),
        }
    }
}

/// One item of a native agent stream.
///
/// Log entries still need classification; outputs are already typed and
/// are wrapped into messages directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum AgentEvent {
    Entry(RawLogEntry),
    Output(AgentOutput),
}
