//! Raw execution log entries.
//!
//! A [`RawLogEntry`] is one append-only record describing a single
//! observable step of agent execution. Every field is optional; the agent
//! fills in whatever the step produced. Unknown keys are ignored so that
//! agents may carry extra bookkeeping in their logs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// One step of an agent's execution trace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLogEntry {
    /// Free text the agent produced before acting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,

    /// The tool the agent decided to call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<ToolCallEntry>,

    /// Result of the tool call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,

    /// An error raised during this step (string or structured value)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

/// A tool invocation recorded in the log.
///
/// Both fields are required: the agent collaborator guarantees this shape,
/// so an entry missing either one is rejected at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallEntry {
    pub tool_name: String,
    pub tool_arguments: Value,
}

impl ToolCallEntry {
    pub fn new(tool_name: impl Into<String>, tool_arguments: impl Into<Value>) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_arguments: tool_arguments.into(),
        }
    }

    /// The arguments as display text: strings verbatim, anything else as compact JSON.
    pub fn arguments_text(&self) -> String {
        value_to_text(&self.tool_arguments)
    }
}

impl RawLogEntry {
    /// An entry carrying only a rationale.
    pub fn rationale(text: impl Into<String>) -> Self {
        Self {
            rationale: Some(text.into()),
            ..Self::default()
        }
    }

    /// An entry carrying only a tool call.
    pub fn tool_call(tool_name: impl Into<String>, tool_arguments: impl Into<Value>) -> Self {
        Self {
            tool_call: Some(ToolCallEntry::new(tool_name, tool_arguments)),
            ..Self::default()
        }
    }

    /// An entry carrying only an observation.
    pub fn observation(text: impl Into<String>) -> Self {
        Self {
            observation: Some(text.into()),
            ..Self::default()
        }
    }

    /// An entry carrying only an error.
    pub fn error(error: impl Into<Value>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn with_rationale(mut self, text: impl Into<String>) -> Self {
        self.rationale = Some(text.into());
        self
    }

    pub fn with_tool_call(
        mut self,
        tool_name: impl Into<String>,
        tool_arguments: impl Into<Value>,
    ) -> Self {
        self.tool_call = Some(ToolCallEntry::new(tool_name, tool_arguments));
        self
    }

    pub fn with_observation(mut self, text: impl Into<String>) -> Self {
        self.observation = Some(text.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<Value>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// True when no field is present at all.
    pub fn is_empty(&self) -> bool {
        self.rationale.is_none()
            && self.tool_call.is_none()
            && self.observation.is_none()
            && self.error.is_none()
    }

    /// The string form of the error, if any.
    ///
    /// Structured errors that carry a `message` string render as that
    /// message; other values render as compact JSON.
    pub fn error_text(&self) -> Option<String> {
        self.error.as_ref().map(|err| match err {
            Value::Object(map) => match map.get("message") {
                Some(Value::String(message)) => message.clone(),
                _ => err.to_string(),
            },
            other => value_to_text(other),
        })
    }

    /// Parse an entry from an untyped JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::MalformedEntry(e.to_string()))
    }

    /// Parse an entry from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::MalformedEntry(e.to_string()))
    }
}

/// Render a JSON value as display text: strings verbatim, everything else as compact JSON.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_partial_entry() {
        let entry = RawLogEntry::from_value(json!({"rationale": "thinking"})).unwrap();
        assert_eq!(entry.rationale.as_deref(), Some("thinking"));
        assert!(entry.tool_call.is_none());
        assert!(!entry.is_empty());
    }

    #[test]
    fn empty_object_is_empty_entry() {
        let entry = RawLogEntry::from_json("{}").unwrap();
        assert!(entry.is_empty());
    }

    #[test]
    fn null_fields_count_as_absent() {
        let entry =
            RawLogEntry::from_value(json!({"rationale": null, "error": null, "step": 3})).unwrap();
        assert!(entry.is_empty());
    }

    #[test]
    fn tool_call_without_arguments_is_rejected() {
        let err = RawLogEntry::from_value(json!({"tool_call": {"tool_name": "search"}}))
            .unwrap_err();
        assert!(matches!(err, Error::MalformedEntry(_)));
        assert!(err.to_string().contains("tool_arguments"));
    }

    #[test]
    fn tool_call_without_name_is_rejected() {
        let result = RawLogEntry::from_json(r#"{"tool_call": {"tool_arguments": "x"}}"#);
        assert!(matches!(result, Err(Error::MalformedEntry(_))));
    }

    #[test]
    fn structured_arguments_render_as_json() {
        let call = ToolCallEntry::new("search", json!({"query": "weather"}));
        assert_eq!(call.arguments_text(), r#"{"query":"weather"}"#);

        let call = ToolCallEntry::new("search", "weather");
        assert_eq!(call.arguments_text(), "weather");
    }

    #[test]
    fn error_text_forms() {
        assert_eq!(
            RawLogEntry::error("boom").error_text().as_deref(),
            Some("boom")
        );
        assert_eq!(
            RawLogEntry::error(json!({"type": "AgentExecutionError", "message": "tool failed"}))
                .error_text()
                .as_deref(),
            Some("tool failed")
        );
        assert_eq!(RawLogEntry::error(json!(42)).error_text().as_deref(), Some("42"));
        assert_eq!(RawLogEntry::rationale("x").error_text(), None);
    }

    #[test]
    fn builders_compose() {
        let entry = RawLogEntry::rationale("a")
            .with_tool_call("t", "args")
            .with_observation("o")
            .with_error("e");
        assert_eq!(entry.rationale.as_deref(), Some("a"));
        assert_eq!(entry.tool_call.unwrap().tool_name, "t");
        assert_eq!(entry.observation.as_deref(), Some("o"));
        assert_eq!(entry.error, Some(json!("e")));
    }
}
