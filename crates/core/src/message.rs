//! Chat message domain types.
//!
//! These are the values the adapter produces and the chat UI renders:
//! Agent logs a step → adapter classifies it → `Message` → transcript.
//! A message is never mutated after it is produced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Media type attached to image results.
pub const IMAGE_PNG: &str = "image/png";

/// Media type attached to audio results.
pub const AUDIO_WAV: &str = "audio/wav";

/// The role of a message sender in a chat transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The agent
    Assistant,
}

/// A reference to a file produced by the agent.
///
/// The adapter forwards the reference as-is; it never reads, transcodes,
/// or validates the file itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileData {
    /// Path or URI of the artifact
    pub path: String,

    /// Media type, e.g. `image/png`
    pub mime_type: String,

    /// Optional text shown in place of the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

impl FileData {
    pub fn new(path: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mime_type: mime_type.into(),
            alt_text: None,
        }
    }

    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = Some(alt_text.into());
        self
    }
}

/// What a message carries: text, or a file reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageContent {
    Text(String),
    File(FileData),
}

/// A single chat-displayable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who the message is attributed to
    pub role: Role,

    /// Text or file reference
    pub content: MessageContent,

    /// Marks a "thought" shown before the final answer
    #[serde(default)]
    pub is_intermediate: bool,

    /// Set when the message originates from a tool call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,

    /// Flags failure content
    #[serde(default)]
    pub is_error: bool,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn build(role: Role, content: MessageContent) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content,
            is_intermediate: false,
            tool_name: None,
            is_error: false,
            timestamp: Utc::now(),
        }
    }

    /// Create a user message (typically the prompt that started the run).
    pub fn user(content: impl Into<String>) -> Self {
        Self::build(Role::User, MessageContent::Text(content.into()))
    }

    /// Create a final (non-intermediate) assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::build(Role::Assistant, MessageContent::Text(content.into()))
    }

    /// Create an intermediate assistant message ("thought").
    pub fn thought(content: impl Into<String>) -> Self {
        Self {
            is_intermediate: true,
            ..Self::assistant(content)
        }
    }

    /// Create an intermediate assistant message attributed to a tool call.
    pub fn tool_call(tool_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_name: Some(tool_name.into()),
            ..Self::thought(content)
        }
    }

    /// Create an intermediate, error-flagged assistant message.
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::thought(content)
        }
    }

    /// Create a final, error-flagged assistant message.
    pub fn failure(content: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::assistant(content)
        }
    }

    /// Create a final assistant message carrying a file reference.
    pub fn file(file: FileData) -> Self {
        Self::build(Role::Assistant, MessageContent::File(file))
    }

    /// The text content, if this is a text message.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Text(text) => Some(text),
            MessageContent::File(_) => None,
        }
    }

    /// The file reference, if this is a file message.
    pub fn file_data(&self) -> Option<&FileData> {
        match &self.content {
            MessageContent::File(file) => Some(file),
            MessageContent::Text(_) => None,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self.content, MessageContent::File(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = Message::user("What's the weather?");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text(), Some("What's the weather?"));
        assert!(!msg.is_intermediate);
    }

    #[test]
    fn thought_flags() {
        let msg = Message::tool_call("search", "weather");
        assert_eq!(msg.role, Role::Assistant);
        assert!(msg.is_intermediate);
        assert!(!msg.is_error);
        assert_eq!(msg.tool_name.as_deref(), Some("search"));

        let err = Message::error("tool failed");
        assert!(err.is_intermediate && err.is_error);

        let failure = Message::failure("worker died");
        assert!(!failure.is_intermediate && failure.is_error);
    }

    #[test]
    fn file_message() {
        let msg = Message::file(FileData::new("out.png", IMAGE_PNG).with_alt_text("a cat"));
        assert!(msg.is_file());
        assert_eq!(msg.text(), None);
        let file = msg.file_data().unwrap();
        assert_eq!(file.mime_type, "image/png");
        assert_eq!(file.alt_text.as_deref(), Some("a cat"));
    }

    #[test]
    fn message_ids_are_unique() {
        assert_ne!(Message::thought("a").id, Message::thought("a").id);
    }

    #[test]
    fn message_serialization_roundtrip() {
        let msg = Message::tool_call("code interpreter", "print(1)");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""role":"assistant""#));
        assert!(json.contains(r#""content":{"text":"print(1)"}"#));
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tool_name.as_deref(), Some("code interpreter"));
        assert!(back.is_intermediate);
    }
}
