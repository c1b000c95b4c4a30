//! Chat widget wire format.
//!
//! The widget expects thoughts to carry a `thought_metadata` object and
//! file messages to carry a `file` object instead of `content`.

use serde::{Deserialize, Serialize};

use crate::message::{Message, MessageContent, Role};

/// Per-message metadata the widget uses to render thoughts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThoughtMetadata {
    #[serde(default)]
    pub error: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireFile {
    pub path: String,
    pub mime_type: String,
}

/// A message as serialized for the chat widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireMessage {
    Text {
        role: Role,
        content: String,
        #[serde(default)]
        thought_metadata: ThoughtMetadata,
    },
    File {
        role: Role,
        file: WireFile,
        #[serde(default)]
        alt_text: Option<String>,
        #[serde(default)]
        thought_metadata: ThoughtMetadata,
    },
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        let thought_metadata = ThoughtMetadata {
            error: message.is_error,
            tool_name: message.tool_name.clone(),
        };
        match &message.content {
            MessageContent::Text(text) => Self::Text {
                role: message.role,
                content: text.clone(),
                thought_metadata,
            },
            MessageContent::File(file) => Self::File {
                role: message.role,
                file: WireFile {
                    path: file.path.clone(),
                    mime_type: file.mime_type.clone(),
                },
                alt_text: file.alt_text.clone(),
                thought_metadata,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{FileData, IMAGE_PNG};
    use serde_json::json;

    #[test]
    fn text_message_shape() {
        let wire = WireMessage::from(&Message::tool_call("search", "weather"));
        let value = serde_json::to_value(&wire).unwrap();
        assert_eq!(
            value,
            json!({
                "role": "assistant",
                "content": "weather",
                "thought_metadata": {"error": false, "tool_name": "search"}
            })
        );
    }

    #[test]
    fn file_message_shape() {
        let wire = WireMessage::from(&Message::file(FileData::new("out.png", IMAGE_PNG)));
        let value = serde_json::to_value(&wire).unwrap();
        assert_eq!(value["file"]["path"], "out.png");
        assert_eq!(value["file"]["mime_type"], "image/png");
        assert!(value.get("content").is_none());
    }

    #[test]
    fn error_flag_carried() {
        let wire = WireMessage::from(&Message::error("boom"));
        match wire {
            WireMessage::Text {
                thought_metadata, ..
            } => assert!(thought_metadata.error),
            other => panic!("Expected text message, got {:?}", other),
        }
    }

    #[test]
    fn parses_widget_payloads() {
        let text: WireMessage =
            serde_json::from_value(json!({"role": "user", "content": "hi"})).unwrap();
        assert!(matches!(text, WireMessage::Text { role: Role::User, .. }));

        let file: WireMessage = serde_json::from_value(json!({
            "role": "assistant",
            "file": {"path": "a.wav", "mime_type": "audio/wav"},
            "alt_text": null
        }))
        .unwrap();
        assert!(matches!(file, WireMessage::File { .. }));
    }
}
