//! The ordered chat history handed to the UI.

use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::Message;
use crate::wire::WireMessage;

/// An append-only list of messages in display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a transcript with the user's prompt.
    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        let mut transcript = Self::new();
        transcript.push(Message::user(prompt));
        transcript
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Append every message of `stream` as it arrives. Returns how many were appended.
    pub async fn record<S>(&mut self, stream: S) -> usize
    where
        S: Stream<Item = Message>,
    {
        let mut stream = std::pin::pin!(stream);
        let mut count = 0;
        while let Some(message) = stream.next().await {
            self.push(message);
            count += 1;
        }
        count
    }

    /// The transcript in the chat widget's wire format.
    pub fn to_wire(&self) -> Vec<WireMessage> {
        self.messages.iter().map(WireMessage::from).collect()
    }

    /// The wire format as a JSON array.
    pub fn to_wire_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_wire())?)
    }
}

impl Extend<Message> for Transcript {
    fn extend<I: IntoIterator<Item = Message>>(&mut self, iter: I) {
        self.messages.extend(iter);
    }
}
