//! Terminal message construction.

use agentstream_core::error::AgentError;
use agentstream_core::message::{AUDIO_WAV, FileData, IMAGE_PNG, Message};
use agentstream_core::output::AgentOutput;

/// Build the final message from an agent's return value.
///
/// Text becomes a non-intermediate assistant message, images and audio
/// become file messages, and any other value is shown in its string form.
pub fn terminal_message(output: AgentOutput) -> Message {
    match output {
        AgentOutput::Text(text) => Message::assistant(text),
        AgentOutput::Image(path) => Message::file(FileData::new(path, IMAGE_PNG)),
        AgentOutput::Audio(path) => Message::file(FileData::new(path, AUDIO_WAV)),
        other @ AgentOutput::Other(_) => Message::assistant(other.to_string()),
    }
}

/// Build the final error-flagged message for a run that produced no value.
pub fn failure_message(error: &AgentError) -> Message {
    Message::failure(error.to_string())
}
