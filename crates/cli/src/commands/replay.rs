//! `agentstream replay`: stream a scripted agent run.

use std::path::PathBuf;
use std::sync::Arc;

use agentstream_adapter::{DriverOptions, NativeDriver, PollingDriver};
use agentstream_agent::ScriptedAgent;
use agentstream_config::{AppConfig, StreamMode};
use agentstream_core::message::{Message, MessageContent, Role};
use agentstream_core::transcript::Transcript;
use agentstream_core::wire::WireMessage;
use futures::StreamExt;
use futures::stream::BoxStream;
use tracing::info;

pub struct ReplayArgs {
    pub script: PathBuf,
    pub mode: Option<StreamMode>,
    pub json: bool,
    pub prompt: String,
}

pub async fn run(config: &AppConfig, args: ReplayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let agent = Arc::new(ScriptedAgent::load(&args.script)?);
    let mode = args.mode.unwrap_or(config.stream.mode);
    info!(
        script = %args.script.display(),
        steps = agent.script().steps.len(),
        ?mode,
        "Replaying agent script"
    );

    let mut transcript = Transcript::new();
    if !args.prompt.is_empty() {
        let user = Message::user(&args.prompt);
        emit(&user, args.json)?;
        transcript.push(user);
    }

    let mut stream: BoxStream<'_, Message> = match mode {
        StreamMode::Polling => PollingDriver::new(DriverOptions::from(&config.stream))
            .run(agent.clone(), args.prompt.clone()),
        StreamMode::Native => NativeDriver.run(agent.as_ref(), &args.prompt),
    };

    while let Some(message) = stream.next().await {
        emit(&message, args.json)?;
        transcript.push(message);
    }

    info!(messages = transcript.len(), "Replay finished");

    match transcript.last() {
        Some(last) if last.is_error => {
            Err(last.text().unwrap_or("Agent run failed").to_string().into())
        }
        _ => Ok(()),
    }
}

fn emit(message: &Message, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string(&WireMessage::from(message))?);
    } else {
        println!("{}", render_line(message));
    }
    Ok(())
}

/// Human-readable form of one message.
pub fn render_line(message: &Message) -> String {
    let body = match &message.content {
        MessageContent::Text(text) => text.clone(),
        MessageContent::File(file) => format!("📎 {} ({})", file.path, file.mime_type),
    };

    if message.role == Role::User {
        return format!("> {body}");
    }
    if !message.is_intermediate {
        return if message.is_error {
            format!("❌ {body}")
        } else {
            format!("✅ {body}")
        };
    }

    match (&message.tool_name, message.is_error) {
        (_, true) => format!("  ⚠️  {body}"),
        (Some(tool), false) => format!("  🔧 [{tool}] {body}"),
        (None, false) => format!("  💭 {body}"),
    }
}
