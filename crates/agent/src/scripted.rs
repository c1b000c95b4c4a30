//! The scripted agent.

use agentstream_core::agent::{AgentLog, LoggedAgent, StreamingAgent};
use agentstream_core::error::AgentError;
use agentstream_core::output::{AgentEvent, AgentOutput};
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use std::path::Path;
use tracing::debug;

use crate::script::{Script, ScriptError};

/// Replays a [`Script`], appending each step to its log as it goes.
pub struct ScriptedAgent {
    script: Script,
    log: AgentLog,
}

impl ScriptedAgent {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            log: AgentLog::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(Self::new(Script::from_json(json)?))
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        Ok(Self::new(Script::load(path)?))
    }

    pub fn script(&self) -> &Script {
        &self.script
    }
}

impl LoggedAgent for ScriptedAgent {
    fn logs(&self) -> AgentLog {
        self.log.clone()
    }

    /// Blocks for the scripted delays; meant to run on a blocking worker.
    fn run(&self, prompt: &str) -> Result<AgentOutput, AgentError> {
        debug!(steps = self.script.steps.len(), prompt, "Scripted run starting");
        for step in &self.script.steps {
            if !step.delay().is_zero() {
                std::thread::sleep(step.delay());
            }
            self.log.append(step.entry.clone());
        }
        self.script.outcome.result()
    }
}

impl StreamingAgent for ScriptedAgent {
    fn run_stream<'a>(
        &'a self,
        prompt: &'a str,
    ) -> BoxStream<'a, Result<AgentEvent, AgentError>> {
        debug!(steps = self.script.steps.len(), prompt, "Scripted stream starting");
        let log = self.log.clone();

        let entries = stream::iter(&self.script.steps).then(move |step| {
            let log = log.clone();
            async move {
                if !step.delay().is_zero() {
                    tokio::time::sleep(step.delay()).await;
                }
                log.append(step.entry.clone());
                Ok::<_, AgentError>(AgentEvent::Entry(step.entry.clone()))
            }
        });
        let outcome =
            stream::once(async move { self.script.outcome.result().map(AgentEvent::Output) });

        entries.chain(outcome).boxed()
    }
}
