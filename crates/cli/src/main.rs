//! AgentStream CLI: the main entry point.
//!
//! Commands:
//! - `replay` : Stream a scripted agent run as chat messages
//! - `config` : Show the effective configuration

use std::path::PathBuf;

use agentstream_config::{AppConfig, LogFormat, StreamMode};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "agentstream",
    about = "AgentStream: replay agent runs as live chat streams",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of ~/.agentstream/config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream a scripted agent run
    Replay {
        /// Path to the JSON script
        script: PathBuf,

        /// Override the configured stream mode (polling or native)
        #[arg(short, long)]
        mode: Option<StreamMode>,

        /// Print one chat-widget JSON object per message
        #[arg(long)]
        json: bool,

        /// Prompt handed to the agent
        #[arg(short, long, default_value = "")]
        prompt: String,
    },

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = AppConfig::load_with(cli.config.as_deref())
        .map_err(|e| format!("Failed to load config: {e}"))?;

    init_tracing(cli.verbose, config.logging.format);

    match cli.command {
        Commands::Replay {
            script,
            mode,
            json,
            prompt,
        } => {
            let args = commands::replay::ReplayArgs {
                script,
                mode,
                json,
                prompt,
            };
            commands::replay::run(&config, args).await?
        }
        Commands::Config => commands::config_cmd::show(&config, cli.config.as_deref()).await?,
    }

    Ok(())
}

fn init_tracing(verbose: bool, format: LogFormat) {
    let filter = if verbose { "debug" } else { "info" };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr);

    // Logs go to stderr so `--json` output on stdout stays parseable.
    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
