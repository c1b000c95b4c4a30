//! `agentstream config`: show the effective configuration.

use std::path::Path;

use agentstream_config::AppConfig;

pub async fn show(
    config: &AppConfig,
    path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| AppConfig::config_dir().join("config.toml"));
    println!("# Config file: {}", config_path.display());
    println!("{}", config.to_toml());
    Ok(())
}
