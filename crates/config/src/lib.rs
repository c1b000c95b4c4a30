//! Configuration loading, validation, and management for AgentStream.
//!
//! Loads configuration from `~/.agentstream/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The root configuration structure.
///
/// Maps directly to `~/.agentstream/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Stream driver settings
    #[serde(default)]
    pub stream: StreamConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// How often the polling driver checks the agent log
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Upper bound on joining a worker that has already reported completion.
    /// A safety net against a stuck join; normal runs never wait this long.
    #[serde(default = "default_join_timeout_ms")]
    pub join_timeout_ms: u64,

    /// Which driver to use when an agent supports both
    #[serde(default)]
    pub mode: StreamMode,
}

fn default_poll_interval_ms() -> u64 {
    100
}
fn default_join_timeout_ms() -> u64 {
    100
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            join_timeout_ms: default_join_timeout_ms(),
            mode: StreamMode::default(),
        }
    }
}

/// Strategy for discovering new log entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamMode {
    /// Run the agent on a worker and poll its log
    #[default]
    Polling,
    /// Consume the agent's own incremental stream
    Native,
}

impl FromStr for StreamMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "polling" => Ok(Self::Polling),
            "native" => Ok(Self::Native),
            other => Err(ConfigError::ValidationError(format!(
                "unknown stream mode '{other}' (expected 'polling' or 'native')"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::ValidationError(format!(
                "unknown log format '{other}' (expected 'pretty' or 'json')"
            ))),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.agentstream/config.toml).
    ///
    /// Environment variables override file values:
    /// - `AGENTSTREAM_POLL_INTERVAL_MS`
    /// - `AGENTSTREAM_JOIN_TIMEOUT_MS`
    /// - `AGENTSTREAM_MODE`
    /// - `AGENTSTREAM_LOG_FORMAT`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(None)
    }

    /// Load from `path` (or the default path) and apply environment overrides.
    pub fn load_with(path: Option<&Path>) -> Result<Self, ConfigError> {
        let default_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(path.unwrap_or(default_path.as_path()))?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("AGENTSTREAM_POLL_INTERVAL_MS") {
            self.stream.poll_interval_ms = parse_millis("AGENTSTREAM_POLL_INTERVAL_MS", &raw)?;
        }
        if let Some(raw) = lookup("AGENTSTREAM_JOIN_TIMEOUT_MS") {
            self.stream.join_timeout_ms = parse_millis("AGENTSTREAM_JOIN_TIMEOUT_MS", &raw)?;
        }
        if let Some(raw) = lookup("AGENTSTREAM_MODE") {
            self.stream.mode = raw.parse()?;
        }
        if let Some(raw) = lookup("AGENTSTREAM_LOG_FORMAT") {
            self.logging.format = raw.parse()?;
        }
        self.validate()
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".agentstream")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.stream.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "stream.poll_interval_ms must be > 0".into(),
            ));
        }

        if self.stream.join_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "stream.join_timeout_ms must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        Self::default().to_toml()
    }

    /// Render this configuration as TOML.
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

fn parse_millis(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::ValidationError(format!("{key} must be an integer, got '{raw}'")))
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.stream.poll_interval_ms, 100);
        assert_eq!(config.stream.join_timeout_ms, 100);
        assert_eq!(config.stream.mode, StreamMode::Polling);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.stream.poll_interval_ms, config.stream.poll_interval_ms);
        assert_eq!(parsed.logging.format, config.logging.format);
    }

    #[test]
    fn zero_poll_interval_rejected() {
        let config = AppConfig {
            stream: StreamConfig {
                poll_interval_ms: 0,
                ..StreamConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_join_timeout_rejected() {
        let config = AppConfig {
            stream: StreamConfig {
                join_timeout_ms: 0,
                ..StreamConfig::default()
            },
            ..AppConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("join_timeout_ms"));
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().stream.poll_interval_ms, 100);
    }

    #[test]
    fn loads_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[stream]
poll_interval_ms = 25
mode = "native"

[logging]
format = "json"
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.stream.poll_interval_ms, 25);
        assert_eq!(config.stream.join_timeout_ms, 100);
        assert_eq!(config.stream.mode, StreamMode::Native);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn unparseable_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[stream\npoll_interval_ms = ").unwrap();
        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn overrides_apply() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("AGENTSTREAM_POLL_INTERVAL_MS", "10"),
            ("AGENTSTREAM_MODE", "Native"),
            ("AGENTSTREAM_LOG_FORMAT", "json"),
        ]);
        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.stream.poll_interval_ms, 10);
        assert_eq!(config.stream.mode, StreamMode::Native);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn bad_override_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(|key| (key == "AGENTSTREAM_JOIN_TIMEOUT_MS").then(|| "soon".into()))
            .unwrap_err();
        assert!(err.to_string().contains("AGENTSTREAM_JOIN_TIMEOUT_MS"));

        let err = config
            .apply_overrides(|key| (key == "AGENTSTREAM_LOG_FORMAT").then(|| "xml".into()))
            .unwrap_err();
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("poll_interval_ms = 100"));
        assert!(toml_str.contains(r#"mode = "polling""#));
    }
}
