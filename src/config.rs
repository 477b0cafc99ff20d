//! Configuration management for Haven
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::engine::responder::{DEFAULT_LATENCY_MAX_MS, DEFAULT_LATENCY_MIN_MS};
use crate::engine::DEFAULT_CONTEXT_SIZE;
use crate::error::{HavenError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper limit accepted for the simulated latency
const MAX_LATENCY_MS: u64 = 60_000;
/// Upper limit accepted for the recent-context window
const MAX_CONTEXT_SIZE: usize = 100;

/// Main configuration structure for Haven
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Response engine settings
    #[serde(default)]
    pub engine: EngineConfig,
    /// Chat history mirroring
    #[serde(default)]
    pub history: HistoryConfig,
    /// Logging output
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Response engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Simulated reply latency
    #[serde(default)]
    pub latency: LatencyConfig,

    /// Number of recent user utterances kept in context
    #[serde(default = "default_context_size")]
    pub context_size: usize,
}

fn default_context_size() -> usize {
    DEFAULT_CONTEXT_SIZE
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            latency: LatencyConfig::default(),
            context_size: default_context_size(),
        }
    }
}

/// Simulated latency bounds, `[min_ms, max_ms)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyConfig {
    /// Inclusive lower bound in milliseconds
    #[serde(default = "default_latency_min")]
    pub min_ms: u64,

    /// Exclusive upper bound in milliseconds
    #[serde(default = "default_latency_max")]
    pub max_ms: u64,
}

fn default_latency_min() -> u64 {
    DEFAULT_LATENCY_MIN_MS
}

fn default_latency_max() -> u64 {
    DEFAULT_LATENCY_MAX_MS
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            min_ms: default_latency_min(),
            max_ms: default_latency_max(),
        }
    }
}

/// Chat history configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Mirror chat turns into the history database
    #[serde(default)]
    pub enabled: bool,

    /// Database path; the user data directory is used when unset
    #[serde(default)]
    pub db_path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter level when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,

    /// Optional file that receives a copy of the log output
    #[serde(default)]
    pub file_path: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            file_path: None,
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| HavenError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| HavenError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Some(value) = parse_env("HAVEN_LATENCY_MIN_MS") {
            self.engine.latency.min_ms = value;
        }

        if let Some(value) = parse_env("HAVEN_LATENCY_MAX_MS") {
            self.engine.latency.max_ms = value;
        }

        if let Some(value) = parse_env("HAVEN_CONTEXT_SIZE") {
            self.engine.context_size = value;
        }

        if let Some(value) = parse_env("HAVEN_HISTORY_ENABLED") {
            self.history.enabled = value;
        }

        if let Ok(db_path) = std::env::var("HAVEN_HISTORY_DB") {
            self.history.db_path = Some(db_path);
        }

        if let Ok(level) = std::env::var("HAVEN_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(value) = parse_env("HAVEN_JSON_LOGS") {
            self.logging.json = value;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            self.logging.level = "debug".to_string();
        }

        if let crate::cli::Commands::Chat {
            no_history, fast, ..
        } = &cli.command
        {
            if *no_history {
                self.history.enabled = false;
            }
            if *fast {
                self.engine.latency.min_ms = 0;
                self.engine.latency.max_ms = 0;
            }
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `HavenError::Config` if any value is out of range
    pub fn validate(&self) -> Result<()> {
        let latency = &self.engine.latency;
        if latency.max_ms < latency.min_ms {
            return Err(HavenError::Config(format!(
                "engine.latency.max_ms ({}) must be greater than or equal to min_ms ({})",
                latency.max_ms, latency.min_ms
            ))
            .into());
        }

        if latency.max_ms > MAX_LATENCY_MS {
            return Err(HavenError::Config(format!(
                "engine.latency.max_ms must be less than or equal to {}",
                MAX_LATENCY_MS
            ))
            .into());
        }

        if self.engine.context_size == 0 {
            return Err(HavenError::Config(
                "engine.context_size must be greater than 0".to_string(),
            )
            .into());
        }

        if self.engine.context_size > MAX_CONTEXT_SIZE {
            return Err(HavenError::Config(format!(
                "engine.context_size must be less than or equal to {}",
                MAX_CONTEXT_SIZE
            ))
            .into());
        }

        if self.history.enabled && matches!(self.history.db_path.as_deref(), Some("")) {
            return Err(
                HavenError::Config("history.db_path cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Invalid {}: {}", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use serial_test::serial;

    fn chat_cli(no_history: bool, fast: bool) -> Cli {
        Cli {
            config: None,
            verbose: false,
            command: Commands::Chat { no_history, fast },
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.engine.latency.min_ms, 1500);
        assert_eq!(config.engine.latency.max_ms, 2500);
        assert_eq!(config.engine.context_size, 5);
        assert!(!config.history.enabled);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_validation_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_inverted_latency() {
        let mut config = Config::default();
        config.engine.latency.min_ms = 3000;
        config.engine.latency.max_ms = 1000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_latency_too_large() {
        let mut config = Config::default();
        config.engine.latency.max_ms = 120_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_context() {
        let mut config = Config::default();
        config.engine.context_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_history_path() {
        let mut config = Config::default();
        config.history.enabled = true;
        config.history.db_path = Some(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
engine:
  latency:
    min_ms: 10
    max_ms: 20
  context_size: 8
history:
  enabled: true
  db_path: /tmp/haven-history
logging:
  level: debug
  json: true
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.engine.latency.min_ms, 10);
        assert_eq!(config.engine.latency.max_ms, 20);
        assert_eq!(config.engine.context_size, 8);
        assert!(config.history.enabled);
        assert_eq!(config.history.db_path.as_deref(), Some("/tmp/haven-history"));
        assert!(config.logging.json);
        assert!(config.logging.file_path.is_none());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("engine:\n  context_size: 3\n").unwrap();
        assert_eq!(config.engine.context_size, 3);
        assert_eq!(config.engine.latency.min_ms, 1500);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    #[serial]
    fn test_load_nonexistent_file_uses_defaults() {
        let config = Config::load("nonexistent.yaml", &chat_cli(false, false)).unwrap();
        assert_eq!(config.engine.context_size, 5);
    }

    #[test]
    #[serial]
    fn test_cli_fast_and_no_history_override() {
        std::env::set_var("HAVEN_HISTORY_ENABLED", "true");
        let config = Config::load("nonexistent.yaml", &chat_cli(true, true)).unwrap();
        std::env::remove_var("HAVEN_HISTORY_ENABLED");

        assert!(!config.history.enabled);
        assert_eq!(config.engine.latency.min_ms, 0);
        assert_eq!(config.engine.latency.max_ms, 0);
    }

    #[test]
    #[serial]
    fn test_apply_env_vars_overrides_engine() {
        std::env::set_var("HAVEN_LATENCY_MIN_MS", "5");
        std::env::set_var("HAVEN_LATENCY_MAX_MS", "not-a-number");
        std::env::set_var("HAVEN_CONTEXT_SIZE", "7");

        let mut config = Config::default();
        config.apply_env_vars();

        std::env::remove_var("HAVEN_LATENCY_MIN_MS");
        std::env::remove_var("HAVEN_LATENCY_MAX_MS");
        std::env::remove_var("HAVEN_CONTEXT_SIZE");

        assert_eq!(config.engine.latency.min_ms, 5);
        assert_eq!(config.engine.latency.max_ms, 2500);
        assert_eq!(config.engine.context_size, 7);
    }
}
