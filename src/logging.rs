//! Logging setup
//!
//! Human-readable or JSON output on stderr, optionally teed to a log file.
//! `RUST_LOG` wins over the configured level.

use crate::config::LoggingConfig;
use anyhow::Result;
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the default filter directive for a level, e.g. `haven=info`
pub fn filter_directive(level: &str) -> String {
    format!("haven={}", level)
}

/// Initialize the global tracing subscriber
///
/// Logs go to stderr so they do not interleave with chat output on stdout.
///
/// # Errors
///
/// Returns error if the filter is invalid, the log file cannot be opened,
/// or a subscriber is already installed
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directive(&config.level)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let file = match &config.file_path {
        Some(path) => Some(Arc::new(
            OpenOptions::new().create(true).append(true).open(path)?,
        )),
        None => None,
    };

    if config.json {
        let stderr_layer = fmt::layer().json().with_writer(std::io::stderr);
        match file {
            Some(file) => {
                let file_layer = fmt::layer().json().with_writer(file);
                registry.with(stderr_layer).with(file_layer).try_init()?;
            }
            None => registry.with(stderr_layer).try_init()?,
        }
    } else {
        let stderr_layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_writer(std::io::stderr);
        match file {
            Some(file) => {
                let file_layer = fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(file);
                registry.with(stderr_layer).with(file_layer).try_init()?;
            }
            None => registry.with(stderr_layer).try_init()?,
        }
    }

    Ok(())
}
