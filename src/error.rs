//! Error types for Haven
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Haven operations
///
/// Every failure the conversation core can produce is locally recoverable:
/// the store catches responder failures at the `send` boundary and leaves
/// the transcript in its previous state.
#[derive(Error, Debug)]
pub enum HavenError {
    /// Empty or whitespace-only utterance handed to the response engine
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The responder failed to produce a reply
    #[error("Engine failure: {0}")]
    EngineFailure(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chat history storage errors (database operations)
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for Haven operations
///
/// Uses `anyhow::Error` so callers can attach context while still being
/// able to downcast to [`HavenError`].
pub type Result<T> = anyhow::Result<T>;
