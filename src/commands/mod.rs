/*!
Command handlers for the CLI

This module provides the handlers invoked by the CLI entrypoint:

- `chat`     — Interactive chat session
- `classify` — One-shot crisis screening of a piece of text
- `history`  — Inspect or clear the stored chat history

Handlers are thin; the conversation store and response engine do the work.
*/

use crate::config::HistoryConfig;
use crate::error::Result;
use crate::history::SledHistory;

pub mod chat;
pub mod classify;
pub mod history;
pub mod special_commands;

/// Open the history database named by the configuration
///
/// Falls back to the user data directory when no path is configured.
///
/// # Errors
///
/// Returns `HavenError::Storage` if the database cannot be opened
pub fn open_history(config: &HistoryConfig) -> Result<SledHistory> {
    let path = match &config.db_path {
        Some(path) => std::path::PathBuf::from(path),
        None => SledHistory::default_path()?,
    };
    tracing::debug!("Opening chat history at {}", path.display());
    SledHistory::open(path)
}
