//! Chat history persistence
//!
//! The conversation core never persists anything itself. Callers that want a
//! durable record mirror turns into a [`ChatHistory`] backend. The built-in
//! backend stores messages in an embedded `sled` database.

use crate::error::{HavenError, Result};
use chrono::Utc;
use directories::ProjectDirs;
use sled::Db;
use std::path::{Path, PathBuf};
use ulid::Ulid;

pub mod types;
pub use types::StoredMessage;

/// Persistence boundary for chat messages
pub trait ChatHistory: Send + Sync {
    /// Stores one message and returns its assigned identifier
    ///
    /// # Errors
    ///
    /// Returns `HavenError::Storage` if the message cannot be written
    fn save_message(&self, content: &str, is_user: bool) -> Result<String>;

    /// Loads every stored message in insertion order
    ///
    /// # Errors
    ///
    /// Returns `HavenError::Storage` if reading or decoding fails
    fn load_messages(&self) -> Result<Vec<StoredMessage>>;

    /// Removes every stored message
    ///
    /// # Errors
    ///
    /// Returns `HavenError::Storage` if the backend cannot be cleared
    fn clear(&self) -> Result<()>;
}

/// Chat history stored in an embedded `sled` database
///
/// Keys are big-endian sequence numbers from `sled`'s id generator, so
/// iteration order is insertion order.
pub struct SledHistory {
    db: Db,
}

impl SledHistory {
    /// Open or create a history database at `path`
    ///
    /// # Errors
    ///
    /// Returns `HavenError::Storage` if the database cannot be opened
    ///
    /// # Examples
    ///
    /// ```
    /// use haven::history::{ChatHistory, SledHistory};
    ///
    /// # fn main() -> haven::error::Result<()> {
    /// let dir = tempfile::tempdir()?;
    /// let history = SledHistory::open(dir.path().join("history"))?;
    /// history.save_message("hello", true)?;
    /// assert_eq!(history.load_messages()?.len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = sled::open(path)
            .map_err(|e| HavenError::Storage(format!("Failed to open database: {}", e)))?;
        Ok(Self { db })
    }

    /// Default database location in the user's data directory
    ///
    /// # Errors
    ///
    /// Returns `HavenError::Storage` if no data directory can be determined
    pub fn default_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "haven", "haven")
            .ok_or_else(|| HavenError::Storage("Could not determine data directory".into()))?;
        Ok(proj_dirs.data_dir().join("history"))
    }

    /// Number of stored messages
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Returns true if no messages are stored
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

impl ChatHistory for SledHistory {
    fn save_message(&self, content: &str, is_user: bool) -> Result<String> {
        let seq = self
            .db
            .generate_id()
            .map_err(|e| HavenError::Storage(format!("Id generation failed: {}", e)))?;

        let message = StoredMessage {
            id: Ulid::new().to_string(),
            content: content.to_string(),
            is_user,
            timestamp: Utc::now(),
        };
        let value = serde_json::to_vec(&message)
            .map_err(|e| HavenError::Storage(format!("Serialization failed: {}", e)))?;

        self.db
            .insert(seq.to_be_bytes(), value)
            .map_err(|e| HavenError::Storage(format!("Insert failed: {}", e)))?;
        self.db
            .flush()
            .map_err(|e| HavenError::Storage(format!("Flush failed: {}", e)))?;

        Ok(message.id)
    }

    fn load_messages(&self) -> Result<Vec<StoredMessage>> {
        let mut messages = Vec::new();
        for result in self.db.iter() {
            let (_, value) =
                result.map_err(|e| HavenError::Storage(format!("Iteration failed: {}", e)))?;
            let message: StoredMessage = serde_json::from_slice(&value)
                .map_err(|e| HavenError::Storage(format!("Deserialization failed: {}", e)))?;
            messages.push(message);
        }
        Ok(messages)
    }

    fn clear(&self) -> Result<()> {
        self.db
            .clear()
            .map_err(|e| HavenError::Storage(format!("Clear failed: {}", e)))?;
        self.db
            .flush()
            .map_err(|e| HavenError::Storage(format!("Flush failed: {}", e)))?;
        Ok(())
    }
}
