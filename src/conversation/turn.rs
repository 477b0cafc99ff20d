//! Transcript turns

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person chatting
    User,
    /// Haven itself
    Assistant,
    /// Session-level notes
    System,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
            Self::System => write!(f, "system"),
        }
    }
}

/// One exchanged message
///
/// Fields are private so a turn cannot be changed once the store has
/// created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    id: String,
    role: Role,
    content: String,
    timestamp: DateTime<Utc>,
}

impl Turn {
    pub(crate) fn new(
        id: String,
        role: Role,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            timestamp,
        }
    }

    /// Unique identifier (ULID)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Author of the turn
    pub fn role(&self) -> Role {
        self.role
    }

    /// Text exactly as given
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Creation time
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns true for user-authored turns
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}
