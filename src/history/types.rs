//! Record types shared by chat history backends

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A chat message as persisted by a history backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessage {
    /// Identifier assigned by the backend
    pub id: String,
    /// Message text
    pub content: String,
    /// True for user messages, false for assistant replies
    pub is_user: bool,
    /// When the message was stored
    pub timestamp: DateTime<Utc>,
}
