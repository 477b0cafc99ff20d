//! Conversation management for Haven
//!
//! This module owns the session transcript and the round trip from a user
//! utterance through the response engine and back into the transcript.

pub mod store;
pub mod turn;

pub use store::{ConversationSnapshot, ConversationStore, SendOutcome, ENGINE_FAILURE_NOTICE};
pub use turn::{Role, Turn};
