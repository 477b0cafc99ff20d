//! Haven - supportive chat companion library
//!
//! This library provides the conversation core behind the `haven` CLI: a
//! response engine that screens utterances for crisis-risk keywords and picks
//! canned supportive replies, and a conversation store that owns the session
//! transcript and publishes every change to subscribers.
//!
//! Haven performs lexical screening only. It is not a crisis service and
//! makes no clinical-safety guarantee.
//!
//! # Architecture
//!
//! - `catalog`: static response, resource, and keyword tables
//! - `engine`: crisis classification, recent-context window, and the `Responder` seam
//! - `conversation`: transcript turns and the observable conversation store
//! - `history`: optional chat-history persistence backend
//! - `config`: configuration loading and validation
//! - `logging`: tracing subscriber setup
//! - `cli` / `commands`: command-line interface and handlers
//! - `error`: error types and result aliases
//!
//! # Example
//!
//! ```
//! use haven::{ConversationStore, ResponseEngine};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut store = ConversationStore::new(ResponseEngine::instant());
//!     let mut updates = store.subscribe();
//!
//!     store.send("I had a rough day").await;
//!
//!     assert!(updates.has_changed().unwrap());
//!     assert_eq!(updates.borrow_and_update().transcript.len(), 3);
//! }
//! ```

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod conversation;
pub mod engine;
pub mod error;
pub mod history;
pub mod logging;

// Re-export commonly used types
pub use config::Config;
pub use conversation::{ConversationSnapshot, ConversationStore, Role, SendOutcome, Turn};
pub use engine::{classify, Classification, RecentContext, Responder, ResponseEngine};
pub use error::{HavenError, Result};
