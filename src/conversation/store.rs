//! Conversation store
//!
//! Owns the transcript, busy flag and recent-utterance window for one
//! session. Every mutation publishes a fresh [`ConversationSnapshot`] on a
//! `tokio::sync::watch` channel before the mutating call returns, so a
//! presentation layer can subscribe instead of polling shared fields.
//!
//! The store is driven through `&mut self`, which serializes `send` and
//! `clear`. The responder's simulated latency is a cooperative suspension
//! point with no cancellation.

use super::turn::{Role, Turn};
use crate::catalog::WELCOME_MESSAGE;
use crate::engine::{RecentContext, Responder, DEFAULT_CONTEXT_SIZE};
use chrono::Utc;
use tokio::sync::watch;
use ulid::{Generator, Ulid};

/// Notice shown when the responder fails
pub const ENGINE_FAILURE_NOTICE: &str =
    "Sorry, I'm having trouble responding right now. Please try again in a moment.";

/// State published to subscribers after every mutation
#[derive(Debug, Clone, Default)]
pub struct ConversationSnapshot {
    /// Full transcript, oldest first
    pub transcript: Vec<Turn>,
    /// True while a reply is being generated
    pub busy: bool,
    /// Non-blocking notice from the last failed send, if any
    pub notice: Option<String>,
}

/// Result of [`ConversationStore::send`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input, nothing happened
    Ignored,
    /// The assistant turn appended for this send
    Replied(Turn),
    /// The responder failed; the transcript is unchanged
    Failed {
        /// User-facing notice
        notice: String,
    },
}

/// Transcript owner for the active session
///
/// # Examples
///
/// ```
/// use haven::conversation::{ConversationStore, Role};
/// use haven::engine::ResponseEngine;
///
/// # #[tokio::main]
/// # async fn main() {
/// let mut store = ConversationStore::new(ResponseEngine::instant());
/// assert_eq!(store.transcript().len(), 1);
///
/// store.send("I feel anxious about lunch").await;
/// assert_eq!(store.transcript().len(), 3);
/// assert_eq!(store.transcript()[1].role(), Role::User);
///
/// store.clear();
/// assert_eq!(store.transcript().len(), 1);
/// # }
/// ```
pub struct ConversationStore {
    transcript: Vec<Turn>,
    busy: bool,
    notice: Option<String>,
    context: RecentContext,
    responder: Box<dyn Responder>,
    ids: Generator,
    tx: watch::Sender<ConversationSnapshot>,
}

impl ConversationStore {
    /// Creates a store seeded with the welcome turn
    pub fn new(responder: impl Responder + 'static) -> Self {
        Self::new_boxed(Box::new(responder), DEFAULT_CONTEXT_SIZE)
    }

    /// Creates a store with a custom recent-context window size
    pub fn with_context_size(responder: impl Responder + 'static, context_size: usize) -> Self {
        Self::new_boxed(Box::new(responder), context_size)
    }

    /// Creates a store from an already boxed responder
    pub fn new_boxed(responder: Box<dyn Responder>, context_size: usize) -> Self {
        let (tx, _) = watch::channel(ConversationSnapshot::default());
        let mut store = Self {
            transcript: Vec::new(),
            busy: false,
            notice: None,
            context: RecentContext::new(context_size),
            responder,
            ids: Generator::new(),
            tx,
        };
        store.seed_welcome();
        store.publish();
        store
    }

    /// Appends a turn with a fresh id and timestamp and returns it
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> Turn {
        let turn = self.push_turn(role, content);
        self.publish();
        turn
    }

    /// Sends one user utterance and appends the reply
    ///
    /// Blank input is ignored without touching the transcript. If the
    /// responder fails, the user turn and the recent-context push are rolled
    /// back, the busy flag is cleared and a notice is published.
    pub async fn send(&mut self, content: &str) -> SendOutcome {
        if content.trim().is_empty() {
            tracing::debug!("Ignoring blank message");
            return SendOutcome::Ignored;
        }

        let rollback_len = self.transcript.len();
        let rollback_context = self.context.clone();

        self.push_turn(Role::User, content);
        self.busy = true;
        self.notice = None;
        self.publish();

        let result = self.responder.respond(content, &mut self.context).await;
        self.busy = false;

        match result {
            Ok(reply) => {
                let turn = self.push_turn(Role::Assistant, reply);
                self.publish();
                SendOutcome::Replied(turn)
            }
            Err(e) => {
                tracing::warn!("Responder failed, rolling back user turn: {:#}", e);
                self.transcript.truncate(rollback_len);
                self.context = rollback_context;
                self.notice = Some(ENGINE_FAILURE_NOTICE.to_string());
                self.publish();
                SendOutcome::Failed {
                    notice: ENGINE_FAILURE_NOTICE.to_string(),
                }
            }
        }
    }

    /// Resets the transcript to a single welcome turn and empties the context
    pub fn clear(&mut self) {
        self.transcript.clear();
        self.context.clear();
        self.notice = None;
        self.busy = false;
        self.seed_welcome();
        tracing::info!("Conversation cleared");
        self.publish();
    }

    /// Subscribes to snapshots; the current state is already marked as seen
    pub fn subscribe(&self) -> watch::Receiver<ConversationSnapshot> {
        self.tx.subscribe()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            transcript: self.transcript.clone(),
            busy: self.busy,
            notice: self.notice.clone(),
        }
    }

    /// Turns in creation order, welcome first
    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// Returns true while a reply is pending
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Failure notice from the last `send`, cleared by the next `send` or `clear`
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Window of recent user utterances seen by the responder
    pub fn recent_context(&self) -> &RecentContext {
        &self.context
    }

    fn seed_welcome(&mut self) {
        self.push_turn(Role::Assistant, WELCOME_MESSAGE);
    }

    fn push_turn(&mut self, role: Role, content: impl Into<String>) -> Turn {
        let now = Utc::now();
        // clamp so timestamps never go backwards within a transcript
        let timestamp = match self.transcript.last() {
            Some(last) if last.timestamp() > now => last.timestamp(),
            _ => now,
        };
        let id = self
            .ids
            .generate()
            .unwrap_or_else(|_| Ulid::new())
            .to_string();

        let turn = Turn::new(id, role, content, timestamp);
        self.transcript.push(turn.clone());
        turn
    }

    fn publish(&self) {
        self.tx.send_replace(self.snapshot());
    }
}
