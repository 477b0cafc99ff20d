//! Response engine for Haven
//!
//! Screens user utterances for crisis-risk keywords and selects a canned
//! supportive reply, or the crisis protocol reply with helpline resources.

pub mod classifier;
pub mod context;
pub mod responder;

pub use classifier::{classify, matched_keywords, Classification};
pub use context::{RecentContext, DEFAULT_CONTEXT_SIZE};
pub use responder::{Responder, ResponseEngine};
