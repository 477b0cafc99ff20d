//! Response selection with simulated latency
//!
//! The [`Responder`] trait is the seam between the conversation store and
//! whatever produces replies. [`ResponseEngine`] is the built-in
//! implementation: it screens the utterance, picks a canned reply uniformly at
//! random, and then sleeps for a random interval to emulate a remote backend.
//!
//! The sleep has no cancellation hook. A caller that drops the future simply
//! discards the reply.

use super::classifier::{classify, matched_keywords, Classification};
use super::context::RecentContext;
use crate::catalog::{CRISIS_RESOURCES, CRISIS_RESPONSES, SUPPORT_RESPONSES};
use crate::config::EngineConfig;
use crate::error::{HavenError, Result};
use async_trait::async_trait;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::time::Duration;

/// Lower bound of the default simulated latency, inclusive
pub const DEFAULT_LATENCY_MIN_MS: u64 = 1500;
/// Upper bound of the default simulated latency, exclusive
pub const DEFAULT_LATENCY_MAX_MS: u64 = 2500;

/// Produces one reply for one user utterance
///
/// Implementations must push the utterance into `context` before replying.
/// Errors are caught by the conversation store, which rolls the transcript
/// back and surfaces a notice.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Generates a reply to `utterance`
    ///
    /// # Arguments
    ///
    /// * `utterance` - Non-empty user text
    /// * `context` - Recent utterance window, updated in place
    ///
    /// # Errors
    ///
    /// Returns error if no reply could be produced
    async fn respond(&self, utterance: &str, context: &mut RecentContext) -> Result<String>;
}

/// Canned-response engine with crisis screening
///
/// # Examples
///
/// ```
/// use haven::engine::{RecentContext, Responder, ResponseEngine};
///
/// # #[tokio::main]
/// # async fn main() -> haven::error::Result<()> {
/// let engine = ResponseEngine::instant();
/// let mut context = RecentContext::default();
/// let reply = engine.respond("I had a long day", &mut context).await?;
/// assert!(!reply.is_empty());
/// assert_eq!(context.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ResponseEngine {
    latency_min_ms: u64,
    latency_max_ms: u64,
}

impl ResponseEngine {
    /// Creates an engine that sleeps for a random time in `[min_ms, max_ms)`
    ///
    /// When `max_ms <= min_ms` the delay is exactly `min_ms`.
    pub fn new(latency_min_ms: u64, latency_max_ms: u64) -> Self {
        Self {
            latency_min_ms,
            latency_max_ms,
        }
    }

    /// Creates an engine with no simulated latency
    pub fn instant() -> Self {
        Self::new(0, 0)
    }

    /// Creates an engine from the `engine` section of the configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.latency.min_ms, config.latency.max_ms)
    }

    /// Builds the reply text for an utterance without sleeping
    ///
    /// Crisis replies are one random crisis response followed by every crisis
    /// resource in catalog order, each in its own paragraph.
    ///
    /// # Errors
    ///
    /// Returns `HavenError::EngineFailure` if a response table is empty
    pub fn compose(&self, utterance: &str) -> Result<String> {
        let mut rng = rand::rng();
        match classify(utterance) {
            Classification::Crisis => {
                tracing::info!(
                    keywords = ?matched_keywords(utterance),
                    "Crisis keywords detected, using crisis protocol"
                );
                let opening = CRISIS_RESPONSES.choose(&mut rng).ok_or_else(|| {
                    HavenError::EngineFailure("No crisis responses available".to_string())
                })?;

                let mut paragraphs = Vec::with_capacity(CRISIS_RESOURCES.len() + 1);
                paragraphs.push(*opening);
                paragraphs.extend_from_slice(CRISIS_RESOURCES);
                Ok(paragraphs.join("\n\n"))
            }
            Classification::Normal => {
                let reply = SUPPORT_RESPONSES.choose(&mut rng).ok_or_else(|| {
                    HavenError::EngineFailure("No support responses available".to_string())
                })?;
                Ok((*reply).to_string())
            }
        }
    }

    /// Samples the simulated latency for one reply
    pub fn sample_latency(&self) -> Duration {
        if self.latency_max_ms <= self.latency_min_ms {
            return Duration::from_millis(self.latency_min_ms);
        }
        let ms = rand::rng().random_range(self.latency_min_ms..self.latency_max_ms);
        Duration::from_millis(ms)
    }

    /// Configured latency bounds as `(min_ms, max_ms)`
    pub fn latency_bounds(&self) -> (u64, u64) {
        (self.latency_min_ms, self.latency_max_ms)
    }
}

impl Default for ResponseEngine {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY_MIN_MS, DEFAULT_LATENCY_MAX_MS)
    }
}

#[async_trait]
impl Responder for ResponseEngine {
    async fn respond(&self, utterance: &str, context: &mut RecentContext) -> Result<String> {
        if utterance.trim().is_empty() {
            return Err(HavenError::InvalidInput("utterance is empty".to_string()).into());
        }

        context.push(utterance);

        // thread rng is not Send, so both samples are taken before suspending
        let reply = self.compose(utterance)?;
        let delay = self.sample_latency();

        tracing::debug!(delay_ms = delay.as_millis() as u64, "Simulating response latency");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_normal_picks_support_response() {
        let engine = ResponseEngine::instant();
        let reply = engine.compose("I had a great day").unwrap();
        assert!(SUPPORT_RESPONSES.contains(&reply.as_str()));
    }

    #[test]
    fn test_compose_crisis_carries_resources_in_order() {
        let engine = ResponseEngine::instant();
        let reply = engine.compose("I want to die").unwrap();

        let paragraphs: Vec<&str> = reply.split("\n\n").collect();
        assert_eq!(paragraphs.len(), CRISIS_RESOURCES.len() + 1);
        assert!(CRISIS_RESPONSES.contains(&paragraphs[0]));
        assert_eq!(&paragraphs[1..], CRISIS_RESOURCES);
    }

    #[test]
    fn test_sample_latency_within_bounds() {
        let engine = ResponseEngine::default();
        for _ in 0..200 {
            let delay = engine.sample_latency();
            assert!(delay >= Duration::from_millis(1500));
            assert!(delay < Duration::from_millis(2500));
        }
    }

    #[test]
    fn test_sample_latency_degenerate_range() {
        let engine = ResponseEngine::new(300, 100);
        assert_eq!(engine.sample_latency(), Duration::from_millis(300));
        assert_eq!(ResponseEngine::instant().sample_latency(), Duration::ZERO);
    }

    #[test]
    fn test_from_config_uses_latency_bounds() {
        let mut config = EngineConfig::default();
        config.latency.min_ms = 40;
        config.latency.max_ms = 90;
        assert_eq!(ResponseEngine::from_config(&config).latency_bounds(), (40, 90));
        assert_eq!(ResponseEngine::default().latency_bounds(), (1500, 2500));
    }

    #[tokio::test]
    async fn test_respond_pushes_context() {
        let engine = ResponseEngine::instant();
        let mut context = RecentContext::default();
        engine.respond("first", &mut context).await.unwrap();
        engine.respond("second", &mut context).await.unwrap();
        assert_eq!(context.to_vec(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_respond_rejects_blank_input() {
        let engine = ResponseEngine::instant();
        let mut context = RecentContext::default();
        let err = engine.respond("   ", &mut context).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HavenError>(),
            Some(HavenError::InvalidInput(_))
        ));
        assert!(context.is_empty());
    }

    #[tokio::test]
    async fn test_respond_window_evicts_first_of_six() {
        let engine = ResponseEngine::instant();
        let mut context = RecentContext::default();
        for u in ["u1", "u2", "u3", "u4", "u5", "u6"] {
            engine.respond(u, &mut context).await.unwrap();
        }
        assert_eq!(context.to_vec(), vec!["u2", "u3", "u4", "u5", "u6"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_respond_waits_for_simulated_latency() {
        let engine = ResponseEngine::default();
        let mut context = RecentContext::default();

        let start = tokio::time::Instant::now();
        engine.respond("hello there", &mut context).await.unwrap();
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_millis(1500));
        assert!(elapsed < Duration::from_millis(2500));
    }
}
