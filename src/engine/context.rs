//! Bounded window of recent user utterances

use std::collections::VecDeque;

/// Default number of utterances kept in the window
pub const DEFAULT_CONTEXT_SIZE: usize = 5;

/// Sliding window over the last `capacity` raw user utterances
///
/// The oldest utterance is evicted when a new one would exceed the capacity.
/// Response selection does not read it yet; it is kept so that
/// context-aware responders can be plugged in later.
///
/// # Examples
///
/// ```
/// use haven::engine::RecentContext;
///
/// let mut context = RecentContext::new(2);
/// context.push("one");
/// context.push("two");
/// context.push("three");
/// assert_eq!(context.to_vec(), vec!["two", "three"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentContext {
    entries: VecDeque<String>,
    capacity: usize,
}

impl RecentContext {
    /// Creates an empty window; a capacity of zero is raised to one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Pushes an utterance, evicting the oldest entries beyond capacity
    pub fn push(&mut self, utterance: impl Into<String>) {
        self.entries.push_back(utterance.into());
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Copies the window, oldest first
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_owned).collect()
    }

    /// Most recent utterance, if any
    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// Number of utterances currently held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been pushed since creation or `clear`
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of utterances kept
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for RecentContext {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity_is_five() {
        let context = RecentContext::default();
        assert_eq!(context.capacity(), 5);
        assert!(context.is_empty());
    }

    #[test]
    fn test_sixth_push_evicts_oldest() {
        let mut context = RecentContext::default();
        for i in 1..=6 {
            context.push(format!("u{}", i));
        }
        assert_eq!(context.to_vec(), vec!["u2", "u3", "u4", "u5", "u6"]);
        assert_eq!(context.latest(), Some("u6"));
    }

    #[test]
    fn test_zero_capacity_keeps_latest() {
        let mut context = RecentContext::new(0);
        context.push("a");
        context.push("b");
        assert_eq!(context.to_vec(), vec!["b"]);
    }

    #[test]
    fn test_clear_empties_window() {
        let mut context = RecentContext::default();
        context.push("hello");
        context.clear();
        assert!(context.is_empty());
        assert_eq!(context.latest(), None);
    }

    #[test]
    fn test_iter_runs_oldest_to_newest() {
        let mut context = RecentContext::new(3);
        for u in ["a", "b", "c", "d"] {
            context.push(u);
        }
        let seen: Vec<&str> = context.iter().collect();
        assert_eq!(seen, vec!["b", "c", "d"]);
        assert_eq!(context.len(), 3);
    }
}
