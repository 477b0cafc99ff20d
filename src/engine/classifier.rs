//! Lexical crisis screening
//!
//! A case-insensitive substring match against [`CRISIS_KEYWORDS`]. This is a
//! best-effort filter and not a clinical assessment.

use crate::catalog::CRISIS_KEYWORDS;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of screening one utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// At least one crisis keyword matched
    Crisis,
    /// No crisis keyword matched
    Normal,
}

impl Classification {
    /// Returns true for [`Classification::Crisis`]
    pub fn is_crisis(&self) -> bool {
        matches!(self, Self::Crisis)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Crisis => write!(f, "crisis"),
            Self::Normal => write!(f, "normal"),
        }
    }
}

/// Classifies an utterance as crisis or normal
///
/// The utterance is case-folded and checked for any keyword as a plain
/// substring. Callers are expected to filter out empty input first.
///
/// # Examples
///
/// ```
/// use haven::engine::{classify, Classification};
///
/// assert_eq!(classify("I want to DIE"), Classification::Crisis);
/// assert_eq!(classify("I had a great day"), Classification::Normal);
/// ```
pub fn classify(utterance: &str) -> Classification {
    let folded = utterance.to_lowercase();
    if CRISIS_KEYWORDS.iter().any(|k| folded.contains(k)) {
        Classification::Crisis
    } else {
        Classification::Normal
    }
}

/// Returns every crisis keyword found in the utterance, in catalog order
///
/// # Examples
///
/// ```
/// use haven::engine::matched_keywords;
///
/// let hits = matched_keywords("Sometimes I feel SUICIDAL");
/// assert_eq!(hits, vec!["suicidal"]);
/// ```
pub fn matched_keywords(utterance: &str) -> Vec<&'static str> {
    let folded = utterance.to_lowercase();
    CRISIS_KEYWORDS
        .iter()
        .copied()
        .filter(|k| folded.contains(k))
        .collect()
}
