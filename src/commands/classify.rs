//! One-shot crisis screening

use crate::engine::{classify, matched_keywords, Classification};
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;

/// Screening result printed by `haven classify`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifyReport {
    pub classification: Classification,
    pub keywords: Vec<&'static str>,
}

/// Screen `text` without producing a reply
pub fn screen(text: &str) -> ClassifyReport {
    ClassifyReport {
        classification: classify(text),
        keywords: matched_keywords(text),
    }
}

/// Handle `haven classify`
///
/// # Errors
///
/// Returns error if JSON serialization fails
pub fn run_classify(text: &str, json: bool) -> Result<()> {
    let report = screen(text);
    tracing::debug!(classification = %report.classification, "Screened text");

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match report.classification {
        Classification::Crisis => {
            println!("{}", "crisis".red().bold());
            println!("matched: {}", report.keywords.join(", "));
        }
        Classification::Normal => println!("{}", "normal".green()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_crisis_report() {
        let report = screen("I might OVERDOSE");
        assert_eq!(report.classification, Classification::Crisis);
        assert_eq!(report.keywords, vec!["overdose"]);
    }

    #[test]
    fn test_report_json_shape() {
        let json = serde_json::to_value(screen("nice walk today")).unwrap();
        assert_eq!(json["classification"], "normal");
        assert_eq!(json["keywords"], serde_json::json!([]));
    }
}
