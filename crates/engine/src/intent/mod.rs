//! Query intent classification
//!
//! Tags a question as pain-point (the user describes a problem) or discovery
//! (a general product inquiry). A deliberately coarse heuristic: any hit in a
//! fixed bilingual keyword set classifies as pain-point. No stemming, no
//! negation handling.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two query modes driving prompt and synthesis structure
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum QueryMode {
    /// The user describes a problem they want solved
    PainPoint,
    /// A general inquiry about the product
    Discovery,
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryMode::PainPoint => write!(f, "pain-point"),
            QueryMode::Discovery => write!(f, "discovery"),
        }
    }
}

/// Problem language in English and Russian. Substring match, not token match:
/// "проблем" catches "проблема", "проблемы", "проблемой".
const PAIN_KEYWORDS: &[&str] = &[
    // English
    "problem",
    "issue",
    "can't",
    "cannot",
    "fail",
    "losing",
    "lost",
    "struggl",
    "stuck",
    "error",
    "mistake",
    "complaint",
    "churn",
    "miss deadlines",
    // Russian
    "проблем",
    "не можем",
    "не получается",
    "не удается",
    "не удаётся",
    "теря",
    "ошибк",
    "ошиба",
    "сложно",
    "трудно",
    "жалоб",
    "срыва",
    "путаниц",
];

/// Classify a raw question by scanning for pain keywords
pub fn classify(question: &str) -> QueryMode {
    let lowered = question.to_lowercase();

    if PAIN_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        QueryMode::PainPoint
    } else {
        QueryMode::Discovery
    }
}
