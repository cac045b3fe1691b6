//! Scoring result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::heuristics::HeuristicResult;

/// Binary classification of a fused risk percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Phishing,
    Safe,
}

impl Verdict {
    pub fn is_phishing(&self) -> bool {
        matches!(self, Verdict::Phishing)
    }
}

/// Full scoring result for one message. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// The analyzed message text.
    pub message: String,
    /// Phishing-class probability from the classifier, in [0, 1].
    pub classifier_probability: f64,
    /// Heuristic layer outcome (score and triggered reasons).
    pub heuristic: HeuristicResult,
    /// Fused risk percentage, in [0, 100].
    pub risk: f64,
    pub verdict: Verdict,
}

/// Ordered batch results plus aggregate statistics.
///
/// Position i of the input batch corresponds to `assessments[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub assessments: Vec<RiskAssessment>,
    /// Total messages scanned
    pub total: usize,
    /// Messages with a phishing verdict
    pub phishing_count: usize,
    /// (total - phishing) / total * 100
    pub safety_rate: f64,
}
