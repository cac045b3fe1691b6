//! Heuristic rule types

use serde::{Deserialize, Serialize};

/// Outcome of running the rule catalog over a single message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicResult {
    /// Additive point total from all matched rules.
    pub score: u32,
    /// Human-readable reasons, in catalog order.
    pub reasons: Vec<String>,
}

impl HeuristicResult {
    pub fn is_clean(&self) -> bool {
        self.score == 0
    }
}

/// A named check in the rule catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeuristicRule {
    /// Unique ID
    pub id: String,
    /// Points contributed per match
    pub points: u32,
    /// Reason attached when the rule fires
    pub reason: String,
    /// What the rule matches on
    pub check: RuleCheck,
}

/// Match predicates supported by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RuleCheck {
    /// Message mentions "http" together with a suspicious top-level
    /// extension. Fires at most once per message.
    DomainExtension { extensions: Vec<String> },
    /// A brand name appears without its canonical `<brand>.com` domain.
    /// The only check that can fire more than once per message, once per
    /// distinct brand.
    BrandSpoof { brands: Vec<String> },
    /// Any configured high-pressure phrase appears. Fires at most once.
    Urgency { phrases: Vec<String> },
    /// Case-insensitive substring match.
    Substring { pattern: String },
    /// Regex match over the raw message.
    Regex { pattern: String },
}
