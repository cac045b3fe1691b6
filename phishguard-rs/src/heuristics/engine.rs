//! Rule catalog evaluation
//!
//! All checks are case-insensitive substring or regex matches over the raw
//! message. No rule short-circuits another; point values sum.

use regex::Regex;

use super::types::*;
use crate::config::{CustomRuleConfig, CustomRuleKind, HeuristicsConfig};

/// Placeholder substituted with the matched brand name in brand-rule reasons.
const BRAND_PLACEHOLDER: &str = "{brand}";

/// Stateless heuristic rule engine.
///
/// The catalog is fixed at construction; identical input always yields an
/// identical result.
pub struct HeuristicEngine {
    rules: Vec<HeuristicRule>,
}

impl HeuristicEngine {
    /// Build the catalog from configuration. Built-in rules come first,
    /// operator rules after, so reason ordering is reproducible.
    pub fn from_config(config: &HeuristicsConfig) -> Self {
        let mut rules = vec![
            HeuristicRule {
                id: "DOMAIN_EXTENSION".to_string(),
                points: config.domain_points,
                reason: "Non-official domain extension detected".to_string(),
                check: RuleCheck::DomainExtension {
                    extensions: config.domain_extensions.clone(),
                },
            },
            HeuristicRule {
                id: "BRAND_SPOOF".to_string(),
                points: config.brand_points,
                reason: format!("Unofficial {} reference", BRAND_PLACEHOLDER),
                check: RuleCheck::BrandSpoof {
                    brands: config.brands.clone(),
                },
            },
            HeuristicRule {
                id: "URGENCY".to_string(),
                points: config.urgency_points,
                reason: "High-pressure urgency detected".to_string(),
                check: RuleCheck::Urgency {
                    phrases: config.urgency_phrases.clone(),
                },
            },
        ];

        for custom in &config.custom_rules {
            rules.push(Self::custom_rule(custom));
        }

        Self { rules }
    }

    fn custom_rule(config: &CustomRuleConfig) -> HeuristicRule {
        HeuristicRule {
            id: config.id.clone(),
            points: config.points,
            reason: config.reason.clone(),
            check: match config.kind {
                CustomRuleKind::Substring => RuleCheck::Substring {
                    pattern: config.pattern.clone(),
                },
                CustomRuleKind::Regex => RuleCheck::Regex {
                    pattern: config.pattern.clone(),
                },
            },
        }
    }

    /// Current catalog, in evaluation order.
    pub fn rules(&self) -> &[HeuristicRule] {
        &self.rules
    }

    /// Evaluate the full catalog against one message.
    pub fn evaluate(&self, message: &str) -> HeuristicResult {
        let lowered = message.to_lowercase();
        let mut score = 0u32;
        let mut reasons = Vec::new();

        for rule in &self.rules {
            match &rule.check {
                RuleCheck::DomainExtension { extensions } => {
                    if lowered.contains("http")
                        && extensions
                            .iter()
                            .any(|ext| lowered.contains(&ext.to_lowercase()))
                    {
                        score += rule.points;
                        reasons.push(rule.reason.clone());
                    }
                }
                RuleCheck::BrandSpoof { brands } => {
                    // The canonical-domain check runs against the message
                    // with spaces removed, so "micro soft.com" still counts
                    // as the official domain.
                    let squeezed = lowered.replace(' ', "");
                    for brand in brands {
                        let brand = brand.to_lowercase();
                        let canonical = format!("{}.com", brand.replace(' ', ""));
                        if lowered.contains(&brand) && !squeezed.contains(&canonical) {
                            score += rule.points;
                            reasons.push(
                                rule.reason
                                    .replace(BRAND_PLACEHOLDER, &capitalize(&brand)),
                            );
                        }
                    }
                }
                RuleCheck::Urgency { phrases } => {
                    if phrases
                        .iter()
                        .any(|phrase| lowered.contains(&phrase.to_lowercase()))
                    {
                        score += rule.points;
                        reasons.push(rule.reason.clone());
                    }
                }
                RuleCheck::Substring { pattern } => {
                    if lowered.contains(&pattern.to_lowercase()) {
                        score += rule.points;
                        reasons.push(rule.reason.clone());
                    }
                }
                RuleCheck::Regex { pattern } => {
                    if let Ok(re) = Regex::new(pattern) {
                        if re.is_match(message) {
                            score += rule.points;
                            reasons.push(rule.reason.clone());
                        }
                    }
                }
            }
        }

        HeuristicResult { score, reasons }
    }
}

impl Default for HeuristicEngine {
    fn default() -> Self {
        Self::from_config(&HeuristicsConfig::default())
    }
}

/// Uppercase the first character, e.g. "hr portal" -> "Hr portal".
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
