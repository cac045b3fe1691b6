//! Score fusion and verdict resolution
//!
//! The classifier is the primary signal (full 0-100 scale); the heuristic
//! layer corroborates at half weight so heuristics alone cannot normally
//! reach the ceiling without classifier support.

use super::types::Verdict;
use crate::config::FusionConfig;

/// Fused risk never leaves [0, RISK_CEILING].
pub const RISK_CEILING: f64 = 100.0;

/// Default scale for the classifier probability.
pub const DEFAULT_CLASSIFIER_WEIGHT: f64 = 100.0;

/// Default damping for the heuristic score.
pub const DEFAULT_HEURISTIC_WEIGHT: f64 = 0.5;

/// Default verdict threshold.
pub const DEFAULT_PHISHING_THRESHOLD: f64 = 50.0;

/// Combines the two detection layers into one bounded risk percentage.
#[derive(Debug, Clone)]
pub struct FusionPolicy {
    classifier_weight: f64,
    heuristic_weight: f64,
}

impl FusionPolicy {
    pub fn new(classifier_weight: f64, heuristic_weight: f64) -> Self {
        Self {
            classifier_weight,
            heuristic_weight,
        }
    }

    pub fn from_config(config: &FusionConfig) -> Self {
        Self::new(config.classifier_weight, config.heuristic_weight)
    }

    /// `min(100, probability * classifier_weight + score * heuristic_weight)`,
    /// clamped to [0, 100].
    pub fn fuse(&self, classifier_probability: f64, heuristic_score: u32) -> f64 {
        let raw = classifier_probability * self.classifier_weight
            + f64::from(heuristic_score) * self.heuristic_weight;
        raw.clamp(0.0, RISK_CEILING)
    }
}

impl Default for FusionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_CLASSIFIER_WEIGHT, DEFAULT_HEURISTIC_WEIGHT)
    }
}

/// Maps a risk percentage to a verdict. The boundary value itself is SAFE.
#[derive(Debug, Clone)]
pub struct VerdictResolver {
    threshold: f64,
}

impl VerdictResolver {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &FusionConfig) -> Self {
        Self::new(config.phishing_threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// PHISHING iff risk is strictly greater than the threshold.
    pub fn resolve(&self, risk: f64) -> Verdict {
        if risk > self.threshold {
            Verdict::Phishing
        } else {
            Verdict::Safe
        }
    }
}

impl Default for VerdictResolver {
    fn default() -> Self {
        Self::new(DEFAULT_PHISHING_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fusion_matches_the_documented_formula() {
        let policy = FusionPolicy::default();
        // 0.3 * 100 + 55 * 0.5 = 57.5
        let risk = policy.fuse(0.3, 55);
        assert!((risk - 57.5).abs() < 1e-9);
    }

    #[test]
    fn fusion_clamps_at_the_ceiling() {
        let policy = FusionPolicy::default();
        assert_eq!(policy.fuse(1.0, 200), 100.0);
        // Heuristic score >= 200 saturates even with no classifier support.
        assert_eq!(policy.fuse(0.0, 200), 100.0);
        assert_eq!(policy.fuse(0.99, 175), 100.0);
    }

    #[test]
    fn fusion_never_goes_negative() {
        let policy = FusionPolicy::default();
        assert_eq!(policy.fuse(0.0, 0), 0.0);
    }

    #[test]
    fn fusion_is_bounded_for_a_sweep_of_inputs() {
        let policy = FusionPolicy::default();
        for p in [0.0, 0.1, 0.5, 0.9, 1.0] {
            for score in [0u32, 20, 55, 75, 130, 500] {
                let risk = policy.fuse(p, score);
                assert!((0.0..=100.0).contains(&risk), "risk = {}", risk);
            }
        }
    }

    #[test]
    fn custom_weights_are_honored() {
        let policy = FusionPolicy::new(100.0, 0.25);
        let risk = policy.fuse(0.2, 40);
        assert!((risk - 30.0).abs() < 1e-9);
    }

    #[test]
    fn threshold_boundary_is_safe() {
        let resolver = VerdictResolver::default();
        assert_eq!(resolver.resolve(50.0), Verdict::Safe);
        assert_eq!(resolver.resolve(50.0001), Verdict::Phishing);
        assert_eq!(resolver.resolve(49.9999), Verdict::Safe);
        assert_eq!(resolver.resolve(0.0), Verdict::Safe);
        assert_eq!(resolver.resolve(100.0), Verdict::Phishing);
    }

    #[test]
    fn custom_threshold_is_honored() {
        let resolver = VerdictResolver::new(75.0);
        assert_eq!(resolver.resolve(75.0), Verdict::Safe);
        assert_eq!(resolver.resolve(76.0), Verdict::Phishing);
    }
}
