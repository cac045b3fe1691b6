//! Text classification against the loaded artifact
//!
//! Transformation uses exactly the fitted vocabulary; terms unseen during
//! training carry no weight. Batch mode vectorizes the whole slice in one
//! pass and predicts in one pass.

use regex::Regex;
use std::collections::HashMap;
use tracing::info;

use super::artifact::{ClassifierArtifact, PHISHING_CLASS};
use crate::error::{GuardError, Result};

/// Word tokens of two or more characters, the standard term-frequency
/// tokenization the artifact was fitted with.
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Sparse TF-IDF vector, feature indices ascending.
type FeatureVector = Vec<(usize, f64)>;

/// Adapter over the trained vectorizer + classifier pair.
///
/// Owns the artifact for the process lifetime. Construction validates the
/// artifact, so every scoring call runs against a coherent model.
pub struct ClassifierAdapter {
    artifact: ClassifierArtifact,
    token_pattern: Regex,
}

impl ClassifierAdapter {
    pub fn new(artifact: ClassifierArtifact) -> Result<Self> {
        artifact.validate()?;
        let token_pattern = Regex::new(TOKEN_PATTERN)
            .map_err(|e| GuardError::ArtifactUnavailable(format!("token pattern: {}", e)))?;

        info!(
            "Classifier artifact loaded: {} vocabulary terms",
            artifact.vocabulary_size()
        );

        Ok(Self {
            artifact,
            token_pattern,
        })
    }

    pub fn artifact(&self) -> &ClassifierArtifact {
        &self.artifact
    }

    /// Probability that a single message belongs to the phishing class.
    pub fn classify(&self, message: &str) -> f64 {
        self.predict(&self.transform(message))
    }

    /// Classify an ordered batch: one vectorization pass over the full
    /// slice, then one prediction pass. Output index i corresponds to
    /// input index i.
    pub fn classify_batch<S: AsRef<str>>(&self, messages: &[S]) -> Vec<f64> {
        let vectors: Vec<FeatureVector> = messages
            .iter()
            .map(|message| self.transform(message.as_ref()))
            .collect();

        vectors.iter().map(|vector| self.predict(vector)).collect()
    }

    /// TF-IDF transform against the fitted vocabulary: term counts weighted
    /// by IDF, L2-normalized. Unseen terms are dropped.
    fn transform(&self, message: &str) -> FeatureVector {
        let lowered = message.to_lowercase();
        let mut counts: HashMap<usize, f64> = HashMap::new();

        for token in self.token_pattern.find_iter(&lowered) {
            if let Some(&index) = self.artifact.vectorizer.vocabulary.get(token.as_str()) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut features: FeatureVector = counts
            .into_iter()
            .map(|(index, count)| (index, count * self.artifact.vectorizer.idf[index]))
            .collect();
        // Fixed summation order keeps repeated calls bit-identical.
        features.sort_by_key(|&(index, _)| index);

        let norm = features
            .iter()
            .map(|&(_, weight)| weight * weight)
            .sum::<f64>()
            .sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut features {
                *weight /= norm;
            }
        }

        features
    }

    /// Multinomial naive Bayes posterior for the phishing class.
    fn predict(&self, features: &FeatureVector) -> f64 {
        let model = &self.artifact.model;
        let joint: Vec<f64> = model
            .class_log_prior
            .iter()
            .zip(&model.feature_log_prob)
            .map(|(prior, likelihood)| {
                prior
                    + features
                        .iter()
                        .map(|&(index, weight)| weight * likelihood[index])
                        .sum::<f64>()
            })
            .collect();

        let max = joint.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let log_norm = max + joint.iter().map(|j| (j - max).exp()).sum::<f64>().ln();

        (joint[PHISHING_CLASS] - log_norm).exp()
    }
}
