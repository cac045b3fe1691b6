//! Serialized classifier artifact
//!
//! The artifact is produced by the (external) training collaborator and
//! consumed here. Both halves must come from the same training run; any
//! dimension disagreement fails fast at load time.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{GuardError, Result};

/// Number of classes the binary model must carry.
const CLASS_COUNT: usize = 2;

/// Index of the phishing class in the model's class ordering.
pub const PHISHING_CLASS: usize = 1;

/// Fitted state of a TF-IDF vectorizer: the training vocabulary and the
/// inverse document frequency learned for each term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// term -> feature index
    pub vocabulary: HashMap<String, usize>,
    /// IDF weight per feature index
    pub idf: Vec<f64>,
}

/// Fitted multinomial naive Bayes parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaiveBayesModel {
    /// Log prior per class, class 1 = phishing.
    pub class_log_prior: Vec<f64>,
    /// Per-class log likelihood per feature index.
    pub feature_log_prob: Vec<Vec<f64>>,
}

/// The trained vectorizer + classifier pair, loaded once and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub vectorizer: TfidfVectorizer,
    pub model: NaiveBayesModel,
}

impl ClassifierArtifact {
    /// Deserialize and validate an artifact from its JSON form.
    pub fn from_json(raw: &str) -> Result<Self> {
        let artifact: Self = serde_json::from_str(raw)
            .map_err(|e| GuardError::ArtifactUnavailable(e.to_string()))?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Load an artifact file from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(&path).map_err(|e| {
            GuardError::ArtifactUnavailable(format!(
                "cannot read {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_json(&raw)
    }

    /// Check that vectorizer and model agree on dimensions.
    pub fn validate(&self) -> Result<()> {
        let vocab_size = self.vectorizer.vocabulary.len();

        if self.vectorizer.idf.len() != vocab_size {
            return Err(GuardError::ArtifactUnavailable(format!(
                "IDF length {} does not match vocabulary size {}",
                self.vectorizer.idf.len(),
                vocab_size
            )));
        }

        if let Some(&index) = self.vectorizer.vocabulary.values().max() {
            if index >= vocab_size {
                return Err(GuardError::ArtifactUnavailable(format!(
                    "vocabulary index {} out of bounds for {} terms",
                    index, vocab_size
                )));
            }
        }

        if self.model.class_log_prior.len() != CLASS_COUNT {
            return Err(GuardError::ArtifactUnavailable(format!(
                "expected {} class priors, artifact has {}",
                CLASS_COUNT,
                self.model.class_log_prior.len()
            )));
        }

        if self.model.feature_log_prob.len() != CLASS_COUNT {
            return Err(GuardError::ArtifactUnavailable(format!(
                "expected {} likelihood rows, artifact has {}",
                CLASS_COUNT,
                self.model.feature_log_prob.len()
            )));
        }

        for (class, row) in self.model.feature_log_prob.iter().enumerate() {
            if row.len() != vocab_size {
                return Err(GuardError::ArtifactUnavailable(format!(
                    "class {} likelihood width {} does not match vocabulary size {}",
                    class,
                    row.len(),
                    vocab_size
                )));
            }
        }

        Ok(())
    }

    /// Number of terms in the fitted vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary.len()
    }
}
