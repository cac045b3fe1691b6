//! Risk evaluation pipeline
//!
//! Owns the injected classifier artifact plus the heuristic catalog and
//! applies the same scoring path to one message or an ordered batch.

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::fusion::{FusionPolicy, VerdictResolver};
use super::types::{BatchReport, RiskAssessment};
use crate::classifier::{ClassifierAdapter, ClassifierArtifact};
use crate::config::Config;
use crate::error::{GuardError, Result};
use crate::heuristics::HeuristicEngine;

/// The scoring engine. Load-once-at-construction, read-only thereafter;
/// recalibration means constructing a new engine.
pub struct RiskEngine {
    classifier: ClassifierAdapter,
    heuristics: HeuristicEngine,
    fusion: FusionPolicy,
    resolver: VerdictResolver,
    message_field: String,
}

impl RiskEngine {
    /// Build an engine around a loaded artifact. Fails with
    /// [`GuardError::ArtifactUnavailable`] if the artifact halves disagree.
    pub fn new(artifact: ClassifierArtifact, config: &Config) -> Result<Self> {
        let classifier = ClassifierAdapter::new(artifact)?;
        let engine = Self {
            classifier,
            heuristics: HeuristicEngine::from_config(&config.heuristics),
            fusion: FusionPolicy::from_config(&config.fusion),
            resolver: VerdictResolver::from_config(&config.fusion),
            message_field: config.engine.message_field.clone(),
        };

        info!(
            "Risk engine ready: {} heuristic rules, verdict threshold {}",
            engine.heuristics.rules().len(),
            engine.resolver.threshold()
        );
        Ok(engine)
    }

    /// Score a single message. Empty or whitespace-only input is rejected
    /// before any scoring happens.
    pub fn analyze(&self, message: &str) -> Result<RiskAssessment> {
        if message.trim().is_empty() {
            return Err(GuardError::EmptyInput);
        }

        let probability = self.classifier.classify(message);
        Ok(self.assemble(message.to_string(), probability))
    }

    /// Score an ordered batch of records. The required message field is
    /// checked on every record before any row is scored; the batch is
    /// vectorized in one pass and output order matches input order.
    pub fn audit(&self, records: &[Value]) -> Result<BatchReport> {
        if records.is_empty() {
            return Err(GuardError::EmptyBatch);
        }

        let messages = self.extract_messages(records)?;
        let probabilities = self.classifier.classify_batch(&messages);

        let assessments: Vec<RiskAssessment> = messages
            .into_iter()
            .zip(probabilities)
            .map(|(message, probability)| self.assemble(message, probability))
            .collect();

        let total = assessments.len();
        let phishing_count = assessments
            .iter()
            .filter(|a| a.verdict.is_phishing())
            .count();
        let safety_rate = ((total - phishing_count) as f64 / total as f64) * 100.0;

        info!(
            "Batch audit complete: {} scanned, {} flagged, safety rate {:.1}%",
            total, phishing_count, safety_rate
        );

        Ok(BatchReport {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            assessments,
            total,
            phishing_count,
            safety_rate,
        })
    }

    /// Run both layers over one message and fuse the results.
    fn assemble(&self, message: String, probability: f64) -> RiskAssessment {
        let heuristic = self.heuristics.evaluate(&message);
        let risk = self.fusion.fuse(probability, heuristic.score);
        let verdict = self.resolver.resolve(risk);

        debug!(
            "Scored message: classifier {:.3}, heuristic {}, risk {:.1}%, verdict {:?}",
            probability, heuristic.score, risk, verdict
        );

        RiskAssessment {
            message,
            classifier_probability: probability,
            heuristic,
            risk,
            verdict,
        }
    }

    /// Schema pass, then coercion pass. Rows are never dropped, so input
    /// and output stay index-aligned.
    fn extract_messages(&self, records: &[Value]) -> Result<Vec<String>> {
        for (row, record) in records.iter().enumerate() {
            let has_field = record
                .as_object()
                .map(|map| map.contains_key(&self.message_field))
                .unwrap_or(false);
            if !has_field {
                return Err(GuardError::MissingField {
                    field: self.message_field.clone(),
                    row,
                });
            }
        }

        Ok(records
            .iter()
            .enumerate()
            .map(|(row, record)| self.coerce(row, &record[&self.message_field]))
            .collect())
    }

    /// Textual representation of a record value: strings pass through,
    /// null becomes empty, anything else renders as its JSON text.
    fn coerce(&self, row: usize, value: &Value) -> String {
        match value {
            Value::String(text) => text.clone(),
            Value::Null => {
                warn!(
                    "Batch record {} has null '{}', coerced to empty text",
                    row, self.message_field
                );
                String::new()
            }
            other => {
                warn!(
                    "Batch record {} has non-text '{}', coerced to its JSON form",
                    row, self.message_field
                );
                other.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{NaiveBayesModel, TfidfVectorizer};
    use serde_json::json;
    use std::collections::HashMap;

    /// Tiny artifact: "renew" is a strong phishing term, "lunch" a strong
    /// ham term, everything else unseen.
    fn artifact() -> ClassifierArtifact {
        let mut vocabulary = HashMap::new();
        vocabulary.insert("renew".to_string(), 0);
        vocabulary.insert("lunch".to_string(), 1);

        ClassifierArtifact {
            vectorizer: TfidfVectorizer {
                vocabulary,
                idf: vec![1.0, 1.0],
            },
            model: NaiveBayesModel {
                class_log_prior: vec![(0.5f64).ln(), (0.5f64).ln()],
                feature_log_prob: vec![
                    vec![(0.02f64).ln(), (0.9f64).ln()],
                    vec![(0.9f64).ln(), (0.02f64).ln()],
                ],
            },
        }
    }

    fn engine() -> RiskEngine {
        RiskEngine::new(artifact(), &Config::default()).unwrap()
    }

    #[test]
    fn empty_input_is_rejected_before_scoring() {
        assert!(matches!(engine().analyze(""), Err(GuardError::EmptyInput)));
        assert!(matches!(
            engine().analyze("   \n\t "),
            Err(GuardError::EmptyInput)
        ));
    }

    #[test]
    fn phishing_message_gets_a_phishing_verdict() {
        let assessment = engine().analyze("please renew your account").unwrap();
        assert!(assessment.classifier_probability > 0.5);
        assert!(assessment.verdict.is_phishing());
        assert!((0.0..=100.0).contains(&assessment.risk));
    }

    #[test]
    fn benign_message_gets_a_safe_verdict() {
        let assessment = engine().analyze("lunch tomorrow?").unwrap();
        assert!(assessment.classifier_probability < 0.5);
        assert!(!assessment.verdict.is_phishing());
    }

    #[test]
    fn heuristics_lift_risk_above_the_classifier_alone() {
        let e = engine();
        let plain = e.analyze("lunch plans").unwrap();
        let urgent = e.analyze("urgent lunch plans").unwrap();
        assert_eq!(urgent.heuristic.score, 20);
        assert!((urgent.risk - plain.risk - 10.0).abs() < 1e-9);
    }

    #[test]
    fn empty_batch_is_a_typed_error() {
        assert!(matches!(engine().audit(&[]), Err(GuardError::EmptyBatch)));
    }

    #[test]
    fn missing_field_rejects_the_whole_batch() {
        let records = vec![
            json!({"message": "lunch"}),
            json!({"subject": "no body here"}),
        ];
        match engine().audit(&records) {
            Err(GuardError::MissingField { field, row }) => {
                assert_eq!(field, "message");
                assert_eq!(row, 1);
            }
            other => panic!("expected MissingField, got {:?}", other.map(|r| r.total)),
        }
    }

    #[test]
    fn non_object_record_counts_as_missing_field() {
        let records = vec![json!("just a string")];
        assert!(matches!(
            engine().audit(&records),
            Err(GuardError::MissingField { row: 0, .. })
        ));
    }

    #[test]
    fn malformed_values_are_coerced_not_dropped() {
        let records = vec![
            json!({"message": "lunch at noon"}),
            json!({"message": null}),
            json!({"message": 12345}),
            json!({"message": "lunch again"}),
        ];
        let report = engine().audit(&records).unwrap();

        assert_eq!(report.total, 4);
        assert_eq!(report.assessments[0].message, "lunch at noon");
        assert_eq!(report.assessments[1].message, "");
        assert_eq!(report.assessments[2].message, "12345");
        assert_eq!(report.assessments[3].message, "lunch again");
    }

    #[test]
    fn batch_preserves_input_order() {
        let texts = [
            "renew now",
            "lunch today",
            "renew everything",
            "quiet lunch",
        ];
        let records: Vec<Value> = texts.iter().map(|t| json!({ "message": t })).collect();

        let report = engine().audit(&records).unwrap();
        for (i, text) in texts.iter().enumerate() {
            assert_eq!(report.assessments[i].message, *text);
        }
    }

    #[test]
    fn aggregates_follow_the_safety_rate_formula() {
        let mut records = vec![json!({"message": "renew your renew"})];
        for _ in 0..3 {
            records.push(json!({"message": "lunch meeting"}));
        }

        let report = engine().audit(&records).unwrap();
        assert_eq!(report.total, 4);
        assert_eq!(report.phishing_count, 1);
        assert!((report.safety_rate - 75.0).abs() < 1e-9);
    }

    #[test]
    fn message_field_name_is_configurable() {
        let config = Config {
            engine: crate::config::EngineConfig {
                message_field: "body".to_string(),
            },
            ..Config::default()
        };
        let engine = RiskEngine::new(artifact(), &config).unwrap();

        let records = vec![json!({"body": "lunch"})];
        let report = engine.audit(&records).unwrap();
        assert_eq!(report.assessments[0].message, "lunch");

        let wrong = vec![json!({"message": "lunch"})];
        assert!(matches!(
            engine.audit(&wrong),
            Err(GuardError::MissingField { .. })
        ));
    }

    #[test]
    fn separate_calls_get_separate_reports() {
        let e = engine();
        let records = vec![json!({"message": "lunch"})];
        let first = e.audit(&records).unwrap();
        let second = e.audit(&records).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(first.total, second.total);
    }
}
