use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub engine: EngineConfig,
    pub heuristics: HeuristicsConfig,
    pub fusion: FusionConfig,
    pub artifact: ArtifactConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Name of the message field batch records must expose.
    pub message_field: String,
}

/// Heuristic rule catalog. Word lists and point values are data so that
/// detection can be tuned without a rebuild.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HeuristicsConfig {
    /// Non-mainstream top-level extensions checked alongside "http".
    pub domain_extensions: Vec<String>,
    pub domain_points: u32,
    /// Brand names checked for spoofed references (lowercase).
    pub brands: Vec<String>,
    pub brand_points: u32,
    /// High-pressure phrases (lowercase).
    pub urgency_phrases: Vec<String>,
    pub urgency_points: u32,
    /// Operator-supplied rules evaluated after the built-in catalog.
    #[serde(default)]
    pub custom_rules: Vec<CustomRuleConfig>,
}

/// An operator-defined heuristic rule.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CustomRuleConfig {
    pub id: String,
    pub kind: CustomRuleKind,
    /// Substring (matched case-insensitively) or regex pattern.
    pub pattern: String,
    pub points: u32,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomRuleKind {
    Substring,
    Regex,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FusionConfig {
    /// Scale applied to the classifier probability (primary signal).
    pub classifier_weight: f64,
    /// Damping applied to the heuristic score (secondary signal).
    pub heuristic_weight: f64,
    /// Risk strictly above this resolves to PHISHING.
    pub phishing_threshold: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtifactConfig {
    /// Path to the serialized vectorizer + classifier pair.
    pub path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::GuardError::Config(e.to_string()))?;

        toml::from_str(&content)
            .map_err(|e| crate::error::GuardError::Config(e.to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig {
                message_field: "message".to_string(),
            },
            heuristics: HeuristicsConfig::default(),
            fusion: FusionConfig::default(),
            artifact: ArtifactConfig {
                path: "phishing_model.json".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            domain_extensions: vec![
                ".net".to_string(),
                ".xyz".to_string(),
                ".bit".to_string(),
                ".click".to_string(),
            ],
            domain_points: 30,
            brands: vec![
                "google".to_string(),
                "netflix".to_string(),
                "amazon".to_string(),
                "microsoft".to_string(),
                "paypal".to_string(),
                "hr portal".to_string(),
            ],
            brand_points: 25,
            urgency_phrases: vec![
                "4 hours".to_string(),
                "immediately".to_string(),
                "urgent".to_string(),
                "final warning".to_string(),
                "payroll freeze".to_string(),
            ],
            urgency_points: 20,
            custom_rules: Vec::new(),
        }
    }
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            classifier_weight: 100.0,
            heuristic_weight: 0.5,
            phishing_threshold: 50.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_matches_shipped_rules() {
        let config = Config::default();
        assert_eq!(config.engine.message_field, "message");
        assert_eq!(config.heuristics.domain_points, 30);
        assert_eq!(config.heuristics.brand_points, 25);
        assert_eq!(config.heuristics.urgency_points, 20);
        assert!(config
            .heuristics
            .domain_extensions
            .contains(&".xyz".to_string()));
        assert!(config.heuristics.brands.contains(&"hr portal".to_string()));
        assert!(config
            .heuristics
            .urgency_phrases
            .contains(&"final warning".to_string()));
        assert!(config.heuristics.custom_rules.is_empty());
        assert_eq!(config.fusion.classifier_weight, 100.0);
        assert_eq!(config.fusion.heuristic_weight, 0.5);
        assert_eq!(config.fusion.phishing_threshold, 50.0);
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let config = Config::default();
        let raw = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&raw).unwrap();
        assert_eq!(parsed.heuristics.brands, config.heuristics.brands);
        assert_eq!(
            parsed.fusion.phishing_threshold,
            config.fusion.phishing_threshold
        );
    }

    #[test]
    fn from_file_reads_partial_overrides() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        let config = Config {
            fusion: FusionConfig {
                phishing_threshold: 65.0,
                ..FusionConfig::default()
            },
            ..Config::default()
        };
        write!(file, "{}", toml::to_string(&config).unwrap()).unwrap();

        let loaded = Config::from_file(file.path()).unwrap();
        assert_eq!(loaded.fusion.phishing_threshold, 65.0);
    }

    #[test]
    fn from_file_rejects_missing_path() {
        let err = Config::from_file("/nonexistent/phishguard.toml").unwrap_err();
        assert!(matches!(err, crate::error::GuardError::Config(_)));
    }
}
