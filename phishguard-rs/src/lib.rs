//! phishguard-rs: multi-layered phishing risk scoring
//!
//! Assigns a phishing-risk score to free-text messages by combining a
//! pre-trained statistical text classifier with a deterministic heuristic
//! rule layer, then resolves a PHISHING/SAFE verdict for a single message
//! or an ordered batch.
//!
//! # Layers
//!
//! - **Heuristics**: stateless rule catalog (suspicious domain extensions,
//!   brand spoofing, urgency language) producing an additive score and the
//!   triggered reasons
//! - **Classifier**: TF-IDF + naive Bayes artifact trained elsewhere and
//!   injected at construction, never mutated afterwards
//! - **Fusion**: classifier probability at full weight, heuristic score
//!   damped, clamped to [0, 100]
//! - **Verdict**: strict greater-than threshold, default 50
//!
//! # Example
//!
//! ```no_run
//! use phishguard_rs::classifier::ClassifierArtifact;
//! use phishguard_rs::config::Config;
//! use phishguard_rs::scoring::RiskEngine;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let artifact = ClassifierArtifact::from_file(&config.artifact.path)?;
//!     let engine = RiskEngine::new(artifact, &config)?;
//!
//!     let assessment = engine.analyze("Urgent: renew at http://login.xyz")?;
//!     println!("risk {:.1}% ({:?})", assessment.risk, assessment.verdict);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling
//! - [`heuristics`]: Rule catalog evaluation
//! - [`classifier`]: Artifact loading and classification
//! - [`scoring`]: Fusion, verdicts, and the single/batch pipeline

pub mod classifier;
pub mod config;
pub mod error;
pub mod heuristics;
pub mod scoring;

// Re-export commonly used types
pub use classifier::{ClassifierAdapter, ClassifierArtifact};
pub use config::Config;
pub use error::{GuardError, Result};
pub use heuristics::{HeuristicEngine, HeuristicResult};
pub use scoring::{BatchReport, RiskAssessment, RiskEngine, Verdict};
