//! Classifier adapter
//!
//! Wraps a pre-trained term-frequency vectorizer and probabilistic binary
//! classifier. The trained pair is injected as a [`ClassifierArtifact`] at
//! construction and is read-only afterwards; scoring cannot run without it.

pub mod adapter;
pub mod artifact;

pub use adapter::ClassifierAdapter;
pub use artifact::{ClassifierArtifact, NaiveBayesModel, TfidfVectorizer};
