//! Risk scoring engine
//!
//! Fuses the classifier probability with the heuristic score into a bounded
//! risk percentage, resolves a verdict, and applies the pipeline over single
//! messages or ordered batches.

pub mod engine;
pub mod fusion;
pub mod types;

pub use engine::RiskEngine;
pub use fusion::{FusionPolicy, VerdictResolver};
pub use types::*;
