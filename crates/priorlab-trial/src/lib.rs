// ─────────────────────────────────────────────────────────────────────
// PriorLab — Trial and Inference
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Simulated coin trials and the two ways of reading them.
//!
//! Architecture:
//!   - coin: seeded Bernoulli trial with append-only history
//!   - bayes: conjugate beta update, prior presets, diagnostic test
//!   - hypothesis: Wald interval + exact binomial test
//!   - session: one trial, both analyses, side by side

pub mod bayes;
pub mod coin;
pub mod hypothesis;
pub mod session;

pub use bayes::{bayesian_update, bayesian_update_with, BayesianResult, DiagnosticTest, PriorPreset};
pub use coin::{CoinTrial, Outcome};
pub use hypothesis::{frequentist_test, frequentist_test_with, FrequentistResult, FAIR_COIN};
pub use session::{ComparisonReport, InferenceSession};
