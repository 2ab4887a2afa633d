// ─────────────────────────────────────────────────────────────────────
// PriorLab — Statistics Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Closed-form statistics for the inference lessons.
//!
//! - Beta distribution: pdf, cdf, quantile, mean, mode, credible
//!   interval, and sampled curves for plotting.
//! - Binomial estimators: Wald confidence interval and the exact
//!   two-sided binomial test.
//!
//! All functions are pure. Shape parameters must be positive; that is
//! checked with `debug_assert!` here and enforced with a `Result` by
//! [`BetaParams::new`].

pub mod beta;
pub mod binomial;
pub mod special;

pub use beta::{
    beta_cdf, beta_credible_interval, beta_curve_points, beta_inv, beta_mean, beta_mode,
    beta_pdf, BetaParams, CurvePoint, DEFAULT_CURVE_POINTS, DEFAULT_LEVEL,
};
pub use binomial::{binomial_pmf, binomial_test_p_value, wald_confidence_interval};
