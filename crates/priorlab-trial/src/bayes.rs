// ─────────────────────────────────────────────────────────────────────
// PriorLab — Bayesian Update
// ─────────────────────────────────────────────────────────────────────
//! Beta-binomial conjugate update, prior presets, and Bayes' theorem
//! for a diagnostic test.
//!
//! The posterior is always rebuilt from (prior, heads, tails); nothing
//! is carried over between calls.

use priorlab_stats::{BetaParams, CurvePoint, DEFAULT_CURVE_POINTS, DEFAULT_LEVEL};
use priorlab_types::{LabError, LabResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BayesianResult {
    pub prior: BetaParams,
    pub posterior: BetaParams,
    pub posterior_mean: f64,
    pub posterior_mode: f64,
    pub credible_interval: (f64, f64),
    pub prior_curve: Vec<CurvePoint>,
    pub posterior_curve: Vec<CurvePoint>,
}

/// Posterior summary at the 95% level with 200-interval curves.
pub fn bayesian_update(prior: BetaParams, heads: u64, tails: u64) -> BayesianResult {
    bayesian_update_with(prior, heads, tails, DEFAULT_LEVEL, DEFAULT_CURVE_POINTS)
}

pub fn bayesian_update_with(
    prior: BetaParams,
    heads: u64,
    tails: u64,
    level: f64,
    curve_points: usize,
) -> BayesianResult {
    let posterior = prior.posterior(heads, tails);
    BayesianResult {
        prior,
        posterior,
        posterior_mean: posterior.mean(),
        posterior_mode: posterior.mode(),
        credible_interval: posterior.credible_interval(level),
        prior_curve: prior.curve(curve_points),
        posterior_curve: posterior.curve(curve_points),
    }
}

/// Named starting beliefs offered next to the alpha/beta sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorPreset {
    Uniform,
    WeakFair,
    StrongFair,
    WeakBiased,
}

impl PriorPreset {
    pub const ALL: [PriorPreset; 4] = [
        PriorPreset::Uniform,
        PriorPreset::WeakFair,
        PriorPreset::StrongFair,
        PriorPreset::WeakBiased,
    ];

    pub fn params(self) -> BetaParams {
        let (alpha, beta) = match self {
            PriorPreset::Uniform => (1.0, 1.0),
            PriorPreset::WeakFair => (5.0, 5.0),
            PriorPreset::StrongFair => (20.0, 20.0),
            PriorPreset::WeakBiased => (3.0, 7.0),
        };
        BetaParams { alpha, beta }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriorPreset::Uniform => "No opinion (uniform)",
            PriorPreset::WeakFair => "Weakly believe fair",
            PriorPreset::StrongFair => "Strongly believe fair",
            PriorPreset::WeakBiased => "Weakly believe biased (tails)",
        }
    }
}

/// Screening test with a given base rate and accuracy, all in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticTest {
    pub prevalence: f64,
    /// P(positive | disease).
    pub sensitivity: f64,
    /// P(negative | no disease).
    pub specificity: f64,
}

impl DiagnosticTest {
    /// # Errors
    /// [`LabError::Validation`] naming the first input outside [0, 1].
    pub fn new(prevalence: f64, sensitivity: f64, specificity: f64) -> LabResult<Self> {
        for (name, v) in [
            ("prevalence", prevalence),
            ("sensitivity", sensitivity),
            ("specificity", specificity),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(LabError::Validation(format!(
                    "{name} must be in [0, 1], got {v}"
                )));
            }
        }
        Ok(Self {
            prevalence,
            sensitivity,
            specificity,
        })
    }

    /// P(positive) = sens·prev + (1 − spec)(1 − prev).
    pub fn positive_rate(&self) -> f64 {
        self.sensitivity * self.prevalence + (1.0 - self.specificity) * (1.0 - self.prevalence)
    }

    /// P(disease | positive); 0 when a positive result is impossible.
    pub fn posterior_given_positive(&self) -> f64 {
        let p_pos = self.positive_rate();
        if p_pos > 0.0 {
            self.sensitivity * self.prevalence / p_pos
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_adds_counts() {
        let r = bayesian_update(BetaParams::uniform(), 7, 3);
        assert_eq!(r.posterior, BetaParams { alpha: 8.0, beta: 4.0 });
        assert!((r.posterior_mean - 8.0 / 12.0).abs() < 1e-12);
        assert!((r.posterior_mode - 0.7).abs() < 1e-12);
        let (lo, hi) = r.credible_interval;
        assert!(lo < r.posterior_mean && r.posterior_mean < hi);
    }

    #[test]
    fn test_no_data_posterior_is_prior() {
        let prior = PriorPreset::WeakFair.params();
        let r = bayesian_update(prior, 0, 0);
        assert_eq!(r.posterior, prior);
        assert_eq!(r.prior_curve, r.posterior_curve);
    }

    #[test]
    fn test_curves_sampled() {
        let r = bayesian_update_with(BetaParams::uniform(), 2, 2, 0.9, 50);
        assert_eq!(r.prior_curve.len(), 51);
        assert_eq!(r.posterior_curve.len(), 51);
        assert!(r.prior_curve.iter().all(|p| (p.y - 1.0).abs() < 1e-9));
    }

    #[test]
    fn test_update_is_path_independent() {
        let prior = BetaParams { alpha: 2.0, beta: 3.0 };
        let stepwise = prior.posterior(4, 1).posterior(6, 9);
        let direct = bayesian_update(prior, 10, 10).posterior;
        assert_eq!(stepwise, direct);
    }

    #[test]
    fn test_strong_prior_resists_data() {
        let weak = bayesian_update(PriorPreset::Uniform.params(), 9, 1);
        let strong = bayesian_update(PriorPreset::StrongFair.params(), 9, 1);
        assert!((strong.posterior_mean - 0.5).abs() < (weak.posterior_mean - 0.5).abs());
    }

    #[test]
    fn test_presets() {
        assert_eq!(PriorPreset::ALL.len(), 4);
        assert_eq!(PriorPreset::WeakBiased.params(), BetaParams { alpha: 3.0, beta: 7.0 });
        assert_eq!(PriorPreset::Uniform.params(), BetaParams::uniform());
        assert_eq!(PriorPreset::StrongFair.label(), "Strongly believe fair");
        for p in PriorPreset::ALL {
            assert!(BetaParams::new(p.params().alpha, p.params().beta).is_ok());
        }
    }

    #[test]
    fn test_rare_disease_positive() {
        let t = DiagnosticTest::new(0.01, 0.95, 0.95).unwrap();
        let expected = 0.0095 / (0.0095 + 0.0495);
        assert!((t.posterior_given_positive() - expected).abs() < 1e-12);
        assert!(t.posterior_given_positive() < 0.2);
    }

    #[test]
    fn test_impossible_positive_is_zero() {
        let t = DiagnosticTest::new(0.0, 0.9, 1.0).unwrap();
        assert_eq!(t.positive_rate(), 0.0);
        assert_eq!(t.posterior_given_positive(), 0.0);
    }

    #[test]
    fn test_diagnostic_validation() {
        assert!(matches!(
            DiagnosticTest::new(0.5, 1.2, 0.9),
            Err(LabError::Validation(msg)) if msg.contains("sensitivity")
        ));
        assert!(DiagnosticTest::new(f64::NAN, 0.5, 0.5).is_err());
    }
}
