// ─────────────────────────────────────────────────────────────────────
// PriorLab — Inference Session
// ─────────────────────────────────────────────────────────────────────
//! One coin trial viewed through both schools at once: a beta posterior
//! on one side, an interval and a p-value on the other.

use priorlab_stats::BetaParams;
use priorlab_types::{InferenceConfig, LabResult};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bayes::{bayesian_update_with, BayesianResult, PriorPreset};
use crate::coin::{CoinTrial, Outcome};
use crate::hypothesis::{frequentist_test_with, FrequentistResult};

/// Side-by-side answer for the current counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub heads: u64,
    pub tails: u64,
    pub bayesian: BayesianResult,
    pub frequentist: FrequentistResult,
}

impl ComparisonReport {
    pub fn total(&self) -> u64 {
        self.heads + self.tails
    }

    /// Widths of (credible, confidence) intervals.
    pub fn interval_widths(&self) -> (f64, f64) {
        let (b_lo, b_hi) = self.bayesian.credible_interval;
        let (f_lo, f_hi) = self.frequentist.confidence_interval;
        (b_hi - b_lo, f_hi - f_lo)
    }
}

pub struct InferenceSession<R = StdRng> {
    trial: CoinTrial<R>,
    prior: BetaParams,
    config: InferenceConfig,
}

impl InferenceSession<StdRng> {
    /// # Errors
    /// [`priorlab_types::LabError::Config`] when the section is invalid.
    pub fn from_config(config: &InferenceConfig) -> LabResult<Self> {
        config.validate()?;
        Ok(Self {
            trial: CoinTrial::from_config(config)?,
            prior: BetaParams::new(config.prior_alpha, config.prior_beta)?,
            config: config.clone(),
        })
    }

    pub fn with_seed(config: &InferenceConfig, seed: u64) -> LabResult<Self> {
        config.validate()?;
        Self::with_trial(config, CoinTrial::with_seed(config.true_bias, seed)?)
    }
}

impl<R: Rng> InferenceSession<R> {
    /// Session over an existing trial; the config's bias is not applied.
    pub fn with_trial(config: &InferenceConfig, trial: CoinTrial<R>) -> LabResult<Self> {
        config.validate()?;
        Ok(Self {
            trial,
            prior: BetaParams::new(config.prior_alpha, config.prior_beta)?,
            config: config.clone(),
        })
    }

    pub fn flip(&mut self, count: usize) -> &[Outcome] {
        self.trial.flip(count)
    }

    /// Clears the flips; prior, bias and significance are kept.
    pub fn reset(&mut self) {
        self.trial.reset();
    }

    pub fn set_prior(&mut self, prior: BetaParams) {
        self.prior = prior;
    }

    pub fn apply_preset(&mut self, preset: PriorPreset) {
        log::debug!("inference session: prior preset {:?}", preset);
        self.prior = preset.params();
    }

    pub fn set_true_bias(&mut self, true_bias: f64) -> LabResult<()> {
        self.trial.set_true_bias(true_bias)
    }

    pub fn prior(&self) -> BetaParams {
        self.prior
    }

    pub fn trial(&self) -> &CoinTrial<R> {
        &self.trial
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    pub fn bayesian(&self) -> BayesianResult {
        bayesian_update_with(
            self.prior,
            self.trial.heads(),
            self.trial.tails(),
            self.config.credible_level,
            self.config.curve_points,
        )
    }

    pub fn frequentist(&self) -> FrequentistResult {
        frequentist_test_with(
            self.trial.heads(),
            self.trial.total(),
            self.config.significance,
            self.config.credible_level,
            self.config.null_p,
        )
    }

    /// Both analyses, recomputed from the current counts.
    pub fn report(&self) -> ComparisonReport {
        ComparisonReport {
            heads: self.trial.heads(),
            tails: self.trial.tails(),
            bayesian: self.bayesian(),
            frequentist: self.frequentist(),
        }
    }
}
