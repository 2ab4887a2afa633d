// ─────────────────────────────────────────────────────────────────────
// PriorLab — Coin Trial
// ─────────────────────────────────────────────────────────────────────
//! Append-only record of simulated flips of a coin with a known bias.
//!
//! `heads + tails == outcomes.len()` holds after every operation.

use priorlab_types::{InferenceConfig, LabError, LabResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Heads,
    Tails,
}

impl Outcome {
    pub fn is_heads(self) -> bool {
        matches!(self, Outcome::Heads)
    }

    /// `'H'` or `'T'`.
    pub fn symbol(self) -> char {
        match self {
            Outcome::Heads => 'H',
            Outcome::Tails => 'T',
        }
    }
}

fn check_bias(bias: f64) -> LabResult<f64> {
    if (0.0..=1.0).contains(&bias) {
        Ok(bias)
    } else {
        Err(LabError::Validation(format!(
            "true_bias must be in [0, 1], got {bias}"
        )))
    }
}

pub struct CoinTrial<R = StdRng> {
    outcomes: Vec<Outcome>,
    heads: u64,
    tails: u64,
    true_bias: f64,
    rng: R,
}

impl CoinTrial<StdRng> {
    /// Trial seeded from the OS.
    pub fn new(true_bias: f64) -> LabResult<Self> {
        Self::with_rng(true_bias, StdRng::from_os_rng())
    }

    pub fn with_seed(true_bias: f64, seed: u64) -> LabResult<Self> {
        Self::with_rng(true_bias, StdRng::seed_from_u64(seed))
    }

    pub fn from_config(config: &InferenceConfig) -> LabResult<Self> {
        Self::new(config.true_bias)
    }
}

impl<R: Rng> CoinTrial<R> {
    /// # Errors
    /// [`LabError::Validation`] when `true_bias` is outside [0, 1].
    pub fn with_rng(true_bias: f64, rng: R) -> LabResult<Self> {
        Ok(Self {
            outcomes: Vec::new(),
            heads: 0,
            tails: 0,
            true_bias: check_bias(true_bias)?,
            rng,
        })
    }

    /// Append `count` independent flips; returns the new batch.
    pub fn flip(&mut self, count: usize) -> &[Outcome] {
        let start = self.outcomes.len();
        self.outcomes.reserve(count);
        for _ in 0..count {
            let outcome = if self.rng.random::<f64>() < self.true_bias {
                Outcome::Heads
            } else {
                Outcome::Tails
            };
            self.outcomes.push(outcome);
        }

        let batch = &self.outcomes[start..];
        let new_heads = batch.iter().filter(|o| o.is_heads()).count() as u64;
        self.heads += new_heads;
        self.tails += count as u64 - new_heads;

        log::debug!(
            "coin trial: flipped {count} ({new_heads} heads), totals {}H/{}T",
            self.heads,
            self.tails
        );
        batch
    }

    /// Clear all outcomes. The bias is kept.
    pub fn reset(&mut self) {
        self.outcomes.clear();
        self.heads = 0;
        self.tails = 0;
        log::debug!("coin trial: reset");
    }

    /// Applies to future flips only.
    pub fn set_true_bias(&mut self, true_bias: f64) -> LabResult<()> {
        self.true_bias = check_bias(true_bias)?;
        Ok(())
    }

    pub fn true_bias(&self) -> f64 {
        self.true_bias
    }

    pub fn heads(&self) -> u64 {
        self.heads
    }

    pub fn tails(&self) -> u64 {
        self.tails
    }

    pub fn total(&self) -> u64 {
        self.outcomes.len() as u64
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Cumulative heads fraction after each flip: `(n, heads_so_far / n)`
    /// for n starting at 1.
    pub fn running_proportion(&self) -> Vec<(usize, f64)> {
        let mut heads = 0usize;
        self.outcomes
            .iter()
            .enumerate()
            .map(|(i, o)| {
                if o.is_heads() {
                    heads += 1;
                }
                let n = i + 1;
                (n, heads as f64 / n as f64)
            })
            .collect()
    }
}
