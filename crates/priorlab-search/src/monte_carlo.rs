// ─────────────────────────────────────────────────────────────────────
// PriorLab — Monte Carlo Search
// ─────────────────────────────────────────────────────────────────────
//! Uniform random sampling of the unit square, keeping the best sample.

use priorlab_landscape::{loss, LossFn};
use priorlab_types::{MonteCarloConfig, Point, Trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::algorithm::{SearchAlgorithm, SearchState};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloState {
    pub samples: Trace,
    /// Lowest-loss sample; replaced only by a strictly lower one.
    pub best: Option<Point>,
    pub step_count: usize,
    pub done: bool,
}

impl SearchState for MonteCarloState {
    fn step_count(&self) -> usize {
        self.step_count
    }

    fn is_terminated(&self) -> bool {
        self.done
    }

    fn points(&self) -> &[Point] {
        &self.samples
    }

    fn best_point(&self) -> Option<Point> {
        self.best
    }
}

pub struct MonteCarloSearch<L = LossFn, R = StdRng> {
    loss_fn: L,
    max_samples: usize,
    rng: R,
}

impl MonteCarloSearch<LossFn, StdRng> {
    /// Search over the base shower loss, seeded from the OS.
    pub fn from_config(config: &MonteCarloConfig) -> Self {
        Self::with_rng(loss as LossFn, config, StdRng::from_os_rng())
    }

    pub fn with_seed(config: &MonteCarloConfig, seed: u64) -> Self {
        Self::with_rng(loss as LossFn, config, StdRng::seed_from_u64(seed))
    }

    /// Default parameters: 500 samples.
    pub fn default_params() -> Self {
        Self::from_config(&MonteCarloConfig::default())
    }
}

impl<L, R> MonteCarloSearch<L, R>
where
    L: Fn(f64, f64) -> f64,
    R: Rng,
{
    pub fn with_rng(loss_fn: L, config: &MonteCarloConfig, rng: R) -> Self {
        Self {
            loss_fn,
            max_samples: config.max_samples,
            rng,
        }
    }

    pub fn max_samples(&self) -> usize {
        self.max_samples
    }
}

impl<L, R> SearchAlgorithm for MonteCarloSearch<L, R>
where
    L: Fn(f64, f64) -> f64,
    R: Rng,
{
    type State = MonteCarloState;

    fn label(&self) -> &'static str {
        "monte carlo"
    }

    /// Sampling has no start point; the coordinates are ignored.
    fn start(&self, _hot: f64, _cold: f64) -> MonteCarloState {
        log::debug!("monte carlo: start ({} samples)", self.max_samples);
        MonteCarloState::default()
    }

    fn reset(&self) -> MonteCarloState {
        MonteCarloState::default()
    }

    fn step(&mut self, state: &mut MonteCarloState) -> bool {
        if state.done {
            return false;
        }

        let hot = self.rng.random::<f64>();
        let cold = self.rng.random::<f64>();
        let sample = Point::evaluate(hot, cold, &self.loss_fn);

        match state.best {
            Some(b) if b.loss <= sample.loss => {}
            _ => state.best = Some(sample),
        }
        state.samples.push(sample);
        state.step_count += 1;

        if state.step_count >= self.max_samples {
            state.done = true;
            if let Some(b) = state.best {
                log::debug!(
                    "monte carlo: done after {} samples, best {:.4} at ({:.4}, {:.4})",
                    state.step_count,
                    b.loss,
                    b.hot,
                    b.cold
                );
            }
        }
        !state.done
    }
}
