// ─────────────────────────────────────────────────────────────────────
// PriorLab — Gradient Descent
// ─────────────────────────────────────────────────────────────────────
//! Fixed-rate descent along the central-difference gradient, clamped to
//! the unit square.

use priorlab_landscape::{gradient, loss, LossFn};
use priorlab_types::{best_point, clamp, DescentConfig, Point, Trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::{SearchAlgorithm, SearchState};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescentState {
    pub trace: Trace,
    pub step_count: usize,
    /// The gradient fell below the convergence threshold.
    pub converged: bool,
    /// Converged or hit the step cap.
    pub terminated: bool,
    /// Gradient magnitude measured by the last transition.
    pub last_gradient_norm: Option<f64>,
}

impl SearchState for DescentState {
    fn step_count(&self) -> usize {
        self.step_count
    }

    fn is_terminated(&self) -> bool {
        self.terminated
    }

    fn points(&self) -> &[Point] {
        &self.trace
    }

    fn best_point(&self) -> Option<Point> {
        best_point(&self.trace)
    }
}

pub struct GradientDescent<L = LossFn> {
    loss_fn: L,
    learning_rate: f64,
    max_steps: usize,
    convergence_threshold: f64,
}

impl GradientDescent<LossFn> {
    /// Descent on the base shower loss.
    pub fn new(learning_rate: f64) -> Self {
        let config = DescentConfig {
            learning_rate,
            ..DescentConfig::default()
        };
        Self::with_loss(loss as LossFn, &config)
    }

    pub fn from_config(config: &DescentConfig) -> Self {
        Self::with_loss(loss as LossFn, config)
    }

    /// Default parameters: lr=0.05, 500 steps, threshold 0.5.
    pub fn default_params() -> Self {
        Self::from_config(&DescentConfig::default())
    }
}

impl<L> GradientDescent<L>
where
    L: Fn(f64, f64) -> f64,
{
    pub fn with_loss(loss_fn: L, config: &DescentConfig) -> Self {
        Self {
            loss_fn,
            learning_rate: config.learning_rate,
            max_steps: config.max_steps,
            convergence_threshold: config.convergence_threshold,
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Takes effect on the next transition, including mid-run.
    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        debug_assert!(learning_rate > 0.0, "learning_rate={learning_rate}");
        self.learning_rate = learning_rate;
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn loss_fn(&self) -> &L {
        &self.loss_fn
    }
}

impl<L> SearchAlgorithm for GradientDescent<L>
where
    L: Fn(f64, f64) -> f64,
{
    type State = DescentState;

    fn label(&self) -> &'static str {
        "gradient descent"
    }

    fn start(&self, hot: f64, cold: f64) -> DescentState {
        log::debug!("gradient descent: start at ({hot:.4}, {cold:.4})");
        DescentState {
            trace: vec![Point::evaluate(hot, cold, &self.loss_fn)],
            ..DescentState::default()
        }
    }

    fn reset(&self) -> DescentState {
        DescentState::default()
    }

    fn step(&mut self, state: &mut DescentState) -> bool {
        if state.terminated {
            return false;
        }
        let Some(last) = state.trace.last().copied() else {
            return false;
        };

        let (d_hot, d_cold) = gradient(last.hot, last.cold, &self.loss_fn);
        let norm = (d_hot * d_hot + d_cold * d_cold).sqrt();

        let hot = clamp(last.hot - self.learning_rate * d_hot, 0.0, 1.0);
        let cold = clamp(last.cold - self.learning_rate * d_cold, 0.0, 1.0);
        state.trace.push(Point::evaluate(hot, cold, &self.loss_fn));
        state.step_count += 1;
        state.last_gradient_norm = Some(norm);

        // Judged on the gradient at the point we stepped from
        state.converged = norm < self.convergence_threshold;

        if state.converged {
            state.terminated = true;
            log::debug!(
                "gradient descent: converged after {} steps (|grad|={norm:.4})",
                state.step_count
            );
        } else if state.step_count >= self.max_steps {
            state.terminated = true;
            log::debug!(
                "gradient descent: step cap {} reached (|grad|={norm:.4})",
                self.max_steps
            );
        }
        !state.terminated
    }
}
