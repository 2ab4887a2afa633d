// ─────────────────────────────────────────────────────────────────────
// PriorLab — Search Algorithm Contract
// ─────────────────────────────────────────────────────────────────────
//! Shared start/step/reset contract so a caller can drive gradient
//! descent, simulated annealing, and Monte Carlo search interchangeably.

use priorlab_types::Point;

/// Read-only view over any algorithm's state.
pub trait SearchState {
    /// Transitions taken since the last start/reset.
    fn step_count(&self) -> usize;
    /// Monotonic until the next start/reset.
    fn is_terminated(&self) -> bool;
    /// Every point produced so far, in step order.
    fn points(&self) -> &[Point];
    /// Lowest-loss point; the earliest wins ties.
    fn best_point(&self) -> Option<Point>;
}

/// Iterative optimizer over a two-knob loss surface.
///
/// States are plain values owned by the caller; the algorithm holds
/// only parameters, the loss function, and (for stochastic searches)
/// its random source.
pub trait SearchAlgorithm {
    type State: SearchState;

    /// Short display name.
    fn label(&self) -> &'static str;

    /// Fresh state seeded at (hot, cold).
    fn start(&self, hot: f64, cold: f64) -> Self::State;

    /// Empty state; stepping it is a no-op until started.
    fn reset(&self) -> Self::State;

    /// Single transition. Returns `false` once the run should not
    /// continue; a terminated state is left untouched.
    fn step(&mut self, state: &mut Self::State) -> bool;
}
