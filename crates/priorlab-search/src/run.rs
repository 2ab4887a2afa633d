// ─────────────────────────────────────────────────────────────────────
// PriorLab — Search Runs and Comparison
// ─────────────────────────────────────────────────────────────────────
//! Pairs an algorithm with the state it drives, so the run loop and
//! the comparison view can treat all three searches alike.

use priorlab_types::Point;
use serde::{Deserialize, Serialize};

use crate::algorithm::{SearchAlgorithm, SearchState};
use crate::scheduler::Steppable;

pub struct SearchRun<A: SearchAlgorithm> {
    algorithm: A,
    state: A::State,
}

impl<A: SearchAlgorithm> SearchRun<A> {
    /// Run holding the algorithm's empty state.
    pub fn new(algorithm: A) -> Self {
        let state = algorithm.reset();
        Self { algorithm, state }
    }

    /// Run already seeded at (hot, cold).
    pub fn started(algorithm: A, hot: f64, cold: f64) -> Self {
        let state = algorithm.start(hot, cold);
        Self { algorithm, state }
    }

    pub fn start(&mut self, hot: f64, cold: f64) {
        self.state = self.algorithm.start(hot, cold);
    }

    pub fn reset(&mut self) {
        log::debug!("{}: reset", self.algorithm.label());
        self.state = self.algorithm.reset();
    }

    pub fn step(&mut self) -> bool {
        self.algorithm.step(&mut self.state)
    }

    /// Step until the algorithm terminates. Returns the steps taken.
    pub fn run_to_end(&mut self) -> usize {
        let before = self.state.step_count();
        while self.step() {}
        self.state.step_count() - before
    }

    pub fn state(&self) -> &A::State {
        &self.state
    }

    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// Parameter changes apply from the next step on.
    pub fn algorithm_mut(&mut self) -> &mut A {
        &mut self.algorithm
    }

    pub fn is_terminated(&self) -> bool {
        self.state.is_terminated()
    }

    pub fn summary(&self) -> MethodSummary {
        MethodSummary {
            label: self.algorithm.label().to_string(),
            steps: self.state.step_count(),
            best: self.state.best_point(),
        }
    }
}

impl<A: SearchAlgorithm> Steppable for SearchRun<A> {
    fn advance(&mut self) -> bool {
        self.step()
    }
}

/// Outcome of one search run for side-by-side comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSummary {
    pub label: String,
    pub steps: usize,
    pub best: Option<Point>,
}

/// Summary with the lowest best loss; earlier entries win ties and
/// runs without a point are skipped.
pub fn compare(summaries: &[MethodSummary]) -> Option<&MethodSummary> {
    let mut winner: Option<(&MethodSummary, f64)> = None;
    for s in summaries {
        let Some(best) = s.best else { continue };
        match winner {
            Some((_, loss)) if loss <= best.loss => {}
            _ => winner = Some((s, best.loss)),
        }
    }
    winner.map(|(s, _)| s)
}
