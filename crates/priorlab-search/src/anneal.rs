// ─────────────────────────────────────────────────────────────────────
// PriorLab — Simulated Annealing
// ─────────────────────────────────────────────────────────────────────
//! Metropolis random walk with geometric cooling.
//!
//! Proposal radius shrinks with temperature:
//!   r = 0.05 · (T / T₀) + 0.005
//! and an uphill move of Δ is accepted with probability exp(-Δ / T).
//! A rejected proposal repeats the previous point, so the trace grows
//! by exactly one entry per step.

use std::f64::consts::TAU;

use priorlab_landscape::{loss_with_trap, LossFn};
use priorlab_types::{best_point, clamp, AnnealConfig, Point, Trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::algorithm::{SearchAlgorithm, SearchState};

const RADIUS_SCALE: f64 = 0.05;
const RADIUS_FLOOR: f64 = 0.005;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnealState {
    pub trace: Trace,
    pub step_count: usize,
    /// Current annealing temperature.
    pub temperature: f64,
    pub done: bool,
    /// Proposals accepted so far.
    pub accepted: usize,
}

impl AnnealState {
    fn empty(initial_temp: f64) -> Self {
        Self {
            trace: Vec::new(),
            step_count: 0,
            temperature: initial_temp,
            done: false,
            accepted: 0,
        }
    }

    /// Accepted fraction of proposals, 0 before the first step.
    pub fn acceptance_rate(&self) -> f64 {
        if self.step_count == 0 {
            0.0
        } else {
            self.accepted as f64 / self.step_count as f64
        }
    }
}

impl SearchState for AnnealState {
    fn step_count(&self) -> usize {
        self.step_count
    }

    fn is_terminated(&self) -> bool {
        self.done
    }

    fn points(&self) -> &[Point] {
        &self.trace
    }

    fn best_point(&self) -> Option<Point> {
        best_point(&self.trace)
    }
}

pub struct SimulatedAnnealing<L = LossFn, R = StdRng> {
    loss_fn: L,
    config: AnnealConfig,
    rng: R,
}

impl SimulatedAnnealing<LossFn, StdRng> {
    /// Annealing on the trap surface, seeded from the OS.
    pub fn from_config(config: &AnnealConfig) -> Self {
        Self::with_rng(loss_with_trap as LossFn, config, StdRng::from_os_rng())
    }

    /// Deterministic variant for replayable runs.
    pub fn with_seed(config: &AnnealConfig, seed: u64) -> Self {
        Self::with_rng(loss_with_trap as LossFn, config, StdRng::seed_from_u64(seed))
    }

    /// Default parameters: T₀=200, cooling 0.995, T_min=0.1, 800 steps.
    pub fn default_params() -> Self {
        Self::from_config(&AnnealConfig::default())
    }
}

impl<L, R> SimulatedAnnealing<L, R>
where
    L: Fn(f64, f64) -> f64,
    R: Rng,
{
    pub fn with_rng(loss_fn: L, config: &AnnealConfig, rng: R) -> Self {
        Self {
            loss_fn,
            config: config.clone(),
            rng,
        }
    }

    pub fn config(&self) -> &AnnealConfig {
        &self.config
    }

    /// Proposal radius at temperature `t`.
    pub fn radius_at(&self, t: f64) -> f64 {
        RADIUS_SCALE * (t / self.config.initial_temp) + RADIUS_FLOOR
    }
}

impl<L, R> SearchAlgorithm for SimulatedAnnealing<L, R>
where
    L: Fn(f64, f64) -> f64,
    R: Rng,
{
    type State = AnnealState;

    fn label(&self) -> &'static str {
        "simulated annealing"
    }

    fn start(&self, hot: f64, cold: f64) -> AnnealState {
        log::debug!("simulated annealing: start at ({hot:.4}, {cold:.4})");
        let mut state = AnnealState::empty(self.config.initial_temp);
        state.trace.push(Point::evaluate(hot, cold, &self.loss_fn));
        state
    }

    fn reset(&self) -> AnnealState {
        AnnealState::empty(self.config.initial_temp)
    }

    fn step(&mut self, state: &mut AnnealState) -> bool {
        if state.done {
            return false;
        }
        let Some(last) = state.trace.last().copied() else {
            return false;
        };

        let t = state.temperature;
        let radius = self.radius_at(t);
        let angle = self.rng.random::<f64>() * TAU;
        let hot = clamp(last.hot + radius * angle.cos(), 0.0, 1.0);
        let cold = clamp(last.cold + radius * angle.sin(), 0.0, 1.0);
        let candidate = Point::evaluate(hot, cold, &self.loss_fn);

        let delta = candidate.loss - last.loss;
        let accept = delta < 0.0 || self.rng.random::<f64>() < (-delta / t).exp();

        if accept {
            state.trace.push(candidate);
            state.accepted += 1;
        } else {
            state.trace.push(last);
        }
        state.step_count += 1;
        state.temperature = t * self.config.cooling_rate;

        if state.temperature < self.config.min_temp || state.step_count >= self.config.max_steps {
            state.done = true;
            log::debug!(
                "simulated annealing: done after {} steps (T={:.4}, accepted {})",
                state.step_count,
                state.temperature,
                state.accepted
            );
        }
        !state.done
    }
}

#[cfg(test)]
mod tests {
    use priorlab_landscape::{loss, TRAP_START};
    use priorlab_types::DescentConfig;

    use super::*;
    use crate::descent::GradientDescent;

    fn run_to_end<A: SearchAlgorithm>(algo: &mut A, st: &mut A::State) {
        while algo.step(st) {}
    }

    #[test]
    fn test_start_state() {
        let sa = SimulatedAnnealing::with_seed(&AnnealConfig::default(), 1);
        let st = sa.start(0.15, 0.6);
        assert_eq!(st.trace.len(), 1);
        assert_eq!(st.temperature, 200.0);
        assert!((st.trace[0].loss - loss_with_trap(0.15, 0.6)).abs() < 1e-12);
        assert_eq!(st.acceptance_rate(), 0.0);
    }

    #[test]
    fn test_trace_grows_one_per_step_and_cools() {
        let mut sa = SimulatedAnnealing::with_seed(&AnnealConfig::default(), 7);
        let mut st = sa.start(0.5, 0.5);
        for n in 1..=20 {
            assert!(sa.step(&mut st));
            assert_eq!(st.trace.len(), n + 1);
            assert_eq!(st.step_count, n);
            let expected = 200.0 * 0.995f64.powi(n as i32);
            assert!((st.temperature - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rejection_duplicates_last_point() {
        let spike = |h: f64, c: f64| if h == 0.5 && c == 0.5 { 0.0 } else { 1e9 };
        let config = AnnealConfig::default();
        let mut sa = SimulatedAnnealing::with_rng(spike, &config, StdRng::seed_from_u64(3));
        let mut st = sa.start(0.5, 0.5);
        for _ in 0..10 {
            sa.step(&mut st);
        }
        assert_eq!(st.trace.len(), 11);
        assert!(st.trace.iter().all(|p| *p == st.trace[0]));
        assert_eq!(st.accepted, 0);
    }

    #[test]
    fn test_first_move_within_radius() {
        let config = AnnealConfig::default();
        let mut sa =
            SimulatedAnnealing::with_rng(|h: f64, _c: f64| -h, &config, StdRng::seed_from_u64(5));
        let mut st = sa.start(0.5, 0.5);
        sa.step(&mut st);
        let (a, b) = (st.trace[0], st.trace[1]);
        let dist = ((a.hot - b.hot).powi(2) + (a.cold - b.cold).powi(2)).sqrt();
        assert!(dist <= sa.radius_at(200.0) + 1e-12, "dist={dist}");
    }

    #[test]
    fn test_stops_at_step_cap() {
        let mut sa = SimulatedAnnealing::with_seed(&AnnealConfig::default(), 11);
        let mut st = sa.start(TRAP_START.0, TRAP_START.1);
        run_to_end(&mut sa, &mut st);
        // 200 · 0.995^800 ≈ 3.6 is still above T_min
        assert!(st.done);
        assert_eq!(st.step_count, 800);
        assert_eq!(st.trace.len(), 801);
        assert!(st.trace.iter().all(Point::in_unit_square));
    }

    #[test]
    fn test_stops_below_min_temp() {
        let config = AnnealConfig {
            cooling_rate: 0.5,
            ..AnnealConfig::default()
        };
        let mut sa = SimulatedAnnealing::with_seed(&config, 2);
        let mut st = sa.start(0.5, 0.5);
        run_to_end(&mut sa, &mut st);
        // 200 · 0.5^11 < 0.1 ≤ 200 · 0.5^10
        assert_eq!(st.step_count, 11);
        assert!(st.temperature < 0.1);
        let frozen = st.clone();
        assert!(!sa.step(&mut st));
        assert_eq!(st, frozen);
    }

    #[test]
    fn test_from_config_uses_section() {
        let config = AnnealConfig {
            max_steps: 6,
            ..AnnealConfig::default()
        };
        let mut sa = SimulatedAnnealing::from_config(&config);
        assert_eq!(sa.config().max_steps, 6);
        let mut st = sa.start(TRAP_START.0, TRAP_START.1);
        run_to_end(&mut sa, &mut st);
        assert_eq!(st.step_count, 6);
        assert_eq!(SimulatedAnnealing::default_params().config().max_steps, 800);
    }

    #[test]
    fn test_seeded_runs_replay() {
        let mut a = SimulatedAnnealing::with_seed(&AnnealConfig::default(), 42);
        let mut b = SimulatedAnnealing::with_seed(&AnnealConfig::default(), 42);
        let mut sa_st = a.start(0.3, 0.3);
        let mut sb_st = b.start(0.3, 0.3);
        run_to_end(&mut a, &mut sa_st);
        run_to_end(&mut b, &mut sb_st);
        assert_eq!(sa_st, sb_st);
    }

    #[test]
    fn test_escapes_trap_more_often_than_not() {
        let mut gd =
            GradientDescent::with_loss(loss_with_trap as LossFn, &DescentConfig::default());
        let mut gd_st = gd.start(TRAP_START.0, TRAP_START.1);
        run_to_end(&mut gd, &mut gd_st);
        let gd_best = gd_st.best_point().unwrap().loss;

        let wins = (0..10u64)
            .filter(|&seed| {
                let mut sa = SimulatedAnnealing::with_seed(&AnnealConfig::default(), seed);
                let mut st = sa.start(TRAP_START.0, TRAP_START.1);
                run_to_end(&mut sa, &mut st);
                st.best_point().unwrap().loss <= gd_best
            })
            .count();
        assert!(wins > 5, "annealing matched descent in only {wins}/10 runs");
    }

    #[test]
    fn test_custom_loss_injected() {
        let config = AnnealConfig::default();
        let mut sa = SimulatedAnnealing::with_rng(loss as LossFn, &config, StdRng::seed_from_u64(9));
        let mut st = sa.start(0.4, 0.3);
        assert!((st.trace[0].loss - loss(0.4, 0.3)).abs() < 1e-12);
        assert!(sa.step(&mut st));
    }

    #[test]
    fn test_reset_idempotent() {
        let mut sa = SimulatedAnnealing::with_seed(&AnnealConfig::default(), 0);
        let mut st = sa.start(0.5, 0.5);
        sa.step(&mut st);
        let a = sa.reset();
        let b = sa.reset();
        assert_eq!(a, b);
        assert!(a.trace.is_empty());
        assert_eq!(a.temperature, 200.0);
    }
}
