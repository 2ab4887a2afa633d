// ─────────────────────────────────────────────────────────────────────
// PriorLab — Search Algorithms
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Iterative optimizers over the shower loss and the cooperative loop
//! that animates them.
//!
//! Architecture:
//!   - algorithm: start/step/reset contract shared by all searches
//!   - descent: fixed-rate gradient descent with convergence test
//!   - anneal: Metropolis simulated annealing, geometric cooling
//!   - monte_carlo: uniform random sampling with best tracking
//!   - run: algorithm + state pairing, summaries, comparison
//!   - scheduler: epoch-guarded run/stop/step loop
//!
//! Stochastic searches are generic over `rand::Rng`; seed them with
//! `with_seed` for replayable runs.

pub mod algorithm;
pub mod anneal;
pub mod descent;
pub mod monte_carlo;
pub mod run;
pub mod scheduler;

pub use algorithm::{SearchAlgorithm, SearchState};
pub use anneal::{AnnealState, SimulatedAnnealing};
pub use descent::{DescentState, GradientDescent};
pub use monte_carlo::{MonteCarloSearch, MonteCarloState};
pub use run::{compare, MethodSummary, SearchRun};
pub use scheduler::{AnimationLoop, LoopHandle, Steppable, TickOutcome, TickTicket};
