// ─────────────────────────────────────────────────────────────────────
// PriorLab — Loss Landscape
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Two-knob shower model searched by the optimization lessons.
//!
//! Architecture:
//!   - model: temperature/flow mixing, comfort, loss, trap variant
//!   - gradient: central differences + temperature/flow decomposition
//!   - grid: dense row-major loss grid for heatmaps

pub mod gradient;
pub mod grid;
pub mod model;

pub use gradient::{gradient, gradient_decomposed, GradientDecomposition, GRADIENT_STEP};
pub use grid::{compute_loss_grid, LossGrid};
pub use model::{
    comfort, comfort_reading, flow, flow_iso_segment, loss, loss_with_trap, temperature,
    ComfortReading, LossFn, FLOW_ISO_VALUES, IDEAL_FLOW, IDEAL_TEMP, TRAP_START,
};
pub use priorlab_types::clamp;
