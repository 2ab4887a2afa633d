// ─────────────────────────────────────────────────────────────────────
// PriorLab — Numeric Gradient
// ─────────────────────────────────────────────────────────────────────
//! Central-difference gradient of any loss surface, and its split into
//! a temperature-driven and a flow-driven part.
//!
//! Chain rule over the mixing map (hot, cold) → (T, F):
//!
//!   ∂L/∂hot  = ∂L/∂T · ∂T/∂hot  + ∂L/∂F
//!   ∂L/∂cold = ∂L/∂T · ∂T/∂cold + ∂L/∂F
//!
//! since ∂F/∂hot = ∂F/∂cold = 1. Solving the 2×2 system recovers the
//! two scalar partials from the numeric gradient.

use serde::{Deserialize, Serialize};

use crate::model::{COLD_SUPPLY_C, HOT_SUPPLY_C, MIX_EPS};

/// Finite-difference step on each axis.
pub const GRADIENT_STEP: f64 = 1e-4;

/// Jacobian determinants below this are treated as singular.
const DET_EPS: f64 = 1e-10;

/// Central-difference gradient `(∂L/∂hot, ∂L/∂cold)`.
///
/// Each axis is perturbed independently by ±[`GRADIENT_STEP`]; the
/// perturbed points may leave the unit square.
pub fn gradient<L>(hot: f64, cold: f64, loss_fn: &L) -> (f64, f64)
where
    L: Fn(f64, f64) -> f64 + ?Sized,
{
    let h = GRADIENT_STEP;
    let d_hot = (loss_fn(hot + h, cold) - loss_fn(hot - h, cold)) / (2.0 * h);
    let d_cold = (loss_fn(hot, cold + h) - loss_fn(hot, cold - h)) / (2.0 * h);
    (d_hot, d_cold)
}

/// Gradient split into temperature and flow contributions.
///
/// `temp_component + flow_component == total` except in the degenerate
/// case, where the whole gradient is reported as flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientDecomposition {
    /// ∂L/∂T · (∂T/∂hot, ∂T/∂cold).
    pub temp_component: [f64; 2],
    /// ∂L/∂F · (1, 1); always on the diagonal.
    pub flow_component: [f64; 2],
    /// Numeric gradient (∂L/∂hot, ∂L/∂cold).
    pub total: [f64; 2],
    /// ∂L/∂T recovered from the solve (0 when degenerate).
    pub d_loss_d_temp: f64,
    /// ∂L/∂F recovered from the solve.
    pub d_loss_d_flow: f64,
    /// The Jacobian was singular and the fallback was used.
    pub degenerate: bool,
}

impl GradientDecomposition {
    pub fn temp_magnitude(&self) -> f64 {
        norm(self.temp_component)
    }

    pub fn flow_magnitude(&self) -> f64 {
        norm(self.flow_component)
    }

    pub fn total_magnitude(&self) -> f64 {
        norm(self.total)
    }
}

fn norm(v: [f64; 2]) -> f64 {
    (v[0] * v[0] + v[1] * v[1]).sqrt()
}

/// Decompose the numeric gradient at (hot, cold) via the analytic
/// Jacobian of the temperature/flow mixing map.
pub fn gradient_decomposed<L>(hot: f64, cold: f64, loss_fn: &L) -> GradientDecomposition
where
    L: Fn(f64, f64) -> f64 + ?Sized,
{
    let (g_hot, g_cold) = gradient(hot, cold, loss_fn);
    let total = [g_hot, g_cold];

    let denom = hot + cold + MIX_EPS;
    let denom_sq = denom * denom;
    let spread = HOT_SUPPLY_C - COLD_SUPPLY_C;
    let dt_dhot = (spread * cold + HOT_SUPPLY_C * MIX_EPS) / denom_sq;
    let dt_dcold = (-spread * hot + COLD_SUPPLY_C * MIX_EPS) / denom_sq;

    // | dt_dhot  1 | |∂L/∂T|   |g_hot |
    // | dt_dcold 1 | |∂L/∂F| = |g_cold|
    let det = dt_dhot - dt_dcold;
    if !(det.abs() >= DET_EPS) {
        log::warn!(
            "gradient_decomposed: singular Jacobian at ({hot:.4}, {cold:.4}), det={det:e}; \
             attributing gradient to flow"
        );
        return GradientDecomposition {
            temp_component: [0.0, 0.0],
            flow_component: total,
            total,
            d_loss_d_temp: 0.0,
            d_loss_d_flow: 0.0,
            degenerate: true,
        };
    }

    let d_loss_d_temp = (g_hot - g_cold) / det;
    let d_loss_d_flow = g_hot - d_loss_d_temp * dt_dhot;

    GradientDecomposition {
        temp_component: [d_loss_d_temp * dt_dhot, d_loss_d_temp * dt_dcold],
        flow_component: [d_loss_d_flow, d_loss_d_flow],
        total,
        d_loss_d_temp,
        d_loss_d_flow,
        degenerate: false,
    }
}
