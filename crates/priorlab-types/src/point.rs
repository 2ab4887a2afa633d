// ─────────────────────────────────────────────────────────────────────
// PriorLab — Point and Trace Types
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

/// Clamp a value to [lo, hi], mapping NaN to lo.
///
/// Knob coordinates pass through here on every search step, so a NaN
/// gradient degrades to a boundary point instead of poisoning the trace.
#[inline]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_nan() {
        log::warn!("clamp: NaN detected, clamping to {lo:.4}");
        return lo;
    }
    v.clamp(lo, hi)
}

/// One evaluated location in the (hot, cold) control square.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Hot knob position in [0, 1].
    pub hot: f64,
    /// Cold knob position in [0, 1].
    pub cold: f64,
    /// Loss at (hot, cold).
    pub loss: f64,
}

impl Point {
    pub fn new(hot: f64, cold: f64, loss: f64) -> Self {
        Self { hot, cold, loss }
    }

    /// Evaluate `loss_fn` at (hot, cold) and wrap the result.
    pub fn evaluate<L>(hot: f64, cold: f64, loss_fn: &L) -> Self
    where
        L: Fn(f64, f64) -> f64 + ?Sized,
    {
        Self {
            hot,
            cold,
            loss: loss_fn(hot, cold),
        }
    }

    /// Both coordinates lie in the unit square.
    pub fn in_unit_square(&self) -> bool {
        (0.0..=1.0).contains(&self.hot) && (0.0..=1.0).contains(&self.cold)
    }
}

/// Chronological sequence of visited points.
pub type Trace = Vec<Point>;

/// Point with minimal loss; ties go to the earliest entry.
pub fn best_point(points: &[Point]) -> Option<Point> {
    points.iter().copied().fold(None, |best, p| match best {
        Some(b) if b.loss <= p.loss => Some(b),
        _ => Some(p),
    })
}
