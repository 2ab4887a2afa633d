// ─────────────────────────────────────────────────────────────────────
// PriorLab — Beta Distribution
// ─────────────────────────────────────────────────────────────────────
//! Beta(α, β) density, distribution, and quantile functions plus the
//! summary statistics shown next to prior/posterior plots.

use serde::{Deserialize, Serialize};

use priorlab_types::{LabError, LabResult};

use crate::special::{ln_beta, regularized_ibeta};

/// Default credible / confidence level.
pub const DEFAULT_LEVEL: f64 = 0.95;

/// Default number of intervals in a sampled curve (yields 201 points).
pub const DEFAULT_CURVE_POINTS: usize = 200;

/// Curves are evaluated inside [CURVE_X_MIN, CURVE_X_MAX] so shapes with
/// α < 1 or β < 1 do not blow up at the boundary.
const CURVE_X_MIN: f64 = 0.001;
const CURVE_X_MAX: f64 = 0.999;

#[inline]
fn debug_check_shape(alpha: f64, beta: f64) {
    debug_assert!(
        alpha > 0.0 && beta > 0.0,
        "beta shape parameters must be > 0, got alpha={alpha}, beta={beta}"
    );
}

/// Probability density of Beta(α, β) at x.
///
/// Zero outside [0, 1]. At the endpoints the density is +∞, finite, or
/// zero depending on whether the matching shape parameter is below, at,
/// or above 1.
pub fn beta_pdf(x: f64, alpha: f64, beta: f64) -> f64 {
    debug_check_shape(alpha, beta);
    if !(0.0..=1.0).contains(&x) {
        return 0.0;
    }
    if x == 0.0 {
        return if alpha < 1.0 {
            f64::INFINITY
        } else if alpha == 1.0 {
            (-ln_beta(alpha, beta)).exp()
        } else {
            0.0
        };
    }
    if x == 1.0 {
        return if beta < 1.0 {
            f64::INFINITY
        } else if beta == 1.0 {
            (-ln_beta(alpha, beta)).exp()
        } else {
            0.0
        };
    }
    ((alpha - 1.0) * x.ln() + (beta - 1.0) * (1.0 - x).ln() - ln_beta(alpha, beta)).exp()
}

/// Cumulative distribution of Beta(α, β) at x.
pub fn beta_cdf(x: f64, alpha: f64, beta: f64) -> f64 {
    debug_check_shape(alpha, beta);
    regularized_ibeta(x, alpha, beta)
}

/// Quantile function: x such that `beta_cdf(x) == p`.
///
/// Bisection on the CDF, so it always returns a value in [0, 1] even
/// for p at the extremes or strongly skewed shapes. Above the median the
/// search runs on the upper tail, I_{1-x}(β, α) = 1 - p, so tail masses
/// far below machine epsilon are still resolved.
pub fn beta_inv(p: f64, alpha: f64, beta: f64) -> f64 {
    debug_check_shape(alpha, beta);
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }
    if p > 0.5 {
        1.0 - lower_tail_inv(1.0 - p, beta, alpha)
    } else {
        lower_tail_inv(p, alpha, beta)
    }
}

/// x with `I_x(a, b) == q`, bisecting until the bracket is one ulp wide
/// relative to its upper end.
fn lower_tail_inv(q: f64, a: f64, b: f64) -> f64 {
    // Enough halvings to reach the smallest subnormal from 1
    const MAX_ITER: usize = 1100;

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    for _ in 0..MAX_ITER {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            break;
        }
        if regularized_ibeta(mid, a, b) < q {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo <= f64::EPSILON * hi {
            break;
        }
    }
    0.5 * (lo + hi)
}

pub fn beta_mean(alpha: f64, beta: f64) -> f64 {
    debug_check_shape(alpha, beta);
    alpha / (alpha + beta)
}

/// Mode of Beta(α, β), extended to the shapes where the textbook
/// formula is undefined.
///
/// | shape            | mode                 |
/// |------------------|----------------------|
/// | α ≤ 1 and β ≤ 1  | 0.5                  |
/// | α ≤ 1            | 0                    |
/// | β ≤ 1            | 1                    |
/// | otherwise        | (α-1) / (α+β-2)      |
pub fn beta_mode(alpha: f64, beta: f64) -> f64 {
    debug_check_shape(alpha, beta);
    if alpha <= 1.0 && beta <= 1.0 {
        return 0.5;
    }
    if alpha <= 1.0 {
        return 0.0;
    }
    if beta <= 1.0 {
        return 1.0;
    }
    (alpha - 1.0) / (alpha + beta - 2.0)
}

/// Equal-tailed credible interval `[Q(tail), Q(1 - tail)]` with
/// `tail = (1 - level) / 2`.
pub fn beta_credible_interval(alpha: f64, beta: f64, level: f64) -> (f64, f64) {
    let tail = (1.0 - level) / 2.0;
    (beta_inv(tail, alpha, beta), beta_inv(1.0 - tail, alpha, beta))
}

/// One sample of a density curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

/// Sample the density at `num_points + 1` evenly spaced x in [0, 1].
///
/// The reported x is the grid value; the density is evaluated at x
/// clamped into [0.001, 0.999], and non-finite densities become 0.
pub fn beta_curve_points(alpha: f64, beta: f64, num_points: usize) -> Vec<CurvePoint> {
    let num_points = num_points.max(1);
    let mut replaced = 0usize;
    let points: Vec<CurvePoint> = (0..=num_points)
        .map(|i| {
            let x = i as f64 / num_points as f64;
            let y = beta_pdf(x.clamp(CURVE_X_MIN, CURVE_X_MAX), alpha, beta);
            if y.is_finite() {
                CurvePoint { x, y }
            } else {
                replaced += 1;
                CurvePoint { x, y: 0.0 }
            }
        })
        .collect();
    if replaced > 0 {
        log::warn!(
            "beta_curve_points: {replaced} non-finite densities replaced by 0 \
             (alpha={alpha}, beta={beta})"
        );
    }
    points
}

/// Shape of a beta prior or posterior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetaParams {
    pub alpha: f64,
    pub beta: f64,
}

impl BetaParams {
    /// Validated constructor: both parameters finite and > 0.
    pub fn new(alpha: f64, beta: f64) -> LabResult<Self> {
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(LabError::Domain(format!("alpha must be > 0, got {alpha}")));
        }
        if !(beta.is_finite() && beta > 0.0) {
            return Err(LabError::Domain(format!("beta must be > 0, got {beta}")));
        }
        Ok(Self { alpha, beta })
    }

    /// The flat Beta(1, 1) prior.
    pub fn uniform() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
        }
    }

    /// Conjugate update: `{α + successes, β + failures}`.
    pub fn posterior(&self, successes: u64, failures: u64) -> Self {
        Self {
            alpha: self.alpha + successes as f64,
            beta: self.beta + failures as f64,
        }
    }

    pub fn mean(&self) -> f64 {
        beta_mean(self.alpha, self.beta)
    }

    pub fn mode(&self) -> f64 {
        beta_mode(self.alpha, self.beta)
    }

    pub fn pdf(&self, x: f64) -> f64 {
        beta_pdf(x, self.alpha, self.beta)
    }

    pub fn cdf(&self, x: f64) -> f64 {
        beta_cdf(x, self.alpha, self.beta)
    }

    pub fn quantile(&self, p: f64) -> f64 {
        beta_inv(p, self.alpha, self.beta)
    }

    pub fn credible_interval(&self, level: f64) -> (f64, f64) {
        beta_credible_interval(self.alpha, self.beta, level)
    }

    pub fn curve(&self, num_points: usize) -> Vec<CurvePoint> {
        beta_curve_points(self.alpha, self.beta, num_points)
    }
}

impl Default for BetaParams {
    fn default() -> Self {
        Self::uniform()
    }
}
