// ─────────────────────────────────────────────────────────────────────
// PriorLab — Shower Comfort Model
// ─────────────────────────────────────────────────────────────────────
//! Two knobs (hot, cold) ∈ [0, 1]² mix a 60°C and a 10°C supply:
//!
//!   temperature = (60·hot + 10·cold) / (hot + cold + 0.01)
//!   flow        = hot + cold ∈ [0, 2]
//!   loss        = 1 / (comfort + 0.005)
//!
//! Comfort is the product of a temperature Gaussian, an asymmetric flow
//! Gaussian (a dribble is punished harder than a torrent), and a flow
//! existence factor that vanishes with the flow.

use serde::{Deserialize, Serialize};

/// Signature shared by every loss surface.
pub type LossFn = fn(f64, f64) -> f64;

/// Most comfortable water temperature (°C).
pub const IDEAL_TEMP: f64 = 38.0;
/// Most comfortable total flow.
pub const IDEAL_FLOW: f64 = 0.7;

pub(crate) const HOT_SUPPLY_C: f64 = 60.0;
pub(crate) const COLD_SUPPLY_C: f64 = 10.0;
pub(crate) const MIX_EPS: f64 = 0.01;

/// 2σ² of the temperature term (σ ≈ 5°C).
const TEMP_TWO_SIGMA_SQ: f64 = 50.0;
const FLOW_SIGMA_BELOW: f64 = 0.2;
const FLOW_SIGMA_ABOVE: f64 = 0.5;
const FLOW_EXISTENCE_RATE: f64 = 10.0;

/// Bounds the loss at 1/0.005 = 200.
const LOSS_FLOOR: f64 = 0.005;

const TRAP_CENTER: (f64, f64) = (0.15, 0.65);
const TRAP_SPREAD: f64 = 0.06;
const TRAP_DEPTH: f64 = 0.8;

/// Start point that sits inside the trap's basin.
pub const TRAP_START: (f64, f64) = (0.15, 0.6);

/// Flow levels drawn as iso-lines over the heatmap.
pub const FLOW_ISO_VALUES: [f64; 5] = [0.25, 0.5, 0.7, 1.0, 1.25];

pub fn temperature(hot: f64, cold: f64) -> f64 {
    (hot * HOT_SUPPLY_C + cold * COLD_SUPPLY_C) / (hot + cold + MIX_EPS)
}

pub fn flow(hot: f64, cold: f64) -> f64 {
    hot + cold
}

pub fn comfort(hot: f64, cold: f64) -> f64 {
    let temp = temperature(hot, cold);
    let f = flow(hot, cold);

    let temp_c = (-(temp - IDEAL_TEMP).powi(2) / TEMP_TWO_SIGMA_SQ).exp();

    let flow_sigma = if f < IDEAL_FLOW {
        FLOW_SIGMA_BELOW
    } else {
        FLOW_SIGMA_ABOVE
    };
    let flow_c = (-(f - IDEAL_FLOW).powi(2) / (2.0 * flow_sigma * flow_sigma)).exp();

    let flow_exists = 1.0 - (-f * FLOW_EXISTENCE_RATE).exp();

    temp_c * flow_c * flow_exists
}

pub fn loss(hot: f64, cold: f64) -> f64 {
    1.0 / (comfort(hot, cold) + LOSS_FLOOR)
}

/// [`loss`] with a Gaussian dent at (0.15, 0.65).
///
/// The dent removes up to 80% of the base loss, so the result never
/// drops below `0.2 · loss(hot, cold)`.
pub fn loss_with_trap(hot: f64, cold: f64) -> f64 {
    let base = loss(hot, cold);
    let dist2 = (hot - TRAP_CENTER.0).powi(2) + (cold - TRAP_CENTER.1).powi(2);
    let trap = base * TRAP_DEPTH * (-dist2 / (2.0 * TRAP_SPREAD * TRAP_SPREAD)).exp();
    base - trap
}

/// Physical readout for one knob setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComfortReading {
    pub temperature: f64,
    pub flow: f64,
    pub loss: f64,
}

pub fn comfort_reading(hot: f64, cold: f64) -> ComfortReading {
    ComfortReading {
        temperature: temperature(hot, cold),
        flow: flow(hot, cold),
        loss: loss(hot, cold),
    }
}

/// Endpoints `((hot, cold), (hot, cold))` of the iso-line
/// `hot + cold = f` inside the unit square, or `None` when the line
/// misses the square.
pub fn flow_iso_segment(f: f64) -> Option<((f64, f64), (f64, f64))> {
    if !(f > 0.0 && f <= 2.0) {
        return None;
    }
    let start = (f.min(1.0), (f - 1.0).max(0.0));
    let end = ((f - 1.0).max(0.0), f.min(1.0));
    Some((start, end))
}
