// ─────────────────────────────────────────────────────────────────────
// PriorLab — Shared Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Point and trace types, configuration, and error hierarchy shared by
//! the statistics, landscape, search, and trial crates.

pub mod config;
pub mod error;
pub mod point;

pub use config::{
    AnnealConfig, DescentConfig, InferenceConfig, LabConfig, MonteCarloConfig, SchedulerConfig,
};
pub use error::{LabError, LabResult};
pub use point::{best_point, clamp, Point, Trace};
