// ─────────────────────────────────────────────────────────────────────
// PriorLab — Runtime Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{LabError, LabResult};

fn check(ok: bool, msg: impl FnOnce() -> String) -> LabResult<()> {
    if ok {
        Ok(())
    } else {
        Err(LabError::Config(msg()))
    }
}

fn check_unit_open(name: &str, v: f64) -> LabResult<()> {
    check(v > 0.0 && v < 1.0, || {
        format!("{name} must be in (0, 1), got {v}")
    })
}

/// Gradient descent parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DescentConfig {
    /// Step multiplier applied to the numeric gradient.
    /// Default: 0.05 (slider range 0.001..=0.5).
    pub learning_rate: f64,
    /// Hard cap on transitions. Default: 500.
    pub max_steps: usize,
    /// Gradient magnitude below which the run counts as converged.
    /// Default: 0.5.
    pub convergence_threshold: f64,
}

impl Default for DescentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.05,
            max_steps: 500,
            convergence_threshold: 0.5,
        }
    }
}

impl DescentConfig {
    pub fn validate(&self) -> LabResult<()> {
        check(
            self.learning_rate.is_finite() && self.learning_rate > 0.0,
            || format!("learning_rate must be > 0, got {}", self.learning_rate),
        )?;
        check(self.max_steps >= 1, || {
            format!("descent.max_steps must be >= 1, got {}", self.max_steps)
        })?;
        check(self.convergence_threshold > 0.0, || {
            format!(
                "convergence_threshold must be > 0, got {}",
                self.convergence_threshold
            )
        })
    }
}

/// Simulated annealing schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealConfig {
    /// Starting temperature. Default: 200.
    pub initial_temp: f64,
    /// Geometric decay factor per step. Default: 0.995.
    pub cooling_rate: f64,
    /// Run ends once temperature falls below this. Default: 0.1.
    pub min_temp: f64,
    /// Hard cap on transitions. Default: 800.
    pub max_steps: usize,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            initial_temp: 200.0,
            cooling_rate: 0.995,
            min_temp: 0.1,
            max_steps: 800,
        }
    }
}

impl AnnealConfig {
    pub fn validate(&self) -> LabResult<()> {
        check(self.initial_temp > 0.0, || {
            format!("initial_temp must be > 0, got {}", self.initial_temp)
        })?;
        check_unit_open("cooling_rate", self.cooling_rate)?;
        check(self.min_temp > 0.0 && self.min_temp < self.initial_temp, || {
            format!(
                "min_temp must be in (0, initial_temp={}), got {}",
                self.initial_temp, self.min_temp
            )
        })?;
        check(self.max_steps >= 1, || {
            format!("anneal.max_steps must be >= 1, got {}", self.max_steps)
        })
    }
}

/// Monte Carlo random search sample cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    /// Number of uniform samples drawn. Default: 500.
    pub max_samples: usize,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self { max_samples: 500 }
    }
}

impl MonteCarloConfig {
    pub fn validate(&self) -> LabResult<()> {
        check(self.max_samples >= 1, || {
            format!("max_samples must be >= 1, got {}", self.max_samples)
        })
    }
}

/// Cooperative run-loop cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Minimum gap between two run-mode steps. Default: 50 (≈20 steps/s).
    pub tick_interval_ms: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 50,
        }
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> LabResult<()> {
        check(self.tick_interval_ms > 0, || {
            "tick_interval_ms must be > 0".to_string()
        })
    }
}

/// Coin trial and inference parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Prior alpha. Default: 1 (uniform prior).
    pub prior_alpha: f64,
    /// Prior beta. Default: 1 (uniform prior).
    pub prior_beta: f64,
    /// Probability of heads for simulated flips. Default: 0.5.
    pub true_bias: f64,
    /// Credible / confidence level. Default: 0.95.
    pub credible_level: f64,
    /// Significance level for the binomial test. Default: 0.05.
    pub significance: f64,
    /// Null-hypothesis heads probability. Default: 0.5.
    pub null_p: f64,
    /// Number of intervals sampled per beta curve. Default: 200.
    pub curve_points: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            prior_alpha: 1.0,
            prior_beta: 1.0,
            true_bias: 0.5,
            credible_level: 0.95,
            significance: 0.05,
            null_p: 0.5,
            curve_points: 200,
        }
    }
}

impl InferenceConfig {
    pub fn validate(&self) -> LabResult<()> {
        check(self.prior_alpha > 0.0 && self.prior_alpha.is_finite(), || {
            format!("prior_alpha must be > 0, got {}", self.prior_alpha)
        })?;
        check(self.prior_beta > 0.0 && self.prior_beta.is_finite(), || {
            format!("prior_beta must be > 0, got {}", self.prior_beta)
        })?;
        check((0.0..=1.0).contains(&self.true_bias), || {
            format!("true_bias must be in [0, 1], got {}", self.true_bias)
        })?;
        check_unit_open("credible_level", self.credible_level)?;
        check_unit_open("significance", self.significance)?;
        check_unit_open("null_p", self.null_p)?;
        check(self.curve_points >= 1, || {
            format!("curve_points must be >= 1, got {}", self.curve_points)
        })
    }
}

/// Top-level configuration for every PriorLab engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub descent: DescentConfig,
    pub anneal: AnnealConfig,
    pub monte_carlo: MonteCarloConfig,
    pub scheduler: SchedulerConfig,
    pub inference: InferenceConfig,
    /// Cells per axis of the rendered loss grid. Default: 100.
    pub grid_resolution: usize,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            descent: DescentConfig::default(),
            anneal: AnnealConfig::default(),
            monte_carlo: MonteCarloConfig::default(),
            scheduler: SchedulerConfig::default(),
            inference: InferenceConfig::default(),
            grid_resolution: 100,
        }
    }
}

impl LabConfig {
    /// Validate every section.
    pub fn validate(&self) -> LabResult<()> {
        self.descent.validate()?;
        self.anneal.validate()?;
        self.monte_carlo.validate()?;
        self.scheduler.validate()?;
        self.inference.validate()?;
        check(self.grid_resolution >= 2, || {
            format!("grid_resolution must be >= 2, got {}", self.grid_resolution)
        })
    }

    /// Load from JSON string. Missing sections keep their defaults.
    pub fn from_json(json: &str) -> LabResult<Self> {
        serde_json::from_str(json).map_err(|e| LabError::Config(format!("JSON parse error: {e}")))
    }
}
