// ─────────────────────────────────────────────────────────────────────
// PriorLab — Loss Heatmap Grid
// ─────────────────────────────────────────────────────────────────────
//! Row-major sampling of a loss surface over the unit square.
//!
//! Row `r` holds `cold = r / (res - 1)`, column `c` holds
//! `hot = c / (res - 1)`, so both edges of the square are sampled.

use priorlab_types::{LabConfig, LabError, LabResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossGrid {
    /// `data[row * width + col]`.
    pub data: Vec<f64>,
    pub width: usize,
    pub height: usize,
    pub min: f64,
    pub max: f64,
}

impl LossGrid {
    /// Grid at the configured `grid_resolution`.
    pub fn from_config<L>(config: &LabConfig, loss_fn: &L) -> LabResult<Self>
    where
        L: Fn(f64, f64) -> f64 + ?Sized,
    {
        compute_loss_grid(config.grid_resolution, loss_fn)
    }

    /// Sample at (row, col), or `None` outside the grid.
    pub fn value_at(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.data.get(row * self.width + col).copied()
    }

    /// Knob coordinates `(hot, cold)` of a cell.
    pub fn cell_coords(&self, row: usize, col: usize) -> (f64, f64) {
        let hot = col as f64 / (self.width.max(2) - 1) as f64;
        let cold = row as f64 / (self.height.max(2) - 1) as f64;
        (hot, cold)
    }

    /// `(row, col)` of the lowest sample; the first one wins on ties.
    pub fn argmin_cell(&self) -> Option<(usize, usize)> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, &v) in self.data.iter().enumerate() {
            match best {
                Some((_, b)) if b <= v => {}
                _ => best = Some((idx, v)),
            }
        }
        best.map(|(idx, _)| (idx / self.width, idx % self.width))
    }

    /// Knob coordinates `(hot, cold)` of the lowest sample.
    pub fn argmin(&self) -> Option<(f64, f64)> {
        self.argmin_cell().map(|(row, col)| self.cell_coords(row, col))
    }

    /// Sample rescaled to [0, 1] against the grid range; a flat grid
    /// maps everything to 0.
    pub fn normalized(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            0.0
        } else {
            ((value - self.min) / span).clamp(0.0, 1.0)
        }
    }
}

/// Sample `loss_fn` on a `resolution × resolution` grid.
///
/// # Errors
/// [`LabError::Validation`] when `resolution < 2`;
/// [`LabError::Numerical`] when the loss is NaN or infinite at a cell.
pub fn compute_loss_grid<L>(resolution: usize, loss_fn: &L) -> LabResult<LossGrid>
where
    L: Fn(f64, f64) -> f64 + ?Sized,
{
    if resolution < 2 {
        return Err(LabError::Validation(format!(
            "grid resolution must be >= 2, got {resolution}"
        )));
    }

    let last = (resolution - 1) as f64;
    let mut data = Vec::with_capacity(resolution * resolution);
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for row in 0..resolution {
        let cold = row as f64 / last;
        for col in 0..resolution {
            let hot = col as f64 / last;
            let v = loss_fn(hot, cold);
            if !v.is_finite() {
                return Err(LabError::Numerical(format!(
                    "loss is {v} at (hot={hot:.4}, cold={cold:.4})"
                )));
            }
            min = min.min(v);
            max = max.max(v);
            data.push(v);
        }
    }

    log::debug!("loss grid {resolution}x{resolution}: range [{min:.4}, {max:.4}]");

    Ok(LossGrid {
        data,
        width: resolution,
        height: resolution,
        min,
        max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{flow, loss, loss_with_trap, temperature};

    #[test]
    fn test_rejects_tiny_resolution() {
        assert!(matches!(
            compute_loss_grid(1, &loss),
            Err(LabError::Validation(_))
        ));
        assert!(compute_loss_grid(0, &loss).is_err());
    }

    #[test]
    fn test_layout_row_is_cold() {
        let grid = compute_loss_grid(3, &|h: f64, c: f64| 10.0 * c + h).unwrap();
        assert_eq!(grid.data.len(), 9);
        // row 1 → cold 0.5, col 2 → hot 1.0
        assert!((grid.value_at(1, 2).unwrap() - 6.0).abs() < 1e-12);
        assert_eq!(grid.cell_coords(1, 2), (1.0, 0.5));
        assert!(grid.value_at(3, 0).is_none());
    }

    #[test]
    fn test_min_max_tracked() {
        let grid = compute_loss_grid(50, &loss).unwrap();
        let lo = grid.data.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = grid.data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(grid.min, lo);
        assert_eq!(grid.max, hi);
        assert!(grid.min > 0.0 && grid.max <= 200.0 + 1e-9);
    }

    #[test]
    fn test_argmin_is_comfortable() {
        let grid = compute_loss_grid(100, &loss).unwrap();
        let (row, col) = grid.argmin_cell().unwrap();
        let (hot, cold) = grid.argmin().unwrap();
        assert_eq!((hot, cold), grid.cell_coords(row, col));
        let t = temperature(hot, cold);
        let f = flow(hot, cold);
        assert!((35.0..=41.0).contains(&t), "T={t} at ({hot}, {cold})");
        assert!((0.55..=0.85).contains(&f), "F={f} at ({hot}, {cold})");
        assert_eq!(grid.value_at(row, col), Some(grid.min));
    }

    #[test]
    fn test_argmin_first_on_ties() {
        let grid = compute_loss_grid(4, &|_h: f64, _c: f64| 1.0).unwrap();
        assert_eq!(grid.argmin_cell(), Some((0, 0)));
        assert_eq!(grid.argmin(), Some((0.0, 0.0)));
        assert_eq!(grid.normalized(1.0), 0.0);
    }

    #[test]
    fn test_trap_lowers_grid_min_near_center() {
        let base = compute_loss_grid(41, &loss).unwrap();
        let trapped = compute_loss_grid(41, &loss_with_trap).unwrap();
        // (hot 0.15, cold 0.65) → col 6, row 26
        let b = base.value_at(26, 6).unwrap();
        let t = trapped.value_at(26, 6).unwrap();
        assert!(t < 0.25 * b, "trap={t} base={b}");
    }

    #[test]
    fn test_non_finite_loss_rejected() {
        let nan_corner = |h: f64, c: f64| if h == 1.0 && c == 1.0 { f64::NAN } else { h + c };
        let err = compute_loss_grid(5, &nan_corner).unwrap_err();
        assert!(matches!(err, LabError::Numerical(ref msg) if msg.contains("NaN")));
        assert!(matches!(
            compute_loss_grid(3, &|_h: f64, _c: f64| f64::INFINITY),
            Err(LabError::Numerical(_))
        ));
    }

    #[test]
    fn test_from_config_resolution() {
        let config = LabConfig {
            grid_resolution: 7,
            ..LabConfig::default()
        };
        let grid = LossGrid::from_config(&config, &loss).unwrap();
        assert_eq!((grid.width, grid.height), (7, 7));
        assert_eq!(grid, compute_loss_grid(7, &loss).unwrap());

        let tiny = LabConfig {
            grid_resolution: 1,
            ..LabConfig::default()
        };
        assert!(matches!(
            LossGrid::from_config(&tiny, &loss),
            Err(LabError::Validation(_))
        ));
    }

    #[test]
    fn test_normalized_range() {
        let grid = compute_loss_grid(20, &loss).unwrap();
        assert_eq!(grid.normalized(grid.min), 0.0);
        assert_eq!(grid.normalized(grid.max), 1.0);
    }
}
