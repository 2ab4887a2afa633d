// ─────────────────────────────────────────────────────────────────────
// PriorLab — Frequentist Test
// ─────────────────────────────────────────────────────────────────────

use priorlab_stats::{binomial_test_p_value, wald_confidence_interval, DEFAULT_LEVEL};
use serde::{Deserialize, Serialize};

/// Null hypothesis of a fair coin.
pub const FAIR_COIN: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequentistResult {
    /// heads / total, or 0.5 before any flip.
    pub point_estimate: f64,
    pub confidence_interval: (f64, f64),
    pub p_value: f64,
    /// `p_value < alpha`.
    pub reject_null: bool,
}

/// Wald 95% interval and exact binomial test against a fair coin.
pub fn frequentist_test(heads: u64, total: u64, alpha: f64) -> FrequentistResult {
    frequentist_test_with(heads, total, alpha, DEFAULT_LEVEL, FAIR_COIN)
}

pub fn frequentist_test_with(
    heads: u64,
    total: u64,
    alpha: f64,
    level: f64,
    null_p: f64,
) -> FrequentistResult {
    debug_assert!(heads <= total, "heads={heads} > total={total}");
    let point_estimate = if total == 0 {
        0.5
    } else {
        heads as f64 / total as f64
    };
    let p_value = binomial_test_p_value(heads, total, null_p);
    FrequentistResult {
        point_estimate,
        confidence_interval: wald_confidence_interval(heads, total, level),
        p_value,
        reject_null: p_value < alpha,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data() {
        let r = frequentist_test(0, 0, 0.05);
        assert_eq!(r.point_estimate, 0.5);
        assert_eq!(r.confidence_interval, (0.0, 1.0));
        assert_eq!(r.p_value, 1.0);
        assert!(!r.reject_null);
    }

    #[test]
    fn test_lopsided_rejects() {
        let r = frequentist_test(9, 10, 0.05);
        assert!((r.point_estimate - 0.9).abs() < 1e-12);
        assert!((r.p_value - 22.0 / 1024.0).abs() < 1e-12);
        assert!(r.reject_null);
        // Stricter significance keeps the null
        assert!(!frequentist_test(9, 10, 0.01).reject_null);
    }

    #[test]
    fn test_balanced_keeps_null() {
        let r = frequentist_test(50, 100, 0.05);
        assert!((r.p_value - 1.0).abs() < 1e-9);
        assert!(!r.reject_null);
        let (lo, hi) = r.confidence_interval;
        assert!(lo < 0.5 && 0.5 < hi);
    }

    #[test]
    fn test_custom_null() {
        // 30 of 100 is exactly what a 0.3 coin predicts
        let r = frequentist_test_with(30, 100, 0.05, 0.95, 0.3);
        assert!(!r.reject_null);
        assert!(frequentist_test_with(30, 100, 0.05, 0.95, 0.5).reject_null);
    }
}
