// ─────────────────────────────────────────────────────────────────────
// PriorLab — Binomial Estimators
// ─────────────────────────────────────────────────────────────────────
//! Frequentist estimators for a heads/tails count: the Wald interval
//! and the exact two-sided binomial test.

use crate::special::{ln_choose, normal_quantile};

/// Outcomes whose probability exceeds the observed one by at most this
/// much still count as "at least as extreme".
const P_VALUE_TOLERANCE: f64 = 1e-10;

/// P(X = k) for X ~ Binomial(n, p).
pub fn binomial_pmf(k: u64, n: u64, p: f64) -> f64 {
    debug_assert!((0.0..=1.0).contains(&p), "binomial_pmf: p={p} outside [0, 1]");
    if k > n {
        return 0.0;
    }
    if p <= 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    if p >= 1.0 {
        return if k == n { 1.0 } else { 0.0 };
    }
    let (k_f, n_f) = (k as f64, n as f64);
    (ln_choose(n, k) + k_f * p.ln() + (n_f - k_f) * (1.0 - p).ln()).exp()
}

/// Normal-approximation confidence interval for a proportion, clipped
/// to [0, 1]. With no trials every proportion is plausible: `(0, 1)`.
pub fn wald_confidence_interval(successes: u64, total: u64, level: f64) -> (f64, f64) {
    if total == 0 {
        return (0.0, 1.0);
    }
    debug_assert!(successes <= total, "successes={successes} > total={total}");
    let n = total as f64;
    let p_hat = successes as f64 / n;
    let z = normal_quantile(1.0 - (1.0 - level) / 2.0);
    let se = (p_hat * (1.0 - p_hat) / n).sqrt();
    ((p_hat - z * se).max(0.0), (p_hat + z * se).min(1.0))
}

/// Exact two-sided binomial test of H₀: p = p0.
///
/// Sums the mass of every outcome no more probable than the observed
/// count, so both tails are covered even when p0 ≠ 0.5. Returns 1 when
/// there are no trials.
pub fn binomial_test_p_value(successes: u64, total: u64, p0: f64) -> f64 {
    if total == 0 {
        return 1.0;
    }
    debug_assert!(successes <= total, "successes={successes} > total={total}");
    let observed = binomial_pmf(successes, total, p0);
    let p_value: f64 = (0..=total)
        .map(|k| binomial_pmf(k, total, p0))
        .filter(|&prob| prob <= observed + P_VALUE_TOLERANCE)
        .sum();
    p_value.min(1.0)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_pmf_sums_to_one() {
        let total: f64 = (0..=40).map(|k| binomial_pmf(k, 40, 0.3)).sum();
        assert!((total - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_pmf_known_value() {
        // C(4,2) 0.5^4 = 0.375
        assert!((binomial_pmf(2, 4, 0.5) - 0.375).abs() < 1e-12);
        assert_eq!(binomial_pmf(5, 4, 0.5), 0.0);
    }

    #[test]
    fn test_pmf_degenerate_p() {
        assert_eq!(binomial_pmf(0, 10, 0.0), 1.0);
        assert_eq!(binomial_pmf(3, 10, 0.0), 0.0);
        assert_eq!(binomial_pmf(10, 10, 1.0), 1.0);
    }

    #[test]
    fn test_wald_no_data() {
        assert_eq!(wald_confidence_interval(0, 0, 0.95), (0.0, 1.0));
    }

    #[test]
    fn test_wald_known_interval() {
        // p̂ = 0.5, n = 100 → 0.5 ± 1.96 · 0.05
        let (lo, hi) = wald_confidence_interval(50, 100, 0.95);
        assert!((lo - (0.5 - 1.959_964 * 0.05)).abs() < 1e-6);
        assert!((hi - (0.5 + 1.959_964 * 0.05)).abs() < 1e-6);
    }

    #[test]
    fn test_wald_all_heads_collapses() {
        // p̂ = 1 has zero standard error
        assert_eq!(wald_confidence_interval(10, 10, 0.95), (1.0, 1.0));
    }

    #[test]
    fn test_p_value_no_data() {
        assert_eq!(binomial_test_p_value(0, 0, 0.5), 1.0);
    }

    #[test]
    fn test_p_value_balanced_is_one() {
        for &n in &[2u64, 10, 50, 200] {
            let p = binomial_test_p_value(n / 2, n, 0.5);
            assert!((p - 1.0).abs() < 1e-9, "n={n} p={p}");
        }
    }

    #[test]
    fn test_p_value_known() {
        // 9 heads of 10: P = 2 · (10 + 1) / 1024
        let p = binomial_test_p_value(9, 10, 0.5);
        assert!((p - 22.0 / 1024.0).abs() < 1e-12);
    }

    #[test]
    fn test_p_value_asymmetric_null() {
        let p = binomial_test_p_value(3, 10, 0.3);
        assert!((p - 1.0).abs() < 1e-9, "observed count is the mode: p={p}");
        assert!(binomial_test_p_value(10, 10, 0.3) < 0.001);
    }

    #[test]
    fn test_p_value_monotone_in_deviation() {
        let n = 60;
        let mut prev = f64::INFINITY;
        for heads in (n / 2)..=n {
            let p = binomial_test_p_value(heads, n, 0.5);
            assert!(p <= prev + 1e-12, "heads={heads} p={p} prev={prev}");
            prev = p;
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn prop_wald_contains_estimate(total in 1u64..500, frac in 0.0f64..=1.0) {
            let heads = ((total as f64) * frac).round() as u64;
            let (lo, hi) = wald_confidence_interval(heads, total, 0.95);
            let p_hat = heads as f64 / total as f64;
            prop_assert!(0.0 <= lo && lo <= p_hat && p_hat <= hi && hi <= 1.0);
        }

        #[test]
        fn prop_p_value_in_unit_interval(total in 0u64..300, frac in 0.0f64..=1.0) {
            let heads = ((total as f64) * frac).round() as u64;
            let p = binomial_test_p_value(heads, total, 0.5);
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }
}
