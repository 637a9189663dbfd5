//! Property-based tests for rw-math statistical functions.
//!
//! Uses proptest to verify statistical invariants hold across many random
//! inputs.

use proptest::prelude::*;
use rw_math::{
    describe, iqr_outliers, normalize, severity_label, severity_score, trend, zscore_outliers,
    NormalizeMethod, TrendDirection,
};

/// Tolerance for floating point comparisons.
const TOL: f64 = 1e-9;

fn values_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1e6..1e6f64, 1..200)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Quartiles are ordered: min <= q1 <= median <= q3 <= max.
    #[test]
    fn quartiles_are_ordered(values in values_strategy()) {
        let stats = describe(&values);
        prop_assert!(stats.min <= stats.q1 + TOL);
        prop_assert!(stats.q1 <= stats.median + TOL);
        prop_assert!(stats.median <= stats.q3 + TOL);
        prop_assert!(stats.q3 <= stats.max + TOL);
    }

    /// Variance equals std squared within floating tolerance.
    #[test]
    fn variance_is_std_squared(values in values_strategy()) {
        let stats = describe(&values);
        let err = (stats.variance - stats.std * stats.std).abs();
        prop_assert!(err <= TOL.max(TOL * stats.variance.abs()),
            "variance {} != std^2 {}", stats.variance, stats.std * stats.std);
    }

    /// Min-max normalization lands in [0, 1] whenever the range is nonzero,
    /// and is all-zero otherwise.
    #[test]
    fn minmax_output_in_unit_interval(values in values_strategy()) {
        let out = normalize(&values, NormalizeMethod::MinMax);
        prop_assert_eq!(out.len(), values.len());
        let stats = describe(&values);
        if stats.range == 0.0 {
            prop_assert!(out.iter().all(|&v| v == 0.0));
        } else {
            prop_assert!(out.iter().all(|&v| (-TOL..=1.0 + TOL).contains(&v)));
        }
    }

    /// Severity labels never decrease as absolute deviation from the
    /// population median grows.
    #[test]
    fn severity_monotonic_in_deviation(
        values in prop::collection::vec(-1e3..1e3f64, 5..50),
        base in 0.0..100.0f64,
        extra in 0.0..100.0f64,
    ) {
        let med = describe(&values).median;
        let near = severity_label(severity_score(med + base, &values));
        let far = severity_label(severity_score(med + base + extra, &values));
        prop_assert!(far >= near, "label regressed: {:?} -> {:?}", near, far);
    }

    /// Constant sequences have zero spread and no outliers.
    #[test]
    fn constant_input_is_degenerate(value in -1e6..1e6f64, len in 2..100usize) {
        let values = vec![value; len];
        let stats = describe(&values);
        prop_assert_eq!(stats.std, 0.0);
        prop_assert_eq!(stats.q3 - stats.q1, 0.0);
        prop_assert!(iqr_outliers(&values, 1.5).is_empty());
        prop_assert!(zscore_outliers(&values, 3.0).is_empty());
    }

    /// Outlier indices always point at values inside the input.
    #[test]
    fn outlier_indices_are_valid(values in values_strategy()) {
        for out in iqr_outliers(&values, 1.5) {
            prop_assert!(out.index < values.len());
            prop_assert_eq!(out.value, values[out.index]);
        }
        for out in zscore_outliers(&values, 3.0) {
            prop_assert!(out.index < values.len());
            prop_assert_eq!(out.value, values[out.index]);
        }
    }

    /// Trend direction agrees with the sign of the reported change.
    #[test]
    fn trend_direction_matches_change_sign(values in prop::collection::vec(0.1..1e4f64, 2..100)) {
        let result = trend(&values);
        match result.trend {
            TrendDirection::Increasing => prop_assert!(result.change_percent >= 5.0),
            TrendDirection::Decreasing => prop_assert!(result.change_percent <= -5.0),
            // Classification happens before rounding, so a stable raw
            // change just under the band may still round to 5.0.
            TrendDirection::Stable => prop_assert!(result.change_percent.abs() <= 5.0),
            TrendDirection::InsufficientData => prop_assert!(values.len() < 2),
        }
    }
}
