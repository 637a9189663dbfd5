//! Robust (median/MAD) severity scoring.
//!
//! This is the severity policy used by the cluster-detector pipeline. The
//! isolation pipeline carries its own z-score rule; the two policies are
//! deliberately separate and must not be unified.

use super::describe::{median, round_to};

/// Score divisor: a point 10 MADs from the median saturates at 1.0.
const MAD_SATURATION: f64 = 10.0;

/// Neutral score returned when the MAD is zero.
const NEUTRAL_SCORE: f64 = 0.5;

/// Label thresholds. Hard contract consumed by callers; do not change
/// silently.
pub const HIGH_THRESHOLD: f64 = 0.7;
pub const MEDIUM_THRESHOLD: f64 = 0.4;

pub use rw_common::SeverityLabel;

/// Median absolute deviation around the sample median.
pub fn mad(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let center = median(values);
    let deviations: Vec<f64> = values.iter().map(|v| (v - center).abs()).collect();
    median(&deviations)
}

/// Robust z-like severity score in [0, 1], rounded to 3 decimals.
///
/// `min(|value - median| / mad / 10, 1.0)`. A zero MAD (constant
/// population) gives no scale to judge against, so the score falls back to
/// the neutral 0.5 rather than dividing by zero.
pub fn severity_score(value: f64, population: &[f64]) -> f64 {
    let center = median(population);
    let mad = mad(population);
    if mad == 0.0 {
        return NEUTRAL_SCORE;
    }
    let score = (value - center).abs() / mad / MAD_SATURATION;
    round_to(score.min(1.0), 3)
}

/// Map a severity score to its label.
///
/// `score >= 0.7` is high, `0.4 <= score < 0.7` is medium, else low.
pub fn severity_label(score: f64) -> SeverityLabel {
    if score >= HIGH_THRESHOLD {
        SeverityLabel::High
    } else if score >= MEDIUM_THRESHOLD {
        SeverityLabel::Medium
    } else {
        SeverityLabel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mad_basic() {
        // median 3, deviations [2,1,0,1,2] -> mad 1
        assert_eq!(mad(&[1.0, 2.0, 3.0, 4.0, 5.0]), 1.0);
    }

    #[test]
    fn severity_score_saturates_at_one() {
        let pop = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(severity_score(1000.0, &pop), 1.0);
    }

    #[test]
    fn severity_score_zero_mad_is_neutral() {
        let pop = [5.0; 10];
        assert_eq!(severity_score(100.0, &pop), 0.5);
        assert_eq!(severity_score(5.0, &pop), 0.5);
    }

    #[test]
    fn severity_score_scales_with_deviation() {
        let pop = [1.0, 2.0, 3.0, 4.0, 5.0];
        // |8 - 3| / 1 / 10 = 0.5
        assert_eq!(severity_score(8.0, &pop), 0.5);
        // |3 - 3| = 0
        assert_eq!(severity_score(3.0, &pop), 0.0);
    }

    #[test]
    fn severity_label_thresholds() {
        assert_eq!(severity_label(0.0), SeverityLabel::Low);
        assert_eq!(severity_label(0.39), SeverityLabel::Low);
        assert_eq!(severity_label(0.4), SeverityLabel::Medium);
        assert_eq!(severity_label(0.69), SeverityLabel::Medium);
        assert_eq!(severity_label(0.7), SeverityLabel::High);
        assert_eq!(severity_label(1.0), SeverityLabel::High);
    }

    #[test]
    fn label_monotonic_in_deviation() {
        let pop = [10.0, 11.0, 12.0, 13.0, 14.0];
        let near = severity_label(severity_score(12.5, &pop));
        let far = severity_label(severity_score(60.0, &pop));
        assert!(far >= near);
    }
}
