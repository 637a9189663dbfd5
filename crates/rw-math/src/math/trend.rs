//! First-half vs second-half trend classification.

use serde::{Deserialize, Serialize};

use super::describe::{mean, round_to};

/// Change below this percentage counts as stable.
const STABLE_BAND_PERCENT: f64 = 5.0;

/// Trend direction of an ordered value sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Stable,
    Increasing,
    Decreasing,
    InsufficientData,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Stable => write!(f, "stable"),
            TrendDirection::Increasing => write!(f, "increasing"),
            TrendDirection::Decreasing => write!(f, "decreasing"),
            TrendDirection::InsufficientData => write!(f, "insufficient_data"),
        }
    }
}

/// Trend classification with the underlying percent change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub trend: TrendDirection,
    pub change_percent: f64,
}

/// Compare the mean of the first half against the second half.
///
/// `change_percent` is relative to the first-half mean and reported as 0
/// when that mean is zero. Fewer than 2 points cannot form halves.
pub fn trend(values: &[f64]) -> TrendResult {
    if values.len() < 2 {
        return TrendResult {
            trend: TrendDirection::InsufficientData,
            change_percent: 0.0,
        };
    }

    let mid = values.len() / 2;
    let first = mean(&values[..mid]);
    let second = mean(&values[mid..]);

    let change = if first == 0.0 {
        0.0
    } else {
        (second - first) / first * 100.0
    };

    // Classify on the raw change; rounding is for output only.
    let direction = if change.abs() < STABLE_BAND_PERCENT {
        TrendDirection::Stable
    } else if change > 0.0 {
        TrendDirection::Increasing
    } else {
        TrendDirection::Decreasing
    };

    TrendResult {
        trend: direction,
        change_percent: round_to(change, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubling_is_increasing_100_percent() {
        let result = trend(&[10.0, 10.0, 10.0, 20.0, 20.0, 20.0]);
        assert_eq!(result.trend, TrendDirection::Increasing);
        assert_eq!(result.change_percent, 100.0);
    }

    #[test]
    fn flat_series_is_stable() {
        let result = trend(&[10.0, 10.1, 10.0, 10.1]);
        assert_eq!(result.trend, TrendDirection::Stable);
    }

    #[test]
    fn falling_series_is_decreasing() {
        let result = trend(&[20.0, 20.0, 10.0, 10.0]);
        assert_eq!(result.trend, TrendDirection::Decreasing);
        assert_eq!(result.change_percent, -50.0);
    }

    #[test]
    fn short_series_is_insufficient() {
        let result = trend(&[42.0]);
        assert_eq!(result.trend, TrendDirection::InsufficientData);
        assert_eq!(result.change_percent, 0.0);
    }

    #[test]
    fn zero_first_half_reports_zero_change() {
        let result = trend(&[0.0, 0.0, 5.0, 5.0]);
        assert_eq!(result.change_percent, 0.0);
        assert_eq!(result.trend, TrendDirection::Stable);
    }

    #[test]
    fn change_just_under_band_stays_stable_despite_rounding() {
        // Raw change 4.996% rounds to 5.0 for output but must still
        // classify as stable.
        let result = trend(&[1000.0, 1000.0, 1049.96, 1049.96]);
        assert_eq!(result.trend, TrendDirection::Stable);
        assert_eq!(result.change_percent, 5.0);
    }

    #[test]
    fn odd_length_splits_at_floor_midpoint() {
        // First half [10], second half [10, 40]: change = 150%.
        let result = trend(&[10.0, 10.0, 40.0]);
        assert_eq!(result.trend, TrendDirection::Increasing);
        assert_eq!(result.change_percent, 150.0);
    }
}
