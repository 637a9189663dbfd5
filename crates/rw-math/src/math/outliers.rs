//! IQR and z-score outlier detection.

use serde::{Deserialize, Serialize};

use super::describe::{mean, percentile, std_dev};

/// Default IQR multiplier.
pub const DEFAULT_IQR_K: f64 = 1.5;

/// Default z-score threshold.
pub const DEFAULT_ZSCORE_THRESHOLD: f64 = 3.0;

/// One flagged value with its position in the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlier {
    pub index: usize,
    pub value: f64,
}

/// Flag values outside `[q1 - k*iqr, q3 + k*iqr]`.
///
/// Order preserving. When the interquartile range is degenerate (zero
/// spread) there is no meaningful fence, so the result is empty.
pub fn iqr_outliers(values: &[f64], k: f64) -> Vec<Outlier> {
    if values.is_empty() {
        return Vec::new();
    }
    let q1 = percentile(values, 25.0);
    let q3 = percentile(values, 75.0);
    let iqr = q3 - q1;
    if iqr == 0.0 {
        return Vec::new();
    }

    let lower = q1 - k * iqr;
    let upper = q3 + k * iqr;

    values
        .iter()
        .enumerate()
        .filter(|(_, &v)| v < lower || v > upper)
        .map(|(index, &value)| Outlier { index, value })
        .collect()
}

/// Flag values with `|v - mean| / std > threshold`.
///
/// Returns empty when std is zero: a constant batch has no outliers, and
/// the guard doubles as the divide-by-zero fallback.
pub fn zscore_outliers(values: &[f64], threshold: f64) -> Vec<Outlier> {
    if values.is_empty() {
        return Vec::new();
    }
    let mean = mean(values);
    let std = std_dev(values);
    if std == 0.0 {
        return Vec::new();
    }

    values
        .iter()
        .enumerate()
        .filter(|(_, &v)| ((v - mean) / std).abs() > threshold)
        .map(|(index, &value)| Outlier { index, value })
        .collect()
}
