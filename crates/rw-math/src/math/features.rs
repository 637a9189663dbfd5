//! Shape and rolling-window feature extraction.

use serde::{Deserialize, Serialize};

use super::describe::{mean, std_dev};

/// Time-series feature summary for a reading sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub skewness: f64,
    pub kurtosis: f64,
    /// Std of rolling means; present when the series covers a full window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolling_mean_std: Option<f64>,
    /// Mean of rolling stds; present when the series covers a full window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolling_std_mean: Option<f64>,
}

/// Sample skewness (adjusted Fisher-Pearson).
///
/// Zero for constant input or fewer than 3 samples.
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return 0.0;
    }
    let mean = mean(values);
    let std = std_dev(values);
    if std == 0.0 {
        return 0.0;
    }
    let nf = n as f64;
    let sum_cubed: f64 = values.iter().map(|v| ((v - mean) / std).powi(3)).sum();
    nf / ((nf - 1.0) * (nf - 2.0)) * sum_cubed
}

/// Sample excess kurtosis (bias-corrected).
///
/// Zero for constant input or fewer than 4 samples.
pub fn kurtosis(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 4 {
        return 0.0;
    }
    let mean = mean(values);
    let std = std_dev(values);
    if std == 0.0 {
        return 0.0;
    }
    let nf = n as f64;
    let sum_quartic: f64 = values.iter().map(|v| ((v - mean) / std).powi(4)).sum();
    nf * (nf + 1.0) / ((nf - 1.0) * (nf - 2.0) * (nf - 3.0)) * sum_quartic
        - 3.0 * (nf - 1.0) * (nf - 1.0) / ((nf - 2.0) * (nf - 3.0))
}

/// Extract shape features plus rolling statistics over `window_size`.
pub fn extract_features(values: &[f64], window_size: usize) -> FeatureSummary {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let (min, max) = if values.is_empty() { (0.0, 0.0) } else { (min, max) };

    let (rolling_mean_std, rolling_std_mean) = if window_size > 0 && values.len() >= window_size {
        let rolling_means = rolling(values, window_size, mean);
        let rolling_stds = rolling(values, window_size, std_dev);
        (Some(std_dev(&rolling_means)), Some(mean(&rolling_stds)))
    } else {
        (None, None)
    };

    FeatureSummary {
        mean: mean(values),
        std: std_dev(values),
        min,
        max,
        range: max - min,
        skewness: skewness(values),
        kurtosis: kurtosis(values),
        rolling_mean_std,
        rolling_std_mean,
    }
}

fn rolling(values: &[f64], window_size: usize, f: fn(&[f64]) -> f64) -> Vec<f64> {
    values.windows(window_size).map(f).collect()
}
