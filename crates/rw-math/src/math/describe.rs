//! Input cleaning and descriptive statistics.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Descriptive summary of a reading sequence.
///
/// `std` and `variance` are population moments. On empty input every field
/// is zero; callers must check `count` before interpreting the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
    pub range: f64,
}

impl DescriptiveStats {
    /// All-zero record used for empty input.
    pub fn zeroed() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            median: 0.0,
            std: 0.0,
            variance: 0.0,
            min: 0.0,
            max: 0.0,
            q1: 0.0,
            q3: 0.0,
            range: 0.0,
        }
    }
}

/// Coerce a heterogeneous JSON sequence to floats.
///
/// Null, empty strings, and values that fail conversion map to 0.0 rather
/// than being dropped, so the output length always matches the input. This
/// is the caller-facing boundary for input defects; nothing downstream of
/// it sees non-numeric data.
pub fn clean(raw: &[Value]) -> Vec<f64> {
    raw.iter()
        .map(|v| match v {
            Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).unwrap_or(0.0),
            Value::String(s) if !s.is_empty() => {
                s.trim().parse::<f64>().ok().filter(|f| f.is_finite()).unwrap_or(0.0)
            }
            _ => 0.0,
        })
        .collect()
}

/// Compute mean, median, population std/variance, extrema, and quartiles.
pub fn describe(values: &[f64]) -> DescriptiveStats {
    if values.is_empty() {
        return DescriptiveStats::zeroed();
    }

    let mean = mean(values);
    let variance = variance(values, mean);
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    let q1 = percentile_sorted(&sorted, 25.0);
    let q3 = percentile_sorted(&sorted, 75.0);

    DescriptiveStats {
        count: values.len(),
        mean,
        median: median_sorted(&sorted),
        std: variance.sqrt(),
        variance,
        min,
        max,
        q1,
        q3,
        range: max - min,
    }
}

/// Arithmetic mean; 0.0 on empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance around a precomputed mean.
pub fn variance(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation; 0.0 on empty input.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values, mean(values)).sqrt()
}

/// Median of an unsorted slice; 0.0 on empty input.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    median_sorted(&sorted)
}

fn median_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Linear-interpolated percentile over an unsorted slice.
///
/// `p` is in [0, 100]. Returns 0.0 on empty input.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    percentile_sorted(&sorted, p)
}

/// Linear-interpolated percentile over a pre-sorted slice.
pub(crate) fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Pearson correlation between two equal-length sequences.
///
/// `None` when the inputs are shorter than 2 or either side has zero
/// variance (constant series have no defined correlation).
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let mx = mean(x);
    let my = mean(y);
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        cov += (a - mx) * (b - my);
        var_x += (a - mx) * (a - mx);
        var_y += (b - my) * (b - my);
    }
    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return None;
    }
    Some(cov / denom)
}

/// Round to a fixed number of decimal places.
///
/// Report output keeps two decimals; severity scores keep three.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
