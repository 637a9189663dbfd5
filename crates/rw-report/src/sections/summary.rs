//! Per-sensor statistics and cross-sensor comparison.

use serde::{Deserialize, Serialize};

use rw_math::{describe, mean, pearson, round_to, TrendResult};

/// Statistical summary of one sensor, rounded to 2 decimals for output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorStatistics {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std: f64,
    pub variance: f64,
    pub range: f64,
    pub q1: f64,
    pub q3: f64,
}

/// One sensor's statistics plus its trend.
///
/// Both parts flatten into a single JSON object, so consumers see
/// `trend` and `change_percent` beside the statistics fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSummary {
    #[serde(flatten)]
    pub stats: SensorStatistics,
    #[serde(flatten)]
    pub trend: TrendResult,
}

/// Comparative metrics between the two sensors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossAnalysis {
    /// Absolute difference of the two mean readings.
    pub avg_difference: f64,
    /// Pearson correlation over the overlapping prefix; 0 when undefined.
    pub correlation: f64,
    /// `min(len) / max(len)` as a percentage string, e.g. `"100.0%"`.
    pub data_completeness: String,
    /// Front mean over back mean; 0 when the back mean is 0.
    pub front_back_ratio: f64,
    pub readings_front: usize,
    pub readings_back: usize,
}

/// Compute the per-sensor statistical summary.
///
/// Zeroed on empty input; consumers check `count`.
pub fn sensor_statistics(values: &[f64]) -> SensorStatistics {
    let stats = describe(values);
    SensorStatistics {
        count: stats.count,
        mean: round_to(stats.mean, 2),
        median: round_to(stats.median, 2),
        min: round_to(stats.min, 2),
        max: round_to(stats.max, 2),
        std: round_to(stats.std, 2),
        variance: round_to(stats.variance, 2),
        range: round_to(stats.range, 2),
        q1: round_to(stats.q1, 2),
        q3: round_to(stats.q3, 2),
    }
}

/// Compare front and back sensor series.
///
/// Correlation is taken over the common prefix (the series can differ in
/// length when one sensor dropped readings) and forced to 0 when the
/// computation is undefined, e.g. for constant series.
pub fn cross_analysis(front: &[f64], back: &[f64]) -> CrossAnalysis {
    if front.is_empty() || back.is_empty() {
        return CrossAnalysis {
            avg_difference: 0.0,
            correlation: 0.0,
            data_completeness: "0%".to_string(),
            front_back_ratio: 0.0,
            readings_front: front.len(),
            readings_back: back.len(),
        };
    }

    let front_mean = mean(front);
    let back_mean = mean(back);

    let overlap = front.len().min(back.len());
    let correlation = pearson(&front[..overlap], &back[..overlap])
        .filter(|c| c.is_finite())
        .unwrap_or(0.0);

    let total = front.len().max(back.len());
    let completeness = overlap as f64 / total as f64 * 100.0;

    let ratio = if back_mean != 0.0 {
        round_to(front_mean / back_mean, 2)
    } else {
        0.0
    };

    CrossAnalysis {
        avg_difference: round_to((front_mean - back_mean).abs(), 2),
        correlation: round_to(correlation, 3),
        data_completeness: format!("{completeness:.1}%"),
        front_back_ratio: ratio,
        readings_front: front.len(),
        readings_back: back.len(),
    }
}
