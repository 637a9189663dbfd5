//! Hourly and daily rollups.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rw_math::{mean, round_to, std_dev};

use crate::feed::{FeedRecord, SensorField};

const HOUR_KEY_FORMAT: &str = "%Y-%m-%d %H:00";
const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Aggregate readings for one clock hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyBucket {
    /// Bucket key, `YYYY-MM-DD HH:00`.
    pub hour: String,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Aggregate readings for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBucket {
    /// Bucket key, `YYYY-MM-DD`.
    pub day: String,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub std: f64,
    pub count: usize,
}

fn group_by_key(
    records: &[FeedRecord],
    field: SensorField,
    format: &str,
    now: DateTime<Utc>,
) -> BTreeMap<String, Vec<f64>> {
    let mut buckets: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for record in records {
        let Some(value) = record.field_value(field).filter(|&v| v > 0.0) else {
            continue;
        };
        let key = record.timestamp(now).format(format).to_string();
        buckets.entry(key).or_default().push(value);
    }
    buckets
}

/// Roll readings up per hour, in chronological order.
pub fn hourly_stats(
    records: &[FeedRecord],
    field: SensorField,
    now: DateTime<Utc>,
) -> Vec<HourlyBucket> {
    group_by_key(records, field, HOUR_KEY_FORMAT, now)
        .into_iter()
        .map(|(hour, values)| HourlyBucket {
            hour,
            avg: round_to(mean(&values), 2),
            min: round_to(values.iter().copied().fold(f64::INFINITY, f64::min), 2),
            max: round_to(values.iter().copied().fold(f64::NEG_INFINITY, f64::max), 2),
            count: values.len(),
        })
        .collect()
}

/// Roll readings up per day, in chronological order.
pub fn daily_stats(
    records: &[FeedRecord],
    field: SensorField,
    now: DateTime<Utc>,
) -> Vec<DailyBucket> {
    group_by_key(records, field, DAY_KEY_FORMAT, now)
        .into_iter()
        .map(|(day, values)| DailyBucket {
            day,
            avg: round_to(mean(&values), 2),
            min: round_to(values.iter().copied().fold(f64::INFINITY, f64::min), 2),
            max: round_to(values.iter().copied().fold(f64::NEG_INFINITY, f64::max), 2),
            std: round_to(std_dev(&values), 2),
            count: values.len(),
        })
        .collect()
}
