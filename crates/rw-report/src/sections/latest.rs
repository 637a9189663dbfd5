//! Latest-reading snapshot and feed time span.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rw_math::round_to;

use crate::feed::{FeedRecord, SensorField};

const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// The last feed entry, with both sensors as reported.
///
/// Unlike the statistical sections this does not filter nonpositive
/// values; a sensor that reported 0 shows 0 here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestReadings {
    /// Entry timestamp, `YYYY-MM-DD HH:MM:SS UTC`.
    pub timestamp: String,
    pub front_sensor: f64,
    pub back_sensor: f64,
    /// Minutes elapsed between the entry and the evaluation time.
    pub age_minutes: f64,
}

/// Snapshot the last record in feed order, or `None` for an empty feed.
///
/// Feeds arrive ordered, so the last record is the latest one; using feed
/// order rather than parsed timestamps keeps a mid-feed record with a
/// broken `created_at` (which falls back to `now`) from hijacking the
/// snapshot.
pub fn latest_readings(records: &[FeedRecord], now: DateTime<Utc>) -> Option<LatestReadings> {
    let latest = records.last()?;
    let ts = latest.timestamp(now);
    let age = (now - ts).num_seconds() as f64 / 60.0;
    Some(LatestReadings {
        timestamp: ts.format(DISPLAY_TIMESTAMP_FORMAT).to_string(),
        front_sensor: latest.field_value(SensorField::Front).unwrap_or(0.0),
        back_sensor: latest.field_value(SensorField::Back).unwrap_or(0.0),
        age_minutes: round_to(age, 1),
    })
}

/// Human-readable span between the oldest and newest record.
pub fn time_span(records: &[FeedRecord], now: DateTime<Utc>) -> String {
    if records.len() < 2 {
        return "0 hours".to_string();
    }
    let timestamps: Vec<DateTime<Utc>> = records.iter().map(|r| r.timestamp(now)).collect();
    let oldest = timestamps.iter().min().copied().unwrap_or(now);
    let newest = timestamps.iter().max().copied().unwrap_or(now);
    let minutes = (newest - oldest).num_seconds() as f64 / 60.0;
    if minutes < 60.0 {
        // Whole minutes, truncated.
        format!("{} minutes", minutes as i64)
    } else if minutes < 60.0 * 24.0 {
        format!("{:.1} hours", minutes / 60.0)
    } else {
        format!("{:.1} days", minutes / 60.0 / 24.0)
    }
}
