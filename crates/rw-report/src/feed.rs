//! Feed records and sensor value extraction.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Timestamp format emitted by the telemetry feed.
const FEED_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One raw feed entry with two sensor fields.
///
/// Field values arrive as strings or numbers depending on the feed;
/// `field_value` normalizes both. Missing fields deserialize as `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field1: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field2: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// The two sensors carried by a feed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorField {
    /// `field1`: the front distance sensor.
    Front,
    /// `field2`: the back distance sensor.
    Back,
}

impl FeedRecord {
    /// Parse the named sensor field as a float, if possible.
    pub fn field_value(&self, field: SensorField) -> Option<f64> {
        let raw = match field {
            SensorField::Front => self.field1.as_ref(),
            SensorField::Back => self.field2.as_ref(),
        }?;
        match raw {
            Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            _ => None,
        }
    }

    /// Parsed `created_at`, falling back to `now` when absent or invalid.
    pub fn timestamp(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        parse_timestamp(self.created_at.as_deref(), now)
    }
}

/// Parse a feed timestamp (`YYYY-MM-DDTHH:MM:SSZ`, UTC).
///
/// Unparsable timestamps fall back to the evaluation time rather than
/// failing the record.
pub fn parse_timestamp(raw: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    raw.and_then(|s| NaiveDateTime::parse_from_str(s, FEED_TIMESTAMP_FORMAT).ok())
        .map(|naive| naive.and_utc())
        .unwrap_or(now)
}

/// Extract valid readings for one sensor.
///
/// Records are skipped (not zero-filled) when the field fails to parse or
/// the value is <= 0; zero and negative distances mean the sensor did not
/// produce a valid measurement.
pub fn extract_values(records: &[FeedRecord], field: SensorField) -> Vec<f64> {
    records
        .iter()
        .filter_map(|r| r.field_value(field))
        .filter(|&v| v > 0.0)
        .collect()
}
