//! End-to-end report generation over a realistic mixed-quality feed.

use chrono::{DateTime, NaiveDateTime, Utc};
use rw_math::TrendDirection;
use rw_report::{generate_full_report, FeedRecord};

fn at(s: &str) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%SZ")
        .expect("test timestamp")
        .and_utc()
}

fn feed() -> Vec<FeedRecord> {
    // Two days of readings: front drifting upward, back flat, with a
    // handful of malformed entries sprinkled in.
    let mut json_entries = Vec::new();
    for (i, hour) in (8..=18).enumerate() {
        json_entries.push(format!(
            r#"{{"field1":"{:.1}","field2":"30.0","created_at":"2026-03-01T{hour:02}:00:00Z"}}"#,
            20.0 + i as f64 * 0.2,
        ));
    }
    for (i, hour) in (8..=18).enumerate() {
        json_entries.push(format!(
            r#"{{"field1":"{:.1}","field2":"30.2","created_at":"2026-03-02T{hour:02}:00:00Z"}}"#,
            26.0 + i as f64 * 0.3,
        ));
    }
    // Malformed entries: garbage value, zero reading, missing fields,
    // broken timestamp.
    json_entries.push(
        r#"{"field1":"err","field2":"30.1","created_at":"2026-03-02T19:00:00Z"}"#.to_string(),
    );
    json_entries
        .push(r#"{"field1":"0","field2":"0","created_at":"2026-03-02T19:05:00Z"}"#.to_string());
    json_entries.push(r#"{"created_at":"2026-03-02T19:10:00Z"}"#.to_string());
    json_entries.push(r#"{"field1":"25.0","field2":"30.0","created_at":"not-a-date"}"#.to_string());

    let payload = format!("[{}]", json_entries.join(","));
    serde_json::from_str(&payload).expect("feed deserializes")
}

#[test]
fn full_report_over_two_day_feed() {
    let now = at("2026-03-02T20:00:00Z");
    let records = feed();
    let report = generate_full_report(&records, now);

    assert_eq!(report.metadata.entries_analyzed, 26);
    assert_eq!(report.metadata.generated_at, "2026-03-02 20:00:00 UTC");
    // Span runs from 03-01 08:00 to the broken-timestamp record pinned
    // at `now`, 1.5 days later.
    assert_eq!(report.metadata.time_span, "1.5 days");

    // 22 clean hourly readings plus the pinned-timestamp one.
    assert_eq!(report.summary.cross_analysis.readings_front, 23);
    assert_eq!(report.summary.cross_analysis.readings_back, 24);
    assert_eq!(report.summary.front_sensor.stats.count, 23);

    // Front drifts from ~21 to ~28, back stays near 30.
    assert_eq!(
        report.summary.front_sensor.trend.trend,
        TrendDirection::Increasing
    );
    assert_eq!(report.summary.back_sensor.trend.trend, TrendDirection::Stable);
    assert!(report.summary.cross_analysis.front_back_ratio < 1.0);
}

#[test]
fn rollups_follow_the_clock() {
    let now = at("2026-03-02T20:00:00Z");
    let records = feed();
    let report = generate_full_report(&records, now);

    assert_eq!(report.daily.back_sensor.len(), 2);
    assert_eq!(report.daily.back_sensor[0].day, "2026-03-01");
    assert_eq!(report.daily.back_sensor[0].count, 11);
    assert_eq!(report.daily.back_sensor[0].avg, 30.0);
    assert_eq!(report.daily.back_sensor[0].std, 0.0);

    let hours: Vec<&str> = report
        .hourly
        .front_sensor
        .iter()
        .map(|b| b.hour.as_str())
        .collect();
    let mut sorted = hours.clone();
    sorted.sort_unstable();
    assert_eq!(hours, sorted);
    assert!(hours.contains(&"2026-03-02 20:00"));
}

#[test]
fn latest_reading_is_the_last_record() {
    let now = at("2026-03-02T20:00:00Z");
    let records = feed();
    let report = generate_full_report(&records, now);

    // The last feed entry has a broken timestamp, so its display time
    // falls back to `now`, but the field values are its own.
    let latest = report.latest_readings.expect("nonempty feed");
    assert_eq!(latest.timestamp, "2026-03-02 20:00:00 UTC");
    assert_eq!(latest.front_sensor, 25.0);
    assert_eq!(latest.age_minutes, 0.0);
}

#[test]
fn report_json_shape_is_stable() {
    let now = at("2026-03-02T20:00:00Z");
    let report = generate_full_report(&feed(), now);
    let value = serde_json::to_value(&report).expect("serializable report");

    for key in ["summary", "hourly", "daily", "latest_readings", "metadata"] {
        assert!(value.get(key).is_some(), "missing section {key}");
    }
    let front = &value["summary"]["front_sensor"];
    for key in [
        "count", "mean", "median", "min", "max", "std", "variance", "range", "q1", "q3", "trend",
        "change_percent",
    ] {
        assert!(front.get(key).is_some(), "missing summary field {key}");
    }
    assert_eq!(value["summary"]["back_sensor"]["trend"], "stable");
}
