//! Full-report assembly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rw_math::trend;

use crate::feed::{extract_values, FeedRecord, SensorField};
use crate::sections::latest::{latest_readings, time_span, LatestReadings};
use crate::sections::rollup::{daily_stats, hourly_stats, DailyBucket, HourlyBucket};
use crate::sections::summary::{cross_analysis, sensor_statistics, CrossAnalysis, SensorSummary};

const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Per-sensor summaries plus the cross-sensor comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub front_sensor: SensorSummary,
    pub back_sensor: SensorSummary,
    pub cross_analysis: CrossAnalysis,
}

/// Hourly rollups for both sensors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySection {
    pub front_sensor: Vec<HourlyBucket>,
    pub back_sensor: Vec<HourlyBucket>,
}

/// Daily rollups for both sensors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySection {
    pub front_sensor: Vec<DailyBucket>,
    pub back_sensor: Vec<DailyBucket>,
}

/// Report provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub entries_analyzed: usize,
    pub time_span: String,
    /// Generation time, `YYYY-MM-DD HH:MM:SS UTC`.
    pub generated_at: String,
}

/// Complete dual-sensor report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub summary: ReportSummary,
    pub hourly: HourlySection,
    pub daily: DailySection,
    /// Absent for an empty feed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_readings: Option<LatestReadings>,
    pub metadata: ReportMetadata,
}

fn sensor_summary(values: &[f64]) -> SensorSummary {
    SensorSummary {
        stats: sensor_statistics(values),
        trend: trend(values),
    }
}

/// Build the full report from raw feed records.
///
/// `now` anchors age and time-span calculations and serves as the
/// fallback timestamp for unparsable records, keeping the whole report a
/// pure function of its inputs.
pub fn generate_full_report(records: &[FeedRecord], now: DateTime<Utc>) -> Report {
    let front = extract_values(records, SensorField::Front);
    let back = extract_values(records, SensorField::Back);

    let report = Report {
        summary: ReportSummary {
            front_sensor: sensor_summary(&front),
            back_sensor: sensor_summary(&back),
            cross_analysis: cross_analysis(&front, &back),
        },
        hourly: HourlySection {
            front_sensor: hourly_stats(records, SensorField::Front, now),
            back_sensor: hourly_stats(records, SensorField::Back, now),
        },
        daily: DailySection {
            front_sensor: daily_stats(records, SensorField::Front, now),
            back_sensor: daily_stats(records, SensorField::Back, now),
        },
        latest_readings: latest_readings(records, now),
        metadata: ReportMetadata {
            entries_analyzed: records.len(),
            time_span: time_span(records, now),
            generated_at: now.format(DISPLAY_TIMESTAMP_FORMAT).to_string(),
        },
    };

    tracing::info!(
        event = "report.generated",
        entries = records.len(),
        front_readings = front.len(),
        back_readings = back.len(),
        "report generated"
    );

    report
}
