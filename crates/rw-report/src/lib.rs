//! Dual-sensor report aggregation.
//!
//! Consumes timestamped feed records carrying two distance-sensor fields
//! and produces per-sensor statistics, hourly/daily rollups, trend
//! classification, and cross-sensor comparison. Everything is computed
//! fresh per call from the record list; the only nondeterminism is the
//! caller-supplied evaluation time.
//!
//! # Example
//!
//! ```
//! use rw_report::{generate_full_report, FeedRecord};
//!
//! let records: Vec<FeedRecord> = serde_json::from_str(
//!     r#"[{"field1":"12.5","field2":"11.9","created_at":"2026-03-01T10:00:00Z"}]"#,
//! ).unwrap();
//! let report = generate_full_report(&records, chrono::Utc::now());
//! assert_eq!(report.metadata.entries_analyzed, 1);
//! ```

pub mod feed;
pub mod generator;
pub mod sections;

pub use feed::{extract_values, parse_timestamp, FeedRecord, SensorField};
pub use generator::{generate_full_report, Report, ReportMetadata, ReportSummary};
pub use sections::latest::{latest_readings, time_span, LatestReadings};
pub use sections::rollup::{daily_stats, hourly_stats, DailyBucket, HourlyBucket};
pub use sections::summary::{
    cross_analysis, sensor_statistics, CrossAnalysis, SensorStatistics, SensorSummary,
};
