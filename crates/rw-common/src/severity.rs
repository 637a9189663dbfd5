//! Severity labels and per-anomaly records.
//!
//! Two independent scoring policies produce these labels: the MAD-based
//! score used by the cluster pipeline and the z-score rule used by the
//! isolation pipeline. Both map into the same three-level label so that
//! downstream consumers see one vocabulary.

use serde::{Deserialize, Serialize};

/// Three-level anomaly severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLabel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for SeverityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeverityLabel::Low => write!(f, "low"),
            SeverityLabel::Medium => write!(f, "medium"),
            SeverityLabel::High => write!(f, "high"),
        }
    }
}

/// One detected anomaly within an analyzed batch.
///
/// Built per `detect` call and carried in the response; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyRecord {
    /// Position in the analyzed batch.
    pub index: usize,
    /// The anomalous reading.
    pub value: f64,
    /// Robust severity score in [0, 1].
    pub severity_score: f64,
    /// Label derived from the score.
    pub severity: SeverityLabel,
}
