//! Isolation-based anomaly detection.
//!
//! An independent alternative to the cluster detector with the same
//! train/detect/persist contract. Anomalies take fewer random splits to
//! isolate, so short average path lengths through a forest of random trees
//! mark anomalous points.

pub mod detector;
pub mod forest;

pub use detector::{IsolationAnomalyDetector, IsolationConfig};
pub use forest::IsolationForest;
