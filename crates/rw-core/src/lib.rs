//! RangeWatch anomaly detection engine.
//!
//! Two independent detectors over univariate distance-sensor readings:
//!
//! - [`cluster::ClusterAnomalyDetector`]: standardizes the batch, fits a
//!   seeded 1-D k-means model, and flags points whose distance to their
//!   assigned center exceeds the batch's 95th distance percentile.
//! - [`isolation::IsolationAnomalyDetector`]: a tree-ensemble isolation
//!   model with a contamination-quantile decision offset.
//!
//! Both share the same life cycle: construction loads a persisted model
//! blob best-effort, `detect` trains on first use when no model is loaded
//! (emitting an observable `detector.auto_train` event), and every
//! successful `train` atomically rewrites the blob.

pub mod cluster;
pub mod events;
pub mod isolation;
pub mod kmeans;
pub mod persist;
pub mod scaler;

pub use cluster::{ClusterAnomalyDetector, ClusterConfig};
pub use isolation::{IsolationAnomalyDetector, IsolationConfig};
pub use persist::{ModelEnvelope, PersistError};
pub use scaler::StandardScaler;

/// Label for a normal point.
pub const LABEL_NORMAL: i8 = 1;

/// Label for an anomalous point.
pub const LABEL_ANOMALY: i8 = -1;
