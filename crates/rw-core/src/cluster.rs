//! Clustering-based novelty detection.
//!
//! Standardizes the batch, assigns each point to its nearest k-means
//! center, and flags points whose distance to that center exceeds the 95th
//! percentile of the batch's distances. The threshold is recomputed per
//! call from the current batch, so detection sensitivity is batch-relative
//! rather than absolute.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use rw_common::AnomalyRecord;

use crate::events;
use crate::kmeans::KMeans;
use crate::persist;
use crate::scaler::StandardScaler;
use crate::{LABEL_ANOMALY, LABEL_NORMAL};

/// Raw batches with a population std below this are treated as constant:
/// training collapses to a single cluster and detection labels everything
/// normal without distance scoring.
const VARIANCE_EPSILON: f64 = 1e-5;

/// Distance percentile used as the per-batch anomaly threshold.
const DISTANCE_PERCENTILE: f64 = 95.0;

/// Default blob filename under the model directory.
pub const CLUSTER_MODEL_FILE: &str = "cluster_model.json";

/// Cluster detector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Requested cluster count. A degenerate-variance train permanently
    /// downgrades this to 1 (the downgrade is saved with the model).
    pub n_clusters: usize,
    /// Random seed for k-means initialization.
    pub seed: u64,
    /// k-means restarts per fit.
    pub n_init: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            n_clusters: 3,
            seed: 42,
            n_init: 10,
        }
    }
}

/// Persisted state: scaler, fitted model, and effective cluster count.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClusterModelState {
    scaler: StandardScaler,
    model: KMeans,
    n_clusters: usize,
}

/// Stateful clustering detector with file-backed model persistence.
///
/// Two states: untrained and trained. `detect` on an untrained detector
/// trains on the incoming batch first (train-on-first-use); callers that
/// rely on a previously persisted model must construct the detector with
/// the same model path before feeding unrelated data.
pub struct ClusterAnomalyDetector {
    config: ClusterConfig,
    scaler: StandardScaler,
    model: KMeans,
    trained: bool,
    model_path: PathBuf,
}

impl ClusterAnomalyDetector {
    /// Construct with defaults, loading any persisted model best-effort.
    pub fn new(model_dir: &Path) -> Self {
        Self::with_config(ClusterConfig::default(), model_dir)
    }

    /// Construct with an explicit configuration.
    ///
    /// A missing or corrupt blob is logged and the detector starts
    /// untrained; construction never fails.
    pub fn with_config(config: ClusterConfig, model_dir: &Path) -> Self {
        let model_path = model_dir.join(CLUSTER_MODEL_FILE);
        let mut detector = Self {
            scaler: StandardScaler::default(),
            model: KMeans::new(config.n_clusters, config.seed, config.n_init),
            trained: false,
            config,
            model_path,
        };
        detector.load();
        detector
    }

    pub fn is_trained(&self) -> bool {
        self.trained
    }

    /// Effective cluster count (may have been downgraded by training).
    pub fn n_clusters(&self) -> usize {
        self.config.n_clusters
    }

    /// Fit scaler and clustering model on a raw batch, then persist.
    ///
    /// If the raw population std is below epsilon the configured cluster
    /// count is permanently downgraded to 1; a multi-cluster fit over a
    /// constant batch would be meaningless. An empty batch leaves the
    /// detector untrained.
    pub fn train(&mut self, values: &[f64]) {
        if values.is_empty() {
            return;
        }
        if rw_math::std_dev(values) < VARIANCE_EPSILON {
            self.config.n_clusters = 1;
        }
        self.model = KMeans::new(self.config.n_clusters, self.config.seed, self.config.n_init);
        let scaled = self.scaler.fit_transform(values);
        self.model.fit(&scaled);
        // An unfitted model must not count as trained; detect indexes
        // the fitted centers directly.
        self.trained = self.model.is_fitted();

        if self.trained {
            info!(
                event = events::DETECTOR_TRAINED,
                detector = "cluster",
                samples = values.len(),
                clusters = self.config.n_clusters,
            );
            self.save();
        }
    }

    /// Label each point ±1 against the batch-relative distance threshold.
    ///
    /// Untrained detectors train on the batch first; a near-constant batch
    /// is all-normal without distance scoring.
    pub fn detect(&mut self, values: &[f64]) -> Vec<i8> {
        if !self.trained {
            info!(
                event = events::DETECTOR_AUTO_TRAIN,
                detector = "cluster",
                samples = values.len(),
            );
            self.train(values);
        }

        if rw_math::std_dev(values) < VARIANCE_EPSILON {
            return vec![LABEL_NORMAL; values.len()];
        }

        let scaled = self.scaler.transform(values);
        let distances: Vec<f64> = scaled
            .iter()
            .map(|&x| {
                let center = self.model.centers[self.model.predict(x)];
                (x - center).abs()
            })
            .collect();
        let threshold = rw_math::percentile(&distances, DISTANCE_PERCENTILE);

        distances
            .iter()
            .map(|&d| if d > threshold { LABEL_ANOMALY } else { LABEL_NORMAL })
            .collect()
    }

    /// Detect, then grade each flagged point with the MAD severity policy.
    pub fn analyze(&mut self, values: &[f64]) -> Vec<AnomalyRecord> {
        let labels = self.detect(values);
        labels
            .iter()
            .enumerate()
            .filter(|(_, &label)| label == LABEL_ANOMALY)
            .map(|(index, _)| {
                let value = values[index];
                let score = rw_math::severity_score(value, values);
                AnomalyRecord {
                    index,
                    value: rw_math::round_to(value, 2),
                    severity_score: score,
                    severity: rw_math::severity_label(score),
                }
            })
            .collect()
    }

    fn save(&self) {
        let state = ClusterModelState {
            scaler: self.scaler.clone(),
            model: self.model.clone(),
            n_clusters: self.config.n_clusters,
        };
        match persist::save_model(&self.model_path, state) {
            Ok(()) => info!(
                event = events::MODEL_SAVED,
                detector = "cluster",
                path = %self.model_path.display(),
            ),
            Err(err) => warn!(
                event = events::MODEL_SAVE_FAILED,
                detector = "cluster",
                error = %err,
            ),
        }
    }

    fn load(&mut self) {
        if !self.model_path.exists() {
            return;
        }
        match persist::load_model::<ClusterModelState>(&self.model_path) {
            Ok(state) => {
                self.scaler = state.scaler;
                self.model = state.model;
                self.config.n_clusters = state.n_clusters;
                self.trained = true;
                info!(
                    event = events::MODEL_LOADED,
                    detector = "cluster",
                    clusters = state.n_clusters,
                );
            }
            Err(err) => warn!(
                event = events::MODEL_LOAD_FAILED,
                detector = "cluster",
                error = %err,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rw_common::SeverityLabel;
    use tempfile::TempDir;

    fn detector(tmp: &TempDir) -> ClusterAnomalyDetector {
        ClusterAnomalyDetector::new(tmp.path())
    }

    #[test]
    fn constant_batch_is_all_normal_and_single_cluster() {
        let tmp = TempDir::new().unwrap();
        let mut det = detector(&tmp);

        let labels = det.detect(&[5.0; 20]);
        assert_eq!(labels, vec![LABEL_NORMAL; 20]);
        // The configured count is permanently downgraded.
        assert_eq!(det.n_clusters(), 1);

        // The downgrade bypasses distance scoring entirely, so even
        // extreme magnitudes come back normal.
        let labels = det.detect(&[1e9; 10]);
        assert_eq!(labels, vec![LABEL_NORMAL; 10]);
    }

    #[test]
    fn flags_point_far_from_trained_centers() {
        let tmp = TempDir::new().unwrap();
        let mut det = detector(&tmp);

        // Train on well-behaved readings, then detect on a batch carrying
        // one reading far outside the trained structure.
        let training: Vec<f64> = (0..40).map(|i| 10.0 + (i % 5) as f64 * 0.1).collect();
        det.train(&training);

        let mut batch: Vec<f64> = (0..20).map(|i| 10.0 + (i % 5) as f64 * 0.1).collect();
        batch.push(500.0);
        let labels = det.detect(&batch);

        assert_eq!(labels.len(), batch.len());
        assert_eq!(*labels.last().unwrap(), LABEL_ANOMALY);
        // The batch-relative threshold keeps the dense readings normal.
        let anomalies = labels.iter().filter(|&&l| l == LABEL_ANOMALY).count();
        assert_eq!(anomalies, 1);
    }

    #[test]
    fn empty_train_leaves_untrained() {
        let tmp = TempDir::new().unwrap();
        let mut det = detector(&tmp);

        det.train(&[]);
        assert!(!det.is_trained());
        // An empty batch must not downgrade the cluster count either.
        assert_eq!(det.n_clusters(), 3);

        // A later varying batch auto-trains and scores without panicking.
        let labels = det.detect(&[1.0, 5.0, 9.0, 2.0, 8.0, 3.0]);
        assert_eq!(labels.len(), 6);
        assert!(det.is_trained());
    }

    #[test]
    fn detect_is_idempotent_once_trained() {
        let tmp = TempDir::new().unwrap();
        let mut det = detector(&tmp);

        let values: Vec<f64> = (0..40).map(|i| (i % 7) as f64).collect();
        det.train(&values);
        let first = det.detect(&values);
        let second = det.detect(&values);
        assert_eq!(first, second);
    }

    #[test]
    fn analyze_grades_flagged_points() {
        let tmp = TempDir::new().unwrap();
        let mut det = detector(&tmp);

        let training: Vec<f64> = (0..40).map(|i| 10.0 + (i % 3) as f64).collect();
        det.train(&training);

        let mut values: Vec<f64> = (0..20).map(|i| 10.0 + (i % 3) as f64).collect();
        values.push(10_000.0);
        let records = det.analyze(&values);

        assert!(!records.is_empty());
        let extreme = records.iter().find(|r| r.index == values.len() - 1).unwrap();
        assert_eq!(extreme.severity, SeverityLabel::High);
        assert_eq!(extreme.severity_score, 1.0);
    }

    #[test]
    fn persisted_model_survives_reconstruction() {
        let tmp = TempDir::new().unwrap();
        let values: Vec<f64> = (0..40).map(|i| (i % 8) as f64).collect();

        let mut det = detector(&tmp);
        det.train(&values);
        let before = det.detect(&values);

        let mut reloaded = detector(&tmp);
        assert!(reloaded.is_trained());
        assert_eq!(reloaded.detect(&values), before);
    }

    #[test]
    fn corrupt_blob_starts_untrained() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CLUSTER_MODEL_FILE), "garbage").unwrap();
        let det = detector(&tmp);
        assert!(!det.is_trained());
    }

    #[test]
    fn downgraded_cluster_count_is_persisted() {
        let tmp = TempDir::new().unwrap();
        let mut det = detector(&tmp);
        det.train(&[7.0; 25]);
        assert_eq!(det.n_clusters(), 1);

        let reloaded = detector(&tmp);
        assert!(reloaded.is_trained());
        assert_eq!(reloaded.n_clusters(), 1);
    }
}
