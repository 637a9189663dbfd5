//! Isolation detector life cycle and severity policy.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use rw_common::SeverityLabel;

use crate::events;
use crate::isolation::forest::IsolationForest;
use crate::persist;

/// Default blob filename under the model directory.
pub const ISOLATION_MODEL_FILE: &str = "isolation_model.json";

/// Isolation detector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsolationConfig {
    /// Expected proportion of outliers.
    pub contamination: f64,
    /// Ensemble size.
    pub n_estimators: usize,
    /// Subsample size per tree.
    pub max_samples: usize,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for IsolationConfig {
    fn default() -> Self {
        Self {
            contamination: 0.1,
            n_estimators: 100,
            max_samples: 256,
            seed: 42,
        }
    }
}

/// Stateful isolation-forest detector with file-backed model persistence.
///
/// Same two-state life cycle as the cluster detector: untrained detectors
/// train on the first batch they are asked to score, and every successful
/// train rewrites the persisted blob. `reset` only discards the in-memory
/// model; the blob on disk stays until the next train overwrites it.
pub struct IsolationAnomalyDetector {
    config: IsolationConfig,
    model: IsolationForest,
    trained: bool,
    model_path: PathBuf,
}

impl IsolationAnomalyDetector {
    /// Construct with defaults, loading any persisted model best-effort.
    pub fn new(model_dir: &Path) -> Self {
        Self::with_config(IsolationConfig::default(), model_dir)
    }

    /// Construct with an explicit configuration; never fails.
    pub fn with_config(config: IsolationConfig, model_dir: &Path) -> Self {
        let model_path = model_dir.join(ISOLATION_MODEL_FILE);
        let mut detector = Self {
            model: IsolationForest::new(
                config.n_estimators,
                config.max_samples,
                config.contamination,
                config.seed,
            ),
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

    /// Fit the forest on an n-sample x m-feature matrix, then persist.
    pub fn train_matrix(&mut self, rows: &[Vec<f64>]) {
        self.model = IsolationForest::new(
            self.config.n_estimators,
            self.config.max_samples,
            self.config.contamination,
            self.config.seed,
        );
        self.model.fit(rows);
        self.trained = self.model.is_fitted();

        if self.trained {
            info!(
                event = events::DETECTOR_TRAINED,
                detector = "isolation",
                samples = rows.len(),
                estimators = self.config.n_estimators,
            );
            self.save();
        }
    }

    /// Fit on 1-D readings reshaped to single-feature samples.
    pub fn train(&mut self, values: &[f64]) {
        self.train_matrix(&reshape(values));
    }

    /// ±1 labels from the fitted model; trains on the batch when untrained.
    pub fn detect_matrix(&mut self, rows: &[Vec<f64>]) -> Vec<i8> {
        self.ensure_trained(rows);
        self.model.predict(rows)
    }

    /// 1-D convenience wrapper for [`Self::detect_matrix`].
    pub fn detect(&mut self, values: &[f64]) -> Vec<i8> {
        self.detect_matrix(&reshape(values))
    }

    /// Continuous per-point scores (lower = more anomalous); trains on the
    /// batch when untrained.
    pub fn anomaly_score_matrix(&mut self, rows: &[Vec<f64>]) -> Vec<f64> {
        self.ensure_trained(rows);
        self.model.score_samples(rows)
    }

    /// 1-D convenience wrapper for [`Self::anomaly_score_matrix`].
    pub fn anomaly_score(&mut self, values: &[f64]) -> Vec<f64> {
        self.anomaly_score_matrix(&reshape(values))
    }

    /// z-score severity rule for the isolation pipeline.
    ///
    /// More than 3 standard deviations from the population mean is high,
    /// more than 2 is medium, else low. A zero-std population gives no
    /// scale to judge against and reports medium. This policy is distinct
    /// from the MAD-based rule used by the cluster pipeline; the two are
    /// alternative strategies and are kept separate on purpose.
    pub fn severity(value: f64, population: &[f64]) -> SeverityLabel {
        let mean = rw_math::mean(population);
        let std = rw_math::std_dev(population);
        if std == 0.0 {
            return SeverityLabel::Medium;
        }
        let z = ((value - mean) / std).abs();
        if z > 3.0 {
            SeverityLabel::High
        } else if z > 2.0 {
            SeverityLabel::Medium
        } else {
            SeverityLabel::Low
        }
    }

    /// Discard the in-memory model and return to the untrained state.
    ///
    /// The persisted blob is left untouched; the next successful train
    /// overwrites it.
    pub fn reset(&mut self) {
        self.model = IsolationForest::new(
            self.config.n_estimators,
            self.config.max_samples,
            self.config.contamination,
            self.config.seed,
        );
        self.trained = false;
        info!(event = events::DETECTOR_RESET, detector = "isolation");
    }

    fn ensure_trained(&mut self, rows: &[Vec<f64>]) {
        if !self.trained {
            info!(
                event = events::DETECTOR_AUTO_TRAIN,
                detector = "isolation",
                samples = rows.len(),
            );
            self.train_matrix(rows);
        }
    }

    fn save(&self) {
        match persist::save_model(&self.model_path, self.model.clone()) {
            Ok(()) => info!(
                event = events::MODEL_SAVED,
                detector = "isolation",
                path = %self.model_path.display(),
            ),
            Err(err) => warn!(
                event = events::MODEL_SAVE_FAILED,
                detector = "isolation",
                error = %err,
            ),
        }
    }

    fn load(&mut self) {
        if !self.model_path.exists() {
            return;
        }
        match persist::load_model::<IsolationForest>(&self.model_path) {
            Ok(model) => {
                self.trained = model.is_fitted();
                self.model = model;
                info!(event = events::MODEL_LOADED, detector = "isolation");
            }
            Err(err) => warn!(
                event = events::MODEL_LOAD_FAILED,
                detector = "isolation",
                error = %err,
            ),
        }
    }
}

fn reshape(values: &[f64]) -> Vec<Vec<f64>> {
    values.iter().map(|&v| vec![v]).collect()
}
