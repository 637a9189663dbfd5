//! Standardizing feature scaler.

use serde::{Deserialize, Serialize};

/// Floor on the learned scale to avoid dividing by zero on constant input.
const MIN_SCALE: f64 = 1e-12;

/// Mean/std standardization over a 1-D feature.
///
/// Fitted statistics are persisted alongside the cluster model so that a
/// reloaded detector scales new batches identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: f64,
    scale: f64,
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self {
            mean: 0.0,
            scale: 1.0,
        }
    }
}

impl StandardScaler {
    /// Learn mean and population std from the batch.
    pub fn fit(&mut self, values: &[f64]) {
        self.mean = rw_math::mean(values);
        self.scale = rw_math::std_dev(values).max(MIN_SCALE);
    }

    /// Standardize a batch with the fitted statistics.
    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|v| (v - self.mean) / self.scale).collect()
    }

    /// Fit on the batch, then transform it.
    pub fn fit_transform(&mut self, values: &[f64]) -> Vec<f64> {
        self.fit(values);
        self.transform(values)
    }
}
