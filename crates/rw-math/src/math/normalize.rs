//! Value normalization.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::describe::{mean, std_dev};

/// Supported normalization methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizeMethod {
    /// Rescale to [0, 1] by min/max.
    MinMax,
    /// Standardize by mean/std.
    ZScore,
}

/// Errors raised by normalization configuration.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// An unknown method name has no sensible fallback; this is the one
    /// hard, caller-visible error in the statistics engine.
    #[error("unknown normalization method: {0}")]
    UnknownMethod(String),
}

impl FromStr for NormalizeMethod {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minmax" => Ok(NormalizeMethod::MinMax),
            "zscore" => Ok(NormalizeMethod::ZScore),
            other => Err(NormalizeError::UnknownMethod(other.to_string())),
        }
    }
}

impl std::fmt::Display for NormalizeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NormalizeMethod::MinMax => write!(f, "minmax"),
            NormalizeMethod::ZScore => write!(f, "zscore"),
        }
    }
}

/// Normalize a value sequence.
///
/// Degenerate spread (zero range for min-max, zero std for z-score) yields
/// an all-zero vector of the same length rather than dividing by zero.
pub fn normalize(values: &[f64], method: NormalizeMethod) -> Vec<f64> {
    match method {
        NormalizeMethod::MinMax => {
            let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let range = max - min;
            if values.is_empty() || range == 0.0 {
                return vec![0.0; values.len()];
            }
            values.iter().map(|v| (v - min) / range).collect()
        }
        NormalizeMethod::ZScore => {
            let mean = mean(values);
            let std = std_dev(values);
            if std == 0.0 {
                return vec![0.0; values.len()];
            }
            values.iter().map(|v| (v - mean) / std).collect()
        }
    }
}
