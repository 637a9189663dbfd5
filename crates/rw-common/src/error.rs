//! Error types for RangeWatch.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints for automation
//!
//! Most degenerate conditions in the engine (zero variance, empty input,
//! missing model blobs) are recovered locally with documented fallback
//! values and never reach this type. Only contract violations surface here:
//! invalid configuration and undersized batches rejected by the calling
//! layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for RangeWatch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Invalid configuration (unknown method names, bad parameters).
    Config,
    /// Caller-side input contract violations (undersized batches).
    Input,
    /// Detector training or scoring errors.
    Model,
    /// Model blob persistence errors.
    Persistence,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Model => write!(f, "model"),
            ErrorCategory::Persistence => write!(f, "persistence"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for RangeWatch.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid normalization method: {0}")]
    InvalidMethod(String),

    // Input contract errors (20-29)
    #[error("not enough samples: {n} (min {min})")]
    InsufficientSamples { n: usize, min: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Model errors (30-39)
    #[error("model error: {0}")]
    Model(String),

    // Persistence errors (40-49)
    #[error("model persistence failed: {0}")]
    Persistence(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the stable error code for this error type.
    ///
    /// Error codes are grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Input contract errors
    /// - 30-39: Model errors
    /// - 40-49: Persistence errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidMethod(_) => 11,
            Error::InsufficientSamples { .. } => 20,
            Error::InvalidInput(_) => 21,
            Error::Model(_) => 30,
            Error::Persistence(_) => 40,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidMethod(_) => ErrorCategory::Config,
            Error::InsufficientSamples { .. } | Error::InvalidInput(_) => ErrorCategory::Input,
            Error::Model(_) => ErrorCategory::Model,
            Error::Persistence(_) => ErrorCategory::Persistence,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether this error is potentially recoverable.
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Config errors: recoverable by fixing the configuration
            Error::Config(_) | Error::InvalidMethod(_) => true,

            // Input: recoverable by supplying a larger/valid batch
            Error::InsufficientSamples { .. } | Error::InvalidInput(_) => true,

            // Model errors may clear up with different inputs
            Error::Model(_) => true,

            // Persistence: the detector keeps working untrained
            Error::Persistence(_) => true,

            // I/O: often transient
            Error::Io(_) => true,
            Error::Json(_) => false,
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,
    /// Error category for grouping.
    pub category: ErrorCategory,
    /// Human-readable error message.
    pub message: String,
    /// Whether the error is potentially recoverable.
    pub recoverable: bool,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
        }
    }
}

impl StructuredError {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}
