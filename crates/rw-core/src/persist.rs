//! Model blob persistence.
//!
//! Each detector persists one opaque JSON blob wrapped in a versioned
//! envelope. Writes are atomic (same-directory temp file + rename) so a
//! crash mid-write leaves the prior blob intact. Loads validate the schema
//! version; any failure is reported to the caller, who treats it as
//! "start untrained" rather than an error.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Schema version written into every envelope.
pub const MODEL_SCHEMA_VERSION: &str = "1";

/// Errors raised by blob persistence.
///
/// These never escape a detector's public API; construction downgrades
/// them to a warn-level log and an untrained start.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error at {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("incompatible model schema version: {found} (expected {expected})")]
    SchemaMismatch { found: String, expected: String },
}

/// Versioned envelope wrapping a persisted model payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEnvelope<T> {
    /// Schema version for compat checks on load.
    pub schema_version: String,
    /// RFC-3339 timestamp of the write.
    pub saved_at: String,
    /// The serialized model state.
    pub payload: T,
}

impl<T: Serialize> ModelEnvelope<T> {
    /// Wrap a payload with the current schema version and timestamp.
    pub fn new(payload: T) -> Self {
        Self {
            schema_version: MODEL_SCHEMA_VERSION.to_string(),
            saved_at: chrono::Utc::now().to_rfc3339(),
            payload,
        }
    }
}

/// Persist an envelope atomically to `path`.
///
/// Parent directories are created as needed. The payload is first written
/// to `<path>.tmp` in the same directory and then renamed over the target,
/// so the prior blob survives a failed write.
pub fn save_model<T: Serialize>(path: &Path, payload: T) -> Result<(), PersistError> {
    let envelope = ModelEnvelope::new(payload);
    let display = path.display().to_string();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| PersistError::Io {
                path: display.clone(),
                source,
            })?;
        }
    }

    let json = serde_json::to_string_pretty(&envelope).map_err(|source| PersistError::Json {
        path: display.clone(),
        source,
    })?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|source| PersistError::Io {
        path: tmp.display().to_string(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| PersistError::Io {
        path: display,
        source,
    })?;
    Ok(())
}

/// Load and validate an envelope from `path`.
pub fn load_model<T: DeserializeOwned>(path: &Path) -> Result<T, PersistError> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| PersistError::Io {
        path: display.clone(),
        source,
    })?;
    let envelope: ModelEnvelope<T> =
        serde_json::from_str(&content).map_err(|source| PersistError::Json {
            path: display,
            source,
        })?;

    if envelope.schema_version != MODEL_SCHEMA_VERSION {
        return Err(PersistError::SchemaMismatch {
            found: envelope.schema_version,
            expected: MODEL_SCHEMA_VERSION.to_string(),
        });
    }
    Ok(envelope.payload)
}
