//! RangeWatch shared types and errors.
//!
//! Value objects that cross crate boundaries (severity labels, anomaly
//! records) and the unified error taxonomy live here so that `rw-core` and
//! `rw-report` agree on wire shapes without depending on each other.

pub mod error;
pub mod severity;

pub use error::{Error, ErrorCategory, Result, StructuredError};
pub use severity::{AnomalyRecord, SeverityLabel};
