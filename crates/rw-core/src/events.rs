//! Structured event names for logging.
//!
//! Events follow a consistent `subject.verb` naming scheme for
//! machine-parseable output. Tests assert on these names to verify which
//! control-flow path executed (notably the implicit train-on-first-use
//! branch).

/// Detector was asked to detect while untrained and trained itself on the
/// incoming batch first.
pub const DETECTOR_AUTO_TRAIN: &str = "detector.auto_train";

/// Detector finished training and transitioned to the trained state.
pub const DETECTOR_TRAINED: &str = "detector.trained";

/// Detector was explicitly reset to the untrained state.
pub const DETECTOR_RESET: &str = "detector.reset";

/// A persisted model blob was loaded at construction.
pub const MODEL_LOADED: &str = "model.loaded";

/// Loading the persisted blob failed; the detector starts untrained.
pub const MODEL_LOAD_FAILED: &str = "model.load_failed";

/// The model blob was rewritten after a successful train.
pub const MODEL_SAVED: &str = "model.saved";

/// Writing the model blob failed; the in-memory model stays usable.
pub const MODEL_SAVE_FAILED: &str = "model.save_failed";
