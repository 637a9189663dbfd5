//! RangeWatch statistics primitives.
//!
//! Pure, stateless numeric functions over sensor-reading sequences. All
//! degenerate inputs (empty slices, zero spread) recover via documented
//! fallback values rather than errors; the only hard error in this crate is
//! an unknown normalization method name.

pub mod math;

pub use math::describe::*;
pub use math::features::*;
pub use math::normalize::*;
pub use math::outliers::*;
pub use math::robust::*;
pub use math::trend::*;
