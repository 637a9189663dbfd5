//! Report sections.

pub mod latest;
pub mod rollup;
pub mod summary;
