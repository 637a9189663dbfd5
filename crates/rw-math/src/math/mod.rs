//! Statistical primitive modules.

pub mod describe;
pub mod features;
pub mod normalize;
pub mod outliers;
pub mod robust;
pub mod trend;
