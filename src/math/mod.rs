//! Curve comparison core: common-grid resampling and deviation metrics.

pub mod compare;
pub mod errors;
pub mod resample;

pub use compare::*;
pub use errors::*;
pub use resample::*;
