//! Input/output helpers.
//!
//! - curve JSON/CSV read/write (`curve`)
//! - report saving + metrics export (`save`)

pub mod curve;
pub mod save;

pub use curve::*;
pub use save::*;
