//! Benchmarking-server access.
//!
//! - REST client for the server's entity endpoints (`bench`)
//! - loadcase assembly: simulations, targets, comparison groups (`loadcase`)

pub mod bench;
pub mod loadcase;

pub use bench::*;
pub use loadcase::*;
