//! Internal utilities for the dsacrypt library
//!
//! Not part of the public API; exposed for use by the sibling crates.

pub mod constant_time;
pub mod endian;
