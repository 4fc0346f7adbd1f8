//! Digital Signature Schemes
//!
//! This crate implements the FIPS 186-4 Digital Signature Algorithm over
//! Shawe-Taylor provable domain parameters.

pub mod error;
pub mod traditional;

pub use error::{Error, Result};

// Re-exports from traditional schemes
pub use traditional::dsa::Dsa;
