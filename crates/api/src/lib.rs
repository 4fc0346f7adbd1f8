//! Public API traits and types for the dsacrypt library
//!
//! This crate provides the public API surface shared by the dsacrypt crates:
//! the library-wide error type and the signature scheme traits.

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result};

pub use traits::{Signature, SignatureBytes};

// Re-export trait modules for direct access
pub use traits::signature;
