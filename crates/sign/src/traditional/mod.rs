//! Traditional signature schemes
//!
//! This module contains implementations of traditional (pre-quantum) signature
//! schemes. At present that is finite-field DSA.

pub mod dsa;

// Re-export DSA types
pub use dsa::{Dsa, DsaSignature, PrivateKey, PublicKey};
