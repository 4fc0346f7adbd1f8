//! Number-theoretic building blocks for FIPS 186-4 DSA
//!
//! This crate provides the hash provider used throughout dsacrypt, the small
//! set of integer helpers DSA needs on top of `num-bigint-dig`, and the
//! Shawe-Taylor provable prime construction (FIPS 186-4, Appendix C.6).
//!
//! Everything here is deterministic: the only inputs are seeds, lengths and a
//! hash selection. Randomness is drawn by the callers in `dsacrypt-sign`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Hash provider
pub mod hash;
pub use hash::HashId;

// Integer helpers
pub mod math;

// Provable primes
pub mod prime;
pub use prime::{CancellationToken, ProvablePrime, Seed, ShaweTaylor};
