//! Traits implemented by dsacrypt schemes

pub mod signature;

pub use signature::{Signature, SignatureBytes};
