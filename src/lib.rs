//! # dsacrypt
//!
//! FIPS 186-4 Digital Signature Algorithm with provable domain parameters.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! dsacrypt = "0.3"
//! ```
//!
//! ```no_run
//! use dsacrypt::prelude::*;
//! use rand::rngs::OsRng;
//!
//! let mut rng = OsRng;
//! let domain = DomainParameters::generate(2048, 256, HashId::Sha256, &mut rng).unwrap();
//! let (private_key, public_key) =
//!     generate_key_pair(&domain, true, &[KeyUsage::Sign, KeyUsage::Verify], &mut rng).unwrap();
//!
//! let signature = sign(&private_key, b"message", HashId::Sha256, None, &mut rng).unwrap();
//! assert!(verify(&public_key, b"message", HashId::Sha256, &signature).unwrap());
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`dsacrypt-api`]: Library-wide error type and scheme traits
//! - [`dsacrypt-params`]: Parameter sizes, bounds and identifiers
//! - [`dsacrypt-algorithms`]: Hash provider, integer helpers, Shawe-Taylor provable primes
//! - [`dsacrypt-sign`]: DSA domain parameters, keys, signing and verification

pub use dsacrypt_algorithms as algorithms;
pub use dsacrypt_api as api;
pub use dsacrypt_internal as internal;
pub use dsacrypt_params as params;
pub use dsacrypt_sign as sign;

/// Common imports for dsacrypt users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    // Re-export core traits
    pub use crate::api::{Signature, SignatureBytes};

    pub use crate::algorithms::{CancellationToken, HashId, Seed, ShaweTaylor};

    pub use crate::sign::traditional::dsa::{
        generate_key_pair, sign, verify, DomainParameterGenerator, DomainParameters, Dsa,
        DsaJwk, DsaSignature, ExportFormat, ExportedKey, KeyUsage, PrivateKey, Provenance,
        PublicKey,
    };
}
