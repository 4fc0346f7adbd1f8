//! Digital signature traits for dsacrypt
//!
//! This module defines the traits that signature schemes implement.
//! Discrete-logarithm schemes such as DSA need shared domain parameters before
//! any key can exist, so key generation takes the domain explicitly.

use crate::error::{KeyResult, SignatureResult};
use crate::Result;
use rand::{CryptoRng, RngCore};

/// Core trait for digital signature schemes over explicit domain parameters
///
/// Secret keys are opaque types that cannot be directly manipulated as bytes.
/// Every operation that consumes randomness takes the RNG as a parameter so
/// that callers decide where entropy comes from.
pub trait Signature {
    /// Shared domain parameters (for DSA: `p`, `q`, `g`)
    type Domain;

    /// Public key type for this scheme
    type PublicKey: Clone;

    /// Secret key type
    ///
    /// # Security Note
    ///
    /// This type should not expose its secret value as bytes. Use explicit,
    /// access-controlled export methods if needed.
    type SecretKey: Clone;

    /// Signature data type
    type SignatureData: Clone;

    /// Key pair type (typically a tuple of secret and public keys)
    type KeyPair;

    /// Returns the name of this signature scheme
    fn name() -> &'static str;

    /// Generate a new key pair within `domain` using the provided RNG
    fn keypair<R: CryptoRng + RngCore>(
        domain: &Self::Domain,
        rng: &mut R,
    ) -> KeyResult<Self::KeyPair>;

    /// Extract the public key from a key pair
    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey;

    /// Extract the secret key from a key pair
    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey;

    /// Sign a message with the given secret key
    fn sign<R: CryptoRng + RngCore>(
        message: &[u8],
        secret_key: &Self::SecretKey,
        rng: &mut R,
    ) -> SignatureResult<Self::SignatureData>;

    /// Verify a signature against a message and public key
    ///
    /// Returns `Ok(())` for a valid signature and an `InvalidSignature` error
    /// otherwise.
    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> Result<()>;
}

/// Extension trait for signature types that have a byte representation
pub trait SignatureBytes: Sized {
    /// Create from byte representation
    fn from_bytes(bytes: &[u8]) -> Result<Self>;

    /// Convert to byte representation
    fn to_bytes(&self) -> Vec<u8>;
}
