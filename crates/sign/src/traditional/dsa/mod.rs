//! Digital Signature Algorithm (FIPS 186-4)
//!
//! Domain parameters are generated with the Shawe-Taylor provable prime
//! construction and the verifiable canonical generator, or supplied by the
//! caller and validated. Keys share their domain through an `Arc`.
//!
//! ```no_run
//! use dsacrypt_algorithms::HashId;
//! use dsacrypt_sign::traditional::dsa::{
//!     generate_key_pair, sign, verify, DomainParameters, KeyUsage,
//! };
//!
//! let mut rng = rand::rngs::OsRng;
//! let domain = DomainParameters::generate(2048, 256, HashId::Sha256, &mut rng).unwrap();
//! let (private_key, public_key) =
//!     generate_key_pair(&domain, false, &[KeyUsage::Sign, KeyUsage::Verify], &mut rng).unwrap();
//!
//! let signature = sign(&private_key, b"message", HashId::Sha256, None, &mut rng).unwrap();
//! assert!(verify(&public_key, b"message", HashId::Sha256, &signature).unwrap());
//! ```

mod domain;
mod export;
mod keys;
mod signature;

pub use domain::{DomainParameterGenerator, DomainParameters, Provenance};
pub use export::{DsaJwk, ExportFormat, ExportedKey};
pub use keys::{generate_key_pair, KeyUsage, PrivateKey, PublicKey};
pub use signature::{sign, verify, DsaSignature};

use std::sync::Arc;

use dsacrypt_api::error::{Error as ApiError, KeyResult, SignatureResult};
use dsacrypt_api::{Result as ApiResult, Signature as SignatureTrait};
use rand::{CryptoRng, RngCore};

/// DSA as a [`dsacrypt_api::Signature`] scheme
///
/// Signs and verifies with the hash recorded in the key's domain parameters.
pub struct Dsa;

impl SignatureTrait for Dsa {
    type Domain = Arc<DomainParameters>;
    type PublicKey = PublicKey;
    type SecretKey = PrivateKey;
    type SignatureData = DsaSignature;
    type KeyPair = (PublicKey, PrivateKey);

    fn name() -> &'static str {
        "DSA"
    }

    fn keypair<R: CryptoRng + RngCore>(
        domain: &Self::Domain,
        rng: &mut R,
    ) -> KeyResult<Self::KeyPair> {
        let (private_key, public_key) =
            generate_key_pair(domain, true, &[KeyUsage::Sign, KeyUsage::Verify], rng)?;
        Ok((public_key, private_key))
    }

    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey {
        keypair.0.clone()
    }

    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey {
        keypair.1.clone()
    }

    fn sign<R: CryptoRng + RngCore>(
        message: &[u8],
        secret_key: &Self::SecretKey,
        rng: &mut R,
    ) -> SignatureResult<Self::SignatureData> {
        let hash = secret_key.domain().hash();
        Ok(sign(secret_key, message, hash, None, rng)?)
    }

    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> ApiResult<()> {
        let hash = public_key.domain().hash();
        if verify(public_key, message, hash, signature)? {
            Ok(())
        } else {
            Err(ApiError::InvalidSignature {
                context: "DSA verify",
                message: "signature does not match".to_string(),
            })
        }
    }
}
