//! DSA key pairs (FIPS 186-4, Appendix B.1.1)

use core::fmt;
use std::sync::Arc;

use dsacrypt_algorithms::math::ceil_div_usize;
use dsacrypt_params::traditional::dsa::DSA_EXTRA_RANDOM_BITS;
use num_bigint_dig::BigUint;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use zeroize::{Zeroize, Zeroizing};

use super::domain::DomainParameters;
use crate::error::{Error, Result};

/// Operation a key may be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyUsage {
    /// Producing signatures (private keys)
    Sign,
    /// Checking signatures (public keys)
    Verify,
}

impl KeyUsage {
    /// Lowercase name, as used in `key_ops`
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyUsage::Sign => "sign",
            KeyUsage::Verify => "verify",
        }
    }
}

/// DSA private key
///
/// The exponent `x` never leaves this module except through an explicit,
/// extractability-checked export. It is wiped when the key is dropped.
#[derive(Clone)]
pub struct PrivateKey {
    domain: Arc<DomainParameters>,
    x: BigUint,
    usages: Vec<KeyUsage>,
    extractable: bool,
}

impl PrivateKey {
    /// Import a private exponent; requires `1 <= x <= q - 1`
    pub fn from_components(
        domain: Arc<DomainParameters>,
        x: BigUint,
        extractable: bool,
    ) -> Result<Self> {
        if x.is_zero() || &x >= domain.q() {
            return Err(Error::InvalidKey("x must satisfy 1 <= x <= q - 1".to_string()));
        }

        Ok(PrivateKey {
            domain,
            x,
            usages: vec![KeyUsage::Sign],
            extractable,
        })
    }

    /// Domain parameters shared with the public key
    pub fn domain(&self) -> &Arc<DomainParameters> {
        &self.domain
    }

    /// Always `[Sign]`
    pub fn usages(&self) -> &[KeyUsage] {
        &self.usages
    }

    /// Whether [`PrivateKey::export`] may reveal `x`
    pub fn is_extractable(&self) -> bool {
        self.extractable
    }

    /// The matching public key, allowed to verify
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            domain: Arc::clone(&self.domain),
            y: self.domain.g().modpow(&self.x, self.domain.p()),
            usages: vec![KeyUsage::Verify],
        }
    }

    pub(crate) fn x(&self) -> &BigUint {
        &self.x
    }
}

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        self.x.zeroize();
    }
}

// Secure cleanup on drop
impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("algorithm", &self.domain.algorithm_name())
            .field("x", &"<redacted>")
            .field("usages", &self.usages)
            .field("extractable", &self.extractable)
            .finish()
    }
}

/// DSA public key `y = g^x mod p`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    domain: Arc<DomainParameters>,
    y: BigUint,
    usages: Vec<KeyUsage>,
}

impl PublicKey {
    /// Import a public value; requires `1 < y < p` and `y^q = 1 (mod p)`
    ///
    /// `usages` may only contain [`KeyUsage::Verify`].
    pub fn from_components(
        domain: Arc<DomainParameters>,
        y: BigUint,
        usages: &[KeyUsage],
    ) -> Result<Self> {
        if usages.contains(&KeyUsage::Sign) {
            return Err(Error::InvalidKeyUsage("public keys cannot sign"));
        }
        if y <= BigUint::one() || &y >= domain.p() {
            return Err(Error::InvalidKey("y must satisfy 1 < y < p".to_string()));
        }
        if y.modpow(domain.q(), domain.p()) != BigUint::one() {
            return Err(Error::InvalidKey("y is not in the order-q subgroup".to_string()));
        }

        let mut usages = usages.to_vec();
        usages.dedup();

        Ok(PublicKey { domain, y, usages })
    }

    /// Domain parameters shared with the private key
    pub fn domain(&self) -> &Arc<DomainParameters> {
        &self.domain
    }

    /// The public value `y`
    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// `[Verify]`, or empty when verification was not requested
    pub fn usages(&self) -> &[KeyUsage] {
        &self.usages
    }

    /// Public keys are always extractable
    pub fn is_extractable(&self) -> bool {
        true
    }
}

/// Generate a key pair within `domain`
///
/// `usages` must contain [`KeyUsage::Sign`]. The private key may only sign; the
/// public key may verify iff [`KeyUsage::Verify`] was requested.
#[instrument(level = "debug", skip(domain, rng), fields(algorithm = domain.algorithm_name()))]
pub fn generate_key_pair<R: CryptoRng + RngCore>(
    domain: &Arc<DomainParameters>,
    extractable: bool,
    usages: &[KeyUsage],
    rng: &mut R,
) -> Result<(PrivateKey, PublicKey)> {
    if !usages.contains(&KeyUsage::Sign) {
        return Err(Error::InvalidKeyUsage("key usages must contain sign"));
    }

    // x = (c mod (q - 1)) + 1
    let private_key = PrivateKey {
        domain: Arc::clone(domain),
        x: random_exponent(domain, rng),
        usages: vec![KeyUsage::Sign],
        extractable,
    };

    // y = g^x mod p
    let mut public_key = private_key.public_key();
    if !usages.contains(&KeyUsage::Verify) {
        public_key.usages.clear();
    }

    debug!("generated key pair");
    Ok((private_key, public_key))
}

/// `(c mod (q - 1)) + 1` for a random `c` of `N + 64` bits (FIPS 186-4 B.1.1, B.2.1)
pub(crate) fn random_exponent<R: CryptoRng + RngCore>(
    domain: &DomainParameters,
    rng: &mut R,
) -> BigUint {
    let mut bytes = Zeroizing::new(vec![
        0u8;
        ceil_div_usize(domain.n() + DSA_EXTRA_RANDOM_BITS, 8)
    ]);
    rng.fill_bytes(&mut bytes);

    let mut c = BigUint::from_bytes_be(&bytes);
    let exponent = &c % (domain.q() - BigUint::one()) + BigUint::one();
    c.zeroize();
    exponent
}
