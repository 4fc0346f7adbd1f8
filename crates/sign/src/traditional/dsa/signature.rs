//! DSA signature generation and verification (FIPS 186-4, Sections 4.6 and 4.7)

use dsacrypt_algorithms::math::mod_inverse;
use dsacrypt_algorithms::HashId;
use dsacrypt_api::{Error as ApiError, Result as ApiResult, SignatureBytes};
use dsacrypt_internal::constant_time::ct_eq;
use dsacrypt_internal::endian::{be_fixed_width, bytes_for_bits};
use dsacrypt_params::traditional::dsa::DSA_MAX_SIGNING_ATTEMPTS;
use num_bigint_dig::BigUint;
use num_traits::Zero;
use rand::{CryptoRng, RngCore};
use tracing::{debug, instrument, warn};
use zeroize::Zeroize;

use super::domain::DomainParameters;
use super::keys::{random_exponent, KeyUsage, PrivateKey, PublicKey};
use crate::error::{Error, Result};

/// DSA signature `(r, s)`
///
/// No range checks happen on construction; [`verify`] rejects out-of-range
/// components by returning `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsaSignature {
    r: BigUint,
    s: BigUint,
}

impl DsaSignature {
    /// Signature from its components
    pub fn new(r: BigUint, s: BigUint) -> Self {
        DsaSignature { r, s }
    }

    /// The `r` component
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// The `s` component
    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// `r || s` with each half left-padded to `width` bytes
    ///
    /// Use `ceil(N/8)` for the width to get the conventional encoding.
    pub fn to_fixed_bytes(&self, width: usize) -> Result<Vec<u8>> {
        let r = be_fixed_width(&self.r.to_bytes_be(), width);
        let s = be_fixed_width(&self.s.to_bytes_be(), width);

        match (r, s) {
            (Some(r), Some(s)) => Ok([r, s].concat()),
            _ => Err(Error::Serialization(format!(
                "signature component does not fit in {} bytes",
                width
            ))),
        }
    }
}

impl SignatureBytes for DsaSignature {
    /// Split an even-length `r || s` encoding in half
    fn from_bytes(bytes: &[u8]) -> ApiResult<Self> {
        if bytes.is_empty() || bytes.len() % 2 != 0 {
            return Err(ApiError::InvalidSignature {
                context: "DSA signature",
                message: format!("encoding of {} bytes is not r || s", bytes.len()),
            });
        }

        let (r, s) = bytes.split_at(bytes.len() / 2);
        Ok(DsaSignature {
            r: BigUint::from_bytes_be(r),
            s: BigUint::from_bytes_be(s),
        })
    }

    /// `r || s`, both halves padded to the wider of the two
    fn to_bytes(&self) -> Vec<u8> {
        let r = self.r.to_bytes_be();
        let s = self.s.to_bytes_be();
        let width = r.len().max(s.len());

        let mut out = vec![0u8; 2 * width];
        out[width - r.len()..width].copy_from_slice(&r);
        out[2 * width - s.len()..].copy_from_slice(&s);
        out
    }
}

/// Leftmost `min(N, outlen)` bits of `Hash(message)` as an integer
fn truncated_digest(domain: &DomainParameters, hash: HashId, message: &[u8]) -> BigUint {
    let hash_len = domain.n().min(hash.output_bits()) / 8;
    let digest = hash.digest(message);
    BigUint::from_bytes_be(&digest[..hash_len])
}

/// Sign `message` with `key`
///
/// When `k` is given it must satisfy `0 < k < q`, and a degenerate result
/// (`r = 0` or `s = 0`) is an error. Otherwise `k` is drawn from `rng` and
/// redrawn on a degenerate result, at most
/// [`DSA_MAX_SIGNING_ATTEMPTS`] times.
#[instrument(level = "debug", skip_all, fields(hash = %hash, caller_k = k.is_some()))]
pub fn sign<R: CryptoRng + RngCore>(
    key: &PrivateKey,
    message: &[u8],
    hash: HashId,
    k: Option<&BigUint>,
    rng: &mut R,
) -> Result<DsaSignature> {
    if !key.usages().contains(&KeyUsage::Sign) {
        return Err(Error::InvalidKeyUsage("key may not be used for signing"));
    }

    let domain = key.domain();
    let z = truncated_digest(domain, hash, message);

    if let Some(k) = k {
        if k.is_zero() || k >= domain.q() {
            return Err(Error::PerMessageSecretOutOfRange);
        }
        return sign_with_k(domain, key.x(), &z, k)?.ok_or(Error::DegenerateSignature);
    }

    for attempt in 1..=DSA_MAX_SIGNING_ATTEMPTS {
        let mut k = random_exponent(domain, rng);
        let signature = sign_with_k(domain, key.x(), &z, &k);
        k.zeroize();

        if let Some(signature) = signature? {
            return Ok(signature);
        }
        warn!(attempt, "degenerate signature, drawing a fresh k");
    }

    Err(Error::SigningRetriesExhausted(DSA_MAX_SIGNING_ATTEMPTS))
}

/// One signing attempt; `None` when `r = 0` or `s = 0`
fn sign_with_k(
    domain: &DomainParameters,
    x: &BigUint,
    z: &BigUint,
    k: &BigUint,
) -> Result<Option<DsaSignature>> {
    let q = domain.q();

    // k^-1 mod q
    let mut k_inv = mod_inverse(k, q)?;

    // r = (g^k mod p) mod q
    let r = domain.g().modpow(k, domain.p()) % q;

    // s = k^-1 (z + x·r) mod q
    let s = (&k_inv * (z + x * &r)) % q;
    k_inv.zeroize();

    if r.is_zero() || s.is_zero() {
        return Ok(None);
    }
    Ok(Some(DsaSignature { r, s }))
}

/// Verify `signature` over `message`
///
/// Returns `Ok(false)` for any signature that does not check out, including
/// components outside `(0, q)`. Errors are reserved for misuse of the key.
#[instrument(level = "debug", skip_all, fields(hash = %hash))]
pub fn verify(
    key: &PublicKey,
    message: &[u8],
    hash: HashId,
    signature: &DsaSignature,
) -> Result<bool> {
    if !key.usages().contains(&KeyUsage::Verify) {
        return Err(Error::InvalidKeyUsage("key may not be used for verification"));
    }

    let domain = key.domain();
    let (p, q, g) = (domain.p(), domain.q(), domain.g());
    let (r, s) = (&signature.r, &signature.s);

    // Step 1: 0 < r < q and 0 < s < q
    if r.is_zero() || s.is_zero() || r >= q || s >= q {
        return Ok(false);
    }

    // Step 2: w = s^-1 mod q, absent when s shares a factor with a composite q
    let z = truncated_digest(domain, hash, message);
    let w = match mod_inverse(s, q) {
        Ok(w) => w,
        Err(err) => {
            debug!(%err, "s has no inverse modulo q");
            return Ok(false);
        }
    };

    // Step 3: u1 = z·w mod q, u2 = r·w mod q
    let u1 = (&z * &w) % q;
    let u2 = (r * &w) % q;

    // Step 4: v = ((g^u1 · y^u2) mod p) mod q
    let v = (g.modpow(&u1, p) * key.y().modpow(&u2, p) % p) % q;

    // Step 5: v == r on fixed-width encodings
    let width = bytes_for_bits(q.bits());
    Ok(
        match (
            be_fixed_width(&v.to_bytes_be(), width),
            be_fixed_width(&r.to_bytes_be(), width),
        ) {
            (Some(v), Some(r)) => ct_eq(v, r),
            _ => false,
        },
    )
}
