//! Hash provider
//!
//! DSA is parameterised by an approved hash function. [`HashId`] names the
//! SHA-1 and SHA-2 functions FIPS 186-4 allows and computes digests through
//! the RustCrypto `sha1`/`sha2` implementations.

use core::fmt;
use core::str::FromStr;

use dsacrypt_params::utils::hash::{
    SHA1_OUTPUT_SIZE, SHA224_OUTPUT_SIZE, SHA256_OUTPUT_SIZE, SHA384_OUTPUT_SIZE,
    SHA512_OUTPUT_SIZE,
};
use num_bigint_dig::BigUint;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crate::error::{Error, Result};

/// Identifier of an approved hash function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashId {
    /// SHA-1 (160-bit output)
    #[serde(rename = "SHA-1")]
    Sha1,
    /// SHA-224
    #[serde(rename = "SHA-224")]
    Sha224,
    /// SHA-256
    #[serde(rename = "SHA-256")]
    Sha256,
    /// SHA-384
    #[serde(rename = "SHA-384")]
    Sha384,
    /// SHA-512
    #[serde(rename = "SHA-512")]
    Sha512,
}

impl HashId {
    /// Every supported hash, narrowest first
    pub const ALL: [HashId; 5] = [
        HashId::Sha1,
        HashId::Sha224,
        HashId::Sha256,
        HashId::Sha384,
        HashId::Sha512,
    ];

    /// Canonical name, e.g. `"SHA-256"`
    pub fn name(&self) -> &'static str {
        match self {
            HashId::Sha1 => "SHA-1",
            HashId::Sha224 => "SHA-224",
            HashId::Sha256 => "SHA-256",
            HashId::Sha384 => "SHA-384",
            HashId::Sha512 => "SHA-512",
        }
    }

    /// Digest size in bytes
    pub fn output_size(&self) -> usize {
        match self {
            HashId::Sha1 => SHA1_OUTPUT_SIZE,
            HashId::Sha224 => SHA224_OUTPUT_SIZE,
            HashId::Sha256 => SHA256_OUTPUT_SIZE,
            HashId::Sha384 => SHA384_OUTPUT_SIZE,
            HashId::Sha512 => SHA512_OUTPUT_SIZE,
        }
    }

    /// Digest size in bits (`outlen` in FIPS 186-4)
    pub fn output_bits(&self) -> usize {
        self.output_size() * 8
    }

    /// Hash `data` in one shot
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            HashId::Sha1 => Sha1::digest(data).to_vec(),
            HashId::Sha224 => Sha224::digest(data).to_vec(),
            HashId::Sha256 => Sha256::digest(data).to_vec(),
            HashId::Sha384 => Sha384::digest(data).to_vec(),
            HashId::Sha512 => Sha512::digest(data).to_vec(),
        }
    }

    /// Hash `data` and read the digest as a big-endian integer
    pub fn digest_int(&self, data: &[u8]) -> BigUint {
        BigUint::from_bytes_be(&self.digest(data))
    }
}

impl fmt::Display for HashId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashId {
    type Err = Error;

    /// Accepts `SHA-256`, `sha256`, `Sha 256` and similar spellings
    fn from_str(s: &str) -> Result<Self> {
        let canon: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_uppercase();

        match canon.as_str() {
            "SHA1" => Ok(HashId::Sha1),
            "SHA224" => Ok(HashId::Sha224),
            "SHA256" => Ok(HashId::Sha256),
            "SHA384" => Ok(HashId::Sha384),
            "SHA512" => Ok(HashId::Sha512),
            _ => Err(Error::param("hash", format!("unsupported hash function '{}'", s))),
        }
    }
}
