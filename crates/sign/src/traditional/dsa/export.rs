//! Key export and import
//!
//! Only `raw` and `jwk` are implemented. DSA has no registered JWK key type, so
//! the `kty` and `alg` members carry collision-resistant UUIDs and the
//! `key_type`/`algorithm` members spell the scheme out.

use core::fmt;
use core::str::FromStr;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use dsacrypt_algorithms::{HashId, Seed};
use dsacrypt_params::traditional::dsa::{
    DSA_DS160_NAME, DSA_DS256_NAME, DSA_JWK_ALG_DS160, DSA_JWK_ALG_DS256, DSA_JWK_ALG_OTHER,
    DSA_JWK_KTY,
};
use num_bigint_dig::BigUint;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::domain::{DomainParameters, Provenance};
use super::keys::{KeyUsage, PrivateKey, PublicKey};
use crate::error::{Error, Result};

/// Requested export encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Big-endian bytes of `x` or `y`
    Raw,
    /// PKCS#8 (not supported)
    Pkcs8,
    /// SubjectPublicKeyInfo (not supported)
    Spki,
    /// JSON Web Key style record
    Jwk,
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "raw" => Ok(ExportFormat::Raw),
            "pkcs8" => Ok(ExportFormat::Pkcs8),
            "spki" => Ok(ExportFormat::Spki),
            "jwk" => Ok(ExportFormat::Jwk),
            other => Err(Error::UnsupportedExportFormat(other.to_string())),
        }
    }
}

/// Exported key material
pub enum ExportedKey {
    /// Raw big-endian key value, wiped on drop
    Raw(Zeroizing<Vec<u8>>),
    /// Structured record
    Jwk(DsaJwk),
}

impl fmt::Debug for ExportedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportedKey::Raw(bytes) => write!(f, "Raw(<{} bytes>)", bytes.len()),
            ExportedKey::Jwk(jwk) => f.debug_tuple("Jwk").field(&jwk.algorithm).finish(),
        }
    }
}

/// JWK-style record of a DSA key and its domain parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsaJwk {
    pub kty: String,
    pub alg: String,
    #[serde(rename = "use")]
    pub use_: String,
    pub key_ops: Vec<KeyUsage>,
    pub key_type: String,
    pub algorithm: String,
    pub p: String,
    pub q: String,
    pub g: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<HashId>,
    #[serde(rename = "L", default, skip_serializing_if = "Option::is_none")]
    pub l: Option<usize>,
    #[serde(rename = "N", default, skip_serializing_if = "Option::is_none")]
    pub n: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstseed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pgen_seed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qgen_seed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_parameter_seed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qgen_counter: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pgen_counter: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u8>,
}

impl DsaJwk {
    fn new(
        domain: &DomainParameters,
        key_ops: &[KeyUsage],
        x: Option<&BigUint>,
        y: Option<&BigUint>,
    ) -> Self {
        let algorithm = domain.algorithm_name();
        let alg = match algorithm {
            DSA_DS160_NAME => DSA_JWK_ALG_DS160,
            DSA_DS256_NAME => DSA_JWK_ALG_DS256,
            _ => DSA_JWK_ALG_OTHER,
        };
        let other = alg == DSA_JWK_ALG_OTHER;
        let provenance = domain.provenance();

        DsaJwk {
            kty: DSA_JWK_KTY.to_string(),
            alg: alg.to_string(),
            use_: "sig".to_string(),
            key_ops: key_ops.to_vec(),
            key_type: "DSA".to_string(),
            algorithm: algorithm.to_string(),
            p: encode_int(domain.p()),
            q: encode_int(domain.q()),
            g: encode_int(domain.g()),
            x: x.map(encode_int),
            y: y.map(encode_int),
            hash: other.then(|| domain.hash()),
            l: other.then(|| domain.l()),
            n: other.then(|| domain.n()),
            firstseed: provenance.map(|p| encode(p.firstseed.as_bytes())),
            pgen_seed: provenance.map(|p| encode(p.pgen_seed.as_bytes())),
            qgen_seed: provenance.map(|p| encode(p.qgen_seed.as_bytes())),
            domain_parameter_seed: provenance.map(|p| encode(&p.domain_parameter_seed())),
            qgen_counter: provenance.map(|p| p.qgen_counter),
            pgen_counter: provenance.map(|p| p.pgen_counter),
            index: provenance.map(|p| p.index),
        }
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// `(L, N, hash)` from the algorithm name, or from the explicit members for `"other"`
    fn sizes(&self) -> Result<(usize, usize, HashId)> {
        match self.algorithm.as_str() {
            DSA_DS160_NAME => Ok((1024, 160, HashId::Sha1)),
            DSA_DS256_NAME => Ok((2048, 256, HashId::Sha256)),
            _ => match (self.l, self.n, self.hash) {
                (Some(l), Some(n), Some(hash)) => Ok((l, n, hash)),
                _ => Err(Error::InvalidKey(
                    "JWK for other parameter sets needs L, N and hash".to_string(),
                )),
            },
        }
    }

    fn provenance(&self) -> Result<Option<Provenance>> {
        let (Some(firstseed), Some(pgen_seed), Some(qgen_seed)) =
            (&self.firstseed, &self.pgen_seed, &self.qgen_seed)
        else {
            return Ok(None);
        };

        let seed = |s: &str| -> Result<Seed> {
            Seed::new(decode(s)?).map_err(|e| Error::InvalidKey(e.to_string()))
        };

        Ok(Some(Provenance {
            firstseed: seed(firstseed)?,
            pgen_seed: seed(pgen_seed)?,
            qgen_seed: seed(qgen_seed)?,
            pgen_counter: self.pgen_counter.unwrap_or_default(),
            qgen_counter: self.qgen_counter.unwrap_or_default(),
            index: self.index.unwrap_or_default(),
        }))
    }
}

fn encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

fn encode_int(value: &BigUint) -> String {
    encode(&value.to_bytes_be())
}

fn decode(value: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(value)
        .map_err(|e| Error::InvalidKey(format!("bad base64url: {}", e)))
}

fn decode_int(value: &str) -> Result<BigUint> {
    Ok(BigUint::from_bytes_be(&decode(value)?))
}

fn check_format(format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Raw | ExportFormat::Jwk => Ok(()),
        ExportFormat::Pkcs8 => Err(Error::UnsupportedExportFormat("pkcs8".to_string())),
        ExportFormat::Spki => Err(Error::UnsupportedExportFormat("spki".to_string())),
    }
}

impl PrivateKey {
    /// Export `x`; fails with [`Error::KeyNotExtractable`] for non-extractable keys
    pub fn export(&self, format: ExportFormat) -> Result<ExportedKey> {
        if !self.is_extractable() {
            return Err(Error::KeyNotExtractable);
        }
        check_format(format)?;

        Ok(match format {
            ExportFormat::Raw => ExportedKey::Raw(Zeroizing::new(self.x().to_bytes_be())),
            _ => ExportedKey::Jwk(DsaJwk::new(
                self.domain(),
                self.usages(),
                Some(self.x()),
                None,
            )),
        })
    }
}

impl PublicKey {
    /// Export `y`
    pub fn export(&self, format: ExportFormat) -> Result<ExportedKey> {
        check_format(format)?;

        Ok(match format {
            ExportFormat::Raw => ExportedKey::Raw(Zeroizing::new(self.y().to_bytes_be())),
            _ => ExportedKey::Jwk(DsaJwk::new(
                self.domain(),
                self.usages(),
                None,
                Some(self.y()),
            )),
        })
    }

    /// Import a public key from a JWK record
    ///
    /// The domain parameters go through [`DomainParameters::validate`]. A
    /// generation record in the JWK is kept so that it can be audited with
    /// [`DomainParameters::verify_provenance`].
    pub fn from_jwk(jwk: &DsaJwk) -> Result<PublicKey> {
        if jwk.kty != DSA_JWK_KTY {
            return Err(Error::InvalidKey(format!("unexpected kty '{}'", jwk.kty)));
        }
        let y = jwk
            .y
            .as_deref()
            .ok_or_else(|| Error::InvalidKey("JWK has no public value y".to_string()))?;

        let (l, n, hash) = jwk.sizes()?;
        let mut domain = DomainParameters::validate(
            decode_int(&jwk.p)?,
            decode_int(&jwk.q)?,
            decode_int(&jwk.g)?,
            l,
            n,
            hash,
        )?;
        if let Some(provenance) = jwk.provenance()? {
            domain = domain.with_provenance(provenance);
        }

        PublicKey::from_components(domain, decode_int(y)?, &jwk.key_ops)
    }
}
