//! Error types for the signature crate

use dsacrypt_algorithms::HashId;
use thiserror::Error;

/// Errors that can occur during DSA operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The key does not carry the usage the operation needs
    #[error("Invalid key usage: {0}")]
    InvalidKeyUsage(&'static str),

    /// Malformed generation or validation request
    #[error("Invalid parameter dictionary: {0}")]
    InvalidParameterDictionary(String),

    /// Supplied `p` or `q` does not have the announced length
    #[error("Domain parameter {parameter} is {actual} bits, expected {expected}")]
    DomainParameterLengthMismatch {
        parameter: &'static str,
        expected: usize,
        actual: usize,
    },

    /// `q` does not divide `p - 1`, `g` is out of range, or `g^q != 1 (mod p)`
    #[error("Domain parameters do not satisfy {0}")]
    DomainParameterInvalidRelation(&'static str),

    /// Supplied `p` or `q` is divisible by 2, 3 or 5
    #[error("Domain parameter {0} is divisible by a small prime")]
    DomainParameterCompositeSmell(&'static str),

    /// The hash output is narrower than `N`
    #[error("{hash} output is {bits} bits, narrower than N = {n}")]
    UnsupportedHashBitLength { hash: HashId, bits: usize, n: usize },

    /// A provable prime search ran out of candidates
    #[error("No certified {length}-bit prime within budget (counter {counter})")]
    PrimeGenerationExhausted { length: usize, counter: u64 },

    /// All 65535 generator counts produced `g < 2`
    #[error("Could not derive a domain generator")]
    DomainGeneratorExhausted,

    /// Caller-supplied `k` is not in `(0, q)`
    #[error("Per-message secret k must satisfy 0 < k < q")]
    PerMessageSecretOutOfRange,

    /// Caller-supplied `k` gives `r = 0` or `s = 0`
    #[error("Per-message secret k yields a degenerate signature")]
    DegenerateSignature,

    /// Every internally drawn `k` gave `r = 0` or `s = 0`
    #[error("Signing gave up after {0} degenerate attempts")]
    SigningRetriesExhausted(usize),

    /// The operand has no inverse modulo `q`
    #[error("Modular inverse undefined")]
    ModularInverseUndefined,

    /// Export format that is recognised but not implemented, or unknown
    #[error("Unsupported export format: {0}")]
    UnsupportedExportFormat(String),

    /// The private key was created non-extractable
    #[error("Key is not extractable")]
    KeyNotExtractable,

    /// Imported key material is out of range or malformed
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// A long-running operation was cancelled by the caller
    #[error("{0} was cancelled")]
    Cancelled(&'static str),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for DSA operations
pub type Result<T> = core::result::Result<T, Error>;

// Convert from algorithms::error::Error
impl From<dsacrypt_algorithms::Error> for Error {
    fn from(err: dsacrypt_algorithms::Error) -> Self {
        use dsacrypt_algorithms::Error as AlgoError;

        match err {
            AlgoError::Parameter { name, reason } => {
                Error::InvalidParameterDictionary(format!("{}: {}", name, reason))
            }
            AlgoError::PrimeGenerationExhausted { length, counter } => {
                Error::PrimeGenerationExhausted { length, counter }
            }
            AlgoError::Cancelled { operation } => Error::Cancelled(operation),
            AlgoError::ModularInverseUndefined => Error::ModularInverseUndefined,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Convert to api::Error
impl From<Error> for dsacrypt_api::Error {
    fn from(err: Error) -> Self {
        let message = err.to_string();

        match err {
            Error::InvalidKeyUsage(_) | Error::InvalidKey(_) | Error::KeyNotExtractable => {
                dsacrypt_api::Error::InvalidKey {
                    context: "DSA",
                    message,
                }
            }
            Error::DegenerateSignature => dsacrypt_api::Error::InvalidSignature {
                context: "DSA sign",
                message,
            },
            Error::InvalidParameterDictionary(_)
            | Error::DomainParameterLengthMismatch { .. }
            | Error::DomainParameterInvalidRelation(_)
            | Error::DomainParameterCompositeSmell(_)
            | Error::UnsupportedHashBitLength { .. } => dsacrypt_api::Error::InvalidParameter {
                context: "DSA domain parameters",
                message,
            },
            Error::PerMessageSecretOutOfRange | Error::ModularInverseUndefined => {
                dsacrypt_api::Error::InvalidParameter {
                    context: "DSA sign",
                    message,
                }
            }
            Error::UnsupportedExportFormat(_) => dsacrypt_api::Error::NotImplemented {
                feature: "DSA PKCS#8/SPKI export",
            },
            Error::PrimeGenerationExhausted { .. }
            | Error::DomainGeneratorExhausted
            | Error::SigningRetriesExhausted(_)
            | Error::Cancelled(_)
            | Error::Serialization(_) => dsacrypt_api::Error::Other {
                context: "DSA",
                message,
            },
        }
    }
}
