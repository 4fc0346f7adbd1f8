//! Error handling for the number-theoretic primitives

use std::borrow::Cow;

use dsacrypt_api::Error as CoreError;
use thiserror::Error;

/// The error type for the number-theoretic primitives
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Parameter validation error
    #[error("Invalid parameter '{name}': {reason}")]
    Parameter {
        /// Name of the invalid parameter
        name: Cow<'static, str>,
        /// Reason why the parameter is invalid
        reason: Cow<'static, str>,
    },

    /// A bounded prime search ran out of candidates
    #[error("no certified {length}-bit prime found within budget (counter {counter})")]
    PrimeGenerationExhausted {
        /// Bit length that was requested
        length: usize,
        /// Generation counter when the search gave up
        counter: u64,
    },

    /// The caller cancelled a long-running operation
    #[error("{operation} was cancelled")]
    Cancelled {
        /// Operation that observed the cancellation
        operation: &'static str,
    },

    /// The operand has no inverse for the given modulus
    #[error("modular inverse undefined: operand is not coprime to the modulus")]
    ModularInverseUndefined,
}

impl Error {
    /// Shorthand to create a Parameter error
    pub fn param<N: Into<Cow<'static, str>>, R: Into<Cow<'static, str>>>(
        name: N,
        reason: R,
    ) -> Self {
        Error::Parameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for the number-theoretic primitives
pub type Result<T> = core::result::Result<T, Error>;

// Implement conversion to CoreError
impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Parameter { name, reason } => CoreError::InvalidParameter {
                context: "algorithms",
                message: format!("{}: {}", name, reason),
            },
            Error::PrimeGenerationExhausted { .. } => CoreError::Other {
                context: "prime generation",
                message: err.to_string(),
            },
            Error::Cancelled { operation } => CoreError::Other {
                context: operation,
                message: "cancelled".to_string(),
            },
            Error::ModularInverseUndefined => CoreError::InvalidParameter {
                context: "modular inverse",
                message: err.to_string(),
            },
        }
    }
}

// Include the validation submodule
pub mod validate;
