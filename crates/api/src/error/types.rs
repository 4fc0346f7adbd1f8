//! Error type definitions for dsacrypt operations

/// Primary error type for dsacrypt operations
///
/// Scheme crates carry their own, more precise error enums and convert into
/// this type at the trait boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid key error
    InvalidKey {
        context: &'static str,
        message: String,
    },

    /// Invalid signature error
    InvalidSignature {
        context: &'static str,
        message: String,
    },

    /// Invalid parameter error
    InvalidParameter {
        context: &'static str,
        message: String,
    },

    /// Not implemented error
    NotImplemented {
        feature: &'static str,
    },

    /// Other error
    Other {
        context: &'static str,
        message: String,
    },
}

/// Result type for dsacrypt operations
pub type Result<T> = core::result::Result<T, Error>;

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidKey { context, message } => {
                write!(f, "Invalid key: {}: {}", context, message)
            }
            Self::InvalidSignature { context, message } => {
                write!(f, "Invalid signature: {}: {}", context, message)
            }
            Self::InvalidParameter { context, message } => {
                write!(f, "{}: {}", context, message)
            }
            Self::NotImplemented { feature } => {
                write!(f, "{} is not implemented", feature)
            }
            Self::Other { context, message } => {
                write!(f, "{}: {}", context, message)
            }
        }
    }
}
