//! Error handling for the dsacrypt ecosystem

pub mod types;

// Re-export the primary error type and result
pub use types::{Error, Result};

impl std::error::Error for Error {}

// Specialized result types for different operations
pub type KeyResult<T> = Result<T>;
pub type SignatureResult<T> = Result<T>;
