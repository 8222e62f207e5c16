//! Error types for presigned URL generation.
//!
//! Signing either produces a complete URL or fails before producing one; every
//! failure is reported through [`SignError`].

/// Errors that can occur while presigning a request.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// A required field is missing or empty, or the expiry is not positive.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The HMAC-SHA256 primitive rejected its key.
    #[error("Cryptographic primitive failure: {0}")]
    CryptoFailure(String),
}

impl SignError {
    /// Shorthand for an [`SignError::InvalidArgument`] naming an empty field.
    pub(crate) fn empty(field: &str) -> Self {
        Self::InvalidArgument(format!("{field} must not be empty"))
    }
}
