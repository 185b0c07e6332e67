//! Error constructors

use super::types::{JoseError, INTEGRITY_FAILURE_MESSAGE};

impl JoseError {
    /// Create a format error
    #[inline]
    #[must_use]
    pub fn format(msg: impl Into<String>) -> Self {
        JoseError::Format(msg.into())
    }

    /// Create an invalid algorithm error
    #[inline]
    #[must_use]
    pub fn invalid_algorithm(msg: impl Into<String>) -> Self {
        JoseError::InvalidAlgorithm(msg.into())
    }

    /// Create an unknown algorithm error
    #[inline]
    #[must_use]
    pub fn unknown_algorithm(alg: impl Into<String>) -> Self {
        JoseError::UnknownAlgorithm(alg.into())
    }

    /// Create a constraint violation error
    #[inline]
    #[must_use]
    pub fn constraint_violation(msg: impl Into<String>) -> Self {
        JoseError::ConstraintViolation(msg.into())
    }

    /// Create a key validation error
    #[inline]
    #[must_use]
    pub fn key_validation(msg: impl Into<String>) -> Self {
        JoseError::KeyValidation(msg.into())
    }

    /// Create an integrity error
    #[inline]
    #[must_use]
    pub fn integrity(msg: impl Into<String>) -> Self {
        JoseError::Integrity(msg.into())
    }

    /// The one integrity error content decryption is allowed to produce
    #[inline]
    #[must_use]
    pub fn decryption_integrity() -> Self {
        JoseError::Integrity(INTEGRITY_FAILURE_MESSAGE.to_string())
    }

    /// Create a malformed claim error
    #[inline]
    #[must_use]
    pub fn malformed_claim(msg: impl Into<String>) -> Self {
        JoseError::MalformedClaim(msg.into())
    }

    /// Create an invalid JWT error from a single reason
    #[inline]
    #[must_use]
    pub fn invalid_jwt(msg: impl Into<String>) -> Self {
        JoseError::InvalidJwt {
            details: vec![msg.into()],
        }
    }

    /// Create a cryptographic error
    #[inline]
    #[must_use]
    pub fn crypto(msg: impl Into<String>) -> Self {
        JoseError::Crypto(msg.into())
    }

    /// Whether this error is one of the algorithm resolution failures
    #[must_use]
    pub fn is_algorithm_error(&self) -> bool {
        matches!(
            self,
            JoseError::InvalidAlgorithm(_)
                | JoseError::UnknownAlgorithm(_)
                | JoseError::ConstraintViolation(_)
        )
    }
}
