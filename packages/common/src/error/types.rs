//! Core error types and definitions

use thiserror::Error;

/// The single message used for every content-decryption failure.
///
/// Tag mismatches, bad padding and malformed ciphertext all surface with
/// exactly this text so that none of them can be told apart.
pub const INTEGRITY_FAILURE_MESSAGE: &str = "Authentication tag check failed";

/// Result type for JOSE operations
pub type JoseResult<T> = std::result::Result<T, JoseError>;

/// Errors raised while building, parsing, signing, encrypting or validating
/// JOSE envelopes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoseError {
    /// Malformed compact serialization, base64url, header or encoding
    #[error("Invalid format: {0}")]
    Format(String),

    /// The algorithm header parameter is missing or not a string
    #[error("Invalid algorithm: {0}")]
    InvalidAlgorithm(String),

    /// No implementation is registered for the named algorithm
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// The algorithm is rejected by the active constraints
    #[error("Algorithm constraint violation: {0}")]
    ConstraintViolation(String),

    /// The key is missing, of the wrong type or too weak for the algorithm
    #[error("Key validation failed: {0}")]
    KeyValidation(String),

    /// A `crit` header names a parameter this consumer does not understand
    #[error("Unprocessed critical header: {0}")]
    UnprocessedCriticalHeader(String),

    /// Signature or authentication tag did not verify
    #[error("Integrity check failed: {0}")]
    Integrity(String),

    /// A claim is present but has the wrong JSON type
    #[error("Malformed claim: {0}")]
    MalformedClaim(String),

    /// A JWT was rejected; every validation failure is listed
    #[error("Invalid JWT: {}", details.join(" "))]
    InvalidJwt {
        /// Human readable reasons, in the order they were found
        details: Vec<String>,
    },

    /// Header or claims JSON could not be decoded or encoded
    #[error("JSON error: {0}")]
    Json(String),

    /// A cryptographic primitive failed for a reason other than integrity
    #[error("Cryptographic operation failed: {0}")]
    Crypto(String),
}

impl From<base64::DecodeError> for JoseError {
    fn from(err: base64::DecodeError) -> Self {
        JoseError::Format(format!("Invalid base64url encoding: {err}"))
    }
}

impl From<serde_json::Error> for JoseError {
    fn from(err: serde_json::Error) -> Self {
        JoseError::Json(err.to_string())
    }
}
