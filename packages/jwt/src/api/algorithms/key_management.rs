//! JWE key management (`alg`)

use super::identifiers::DIRECT;
use crate::api::keys::{require_key, JoseKey};
use jose_cipher::ContentEncryptionAlgorithm;
use jose_common::{Algorithm, JoseError, JoseResult, KeyPersuasion};
use zeroize::Zeroizing;

/// The content encryption key and its wire form in the encrypted-key segment
pub struct ContentEncryptionKeys {
    /// Key handed to the `enc` algorithm
    pub content_encryption_key: Zeroizing<Vec<u8>>,
    /// Bytes of the JWE Encrypted Key segment, empty for `dir`
    pub encrypted_key: Vec<u8>,
}

/// A JWE `alg`: establishes the content encryption key
pub trait KeyManagementAlgorithm: Algorithm {
    /// Check the key before encrypting
    ///
    /// # Errors
    /// Returns `JoseError::KeyValidation` when the key cannot be used with `enc`.
    fn validate_encryption_key(
        &self,
        key: Option<&JoseKey>,
        enc: &dyn ContentEncryptionAlgorithm,
    ) -> JoseResult<()>;

    /// Check the key before decrypting
    ///
    /// # Errors
    /// Returns `JoseError::KeyValidation` when the key cannot be used with `enc`.
    fn validate_decryption_key(
        &self,
        key: Option<&JoseKey>,
        enc: &dyn ContentEncryptionAlgorithm,
    ) -> JoseResult<()>;

    /// Produce the content encryption key for a new JWE
    ///
    /// # Errors
    /// Returns `JoseError::KeyValidation` for an unusable key.
    fn manage_for_encrypt(
        &self,
        key: Option<&JoseKey>,
        enc: &dyn ContentEncryptionAlgorithm,
    ) -> JoseResult<ContentEncryptionKeys>;

    /// Recover the content encryption key of a received JWE
    ///
    /// # Errors
    /// Returns `JoseError::KeyValidation` for an unusable key or
    /// `JoseError::Format` for an encrypted key this algorithm cannot accept.
    fn manage_for_decrypt(
        &self,
        key: Option<&JoseKey>,
        encrypted_key: &[u8],
        enc: &dyn ContentEncryptionAlgorithm,
    ) -> JoseResult<Zeroizing<Vec<u8>>>;
}

/// `dir`: the shared symmetric key is the content encryption key
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectKeyManagement;

impl DirectKeyManagement {
    fn secret<'a>(key: Option<&'a JoseKey>) -> JoseResult<&'a [u8]> {
        let key = require_key(key, DIRECT)?;
        key.symmetric_bytes().ok_or_else(|| {
            JoseError::key_validation(format!(
                "{DIRECT} requires a symmetric (oct) key but a {} key was provided",
                key.key_type()
            ))
        })
    }

    fn check_length(secret: &[u8], enc: &dyn ContentEncryptionAlgorithm) -> JoseResult<()> {
        let expected = enc.key_size();
        if secret.len() != expected {
            return Err(JoseError::key_validation(format!(
                "Invalid key for JWE {DIRECT}, expected a {} bit key but a {} bit key was provided.",
                expected * 8,
                secret.len() * 8
            )));
        }
        Ok(())
    }
}

impl Algorithm for DirectKeyManagement {
    fn identifier(&self) -> &str {
        DIRECT
    }

    fn key_persuasion(&self) -> KeyPersuasion {
        KeyPersuasion::Symmetric
    }

    fn key_type(&self) -> &str {
        "oct"
    }
}

impl KeyManagementAlgorithm for DirectKeyManagement {
    fn validate_encryption_key(
        &self,
        key: Option<&JoseKey>,
        enc: &dyn ContentEncryptionAlgorithm,
    ) -> JoseResult<()> {
        Self::check_length(Self::secret(key)?, enc)
    }

    fn validate_decryption_key(
        &self,
        key: Option<&JoseKey>,
        enc: &dyn ContentEncryptionAlgorithm,
    ) -> JoseResult<()> {
        self.validate_encryption_key(key, enc)
    }

    fn manage_for_encrypt(
        &self,
        key: Option<&JoseKey>,
        enc: &dyn ContentEncryptionAlgorithm,
    ) -> JoseResult<ContentEncryptionKeys> {
        let secret = Self::secret(key)?;
        Self::check_length(secret, enc)?;
        Ok(ContentEncryptionKeys {
            content_encryption_key: Zeroizing::new(secret.to_vec()),
            encrypted_key: Vec::new(),
        })
    }

    fn manage_for_decrypt(
        &self,
        key: Option<&JoseKey>,
        encrypted_key: &[u8],
        enc: &dyn ContentEncryptionAlgorithm,
    ) -> JoseResult<Zeroizing<Vec<u8>>> {
        if !encrypted_key.is_empty() {
            return Err(JoseError::format(format!(
                "An empty octet sequence is to be used as the JWE Encrypted Key value when utilizing direct encryption but this JWE has {} octets in the encrypted key part.",
                encrypted_key.len()
            )));
        }
        let secret = Self::secret(key)?;
        Self::check_length(secret, enc)?;
        Ok(Zeroizing::new(secret.to_vec()))
    }
}
