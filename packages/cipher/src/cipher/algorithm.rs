//! Content encryption capability

use super::encryption_result::EncryptionResult;
use jose_common::{Algorithm, JoseResult};

/// Authenticated encryption of JWE content under a content-encryption key
///
/// `encrypt` and `decrypt` take the complete key; how it is split between
/// sub-keys is private to the algorithm. `decrypt` must check integrity
/// before touching the ciphertext, and every failure past key validation must
/// be the same generic `JoseError::Integrity`.
pub trait ContentEncryptionAlgorithm: Algorithm {
    /// Required content-encryption key length in bytes
    fn key_size(&self) -> usize;

    /// Initialization vector length in bytes
    fn iv_size(&self) -> usize;

    /// Authentication tag length in bytes
    fn tag_size(&self) -> usize;

    /// Encrypt `plaintext`, authenticating `aad` alongside it
    ///
    /// A random IV is generated when `iv` is `None`. A caller supplying an IV
    /// must never reuse it with the same key.
    ///
    /// # Errors
    /// Returns `JoseError::KeyValidation` for a key of the wrong length and
    /// `JoseError::Crypto` for an IV of the wrong length.
    fn encrypt(
        &self,
        plaintext: &[u8],
        aad: &[u8],
        key: &[u8],
        iv: Option<&[u8]>,
    ) -> JoseResult<EncryptionResult>;

    /// Verify the tag and decrypt
    ///
    /// # Errors
    /// Returns `JoseError::KeyValidation` for a key of the wrong length and a
    /// generic `JoseError::Integrity` for anything wrong with the input.
    fn decrypt(
        &self,
        ciphertext: &[u8],
        iv: &[u8],
        aad: &[u8],
        tag: &[u8],
        key: &[u8],
    ) -> JoseResult<Vec<u8>>;
}
