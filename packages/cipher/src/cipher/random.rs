//! Secure random material for content encryption
//!
//! Everything here draws from the thread-local CSPRNG, which is seeded from
//! the operating system.

use super::algorithm::ContentEncryptionAlgorithm;
use rand::{rng, RngCore};
use zeroize::Zeroizing;

/// Fresh random initialization vector of `len` bytes
#[must_use]
pub fn generate_iv(len: usize) -> Vec<u8> {
    let mut iv = vec![0u8; len];
    rng().fill_bytes(&mut iv);
    iv
}

/// Fresh random content-encryption key of exactly the size `algorithm` needs
#[must_use]
pub fn generate_content_encryption_key(
    algorithm: &dyn ContentEncryptionAlgorithm,
) -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(vec![0u8; algorithm.key_size()]);
    rng().fill_bytes(&mut key[..]);
    key
}
