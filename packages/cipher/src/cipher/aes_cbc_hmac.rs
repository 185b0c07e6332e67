//! AES-CBC with HMAC-SHA2 authenticated encryption (RFC 7518 section 5.2)
//!
//! The content-encryption key is `MAC_KEY || ENC_KEY`, each half of the key.
//! The plaintext is AES-CBC encrypted with PKCS#7 padding under `ENC_KEY`,
//! then `HMAC(MAC_KEY, AAD || IV || ciphertext || AL)` is truncated to half
//! the key length to form the tag, where `AL` is the AAD length in bits as a
//! 64-bit big-endian integer.

use super::algorithm::ContentEncryptionAlgorithm;
use super::encryption_result::EncryptionResult;
use super::random::generate_iv;
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockCipher, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit};
use aes::{Aes128, Aes192, Aes256};
use hmac::digest::KeyInit as MacKeyInit;
use hmac::{Hmac, Mac};
use jose_common::{Algorithm, JoseError, JoseResult, KeyPersuasion};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

/// AES block size, which is also the IV size
const IV_SIZE: usize = 16;

/// The three registered AES-CBC-HMAC-SHA2 content encryption algorithms
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AesCbcHmacSha2 {
    /// `A128CBC-HS256`: 32 byte key, AES-128, HMAC-SHA-256 truncated to 16 bytes
    A128CbcHs256,
    /// `A192CBC-HS384`: 48 byte key, AES-192, HMAC-SHA-384 truncated to 24 bytes
    A192CbcHs384,
    /// `A256CBC-HS512`: 64 byte key, AES-256, HMAC-SHA-512 truncated to 32 bytes
    A256CbcHs512,
}

impl AesCbcHmacSha2 {
    /// Every variant, smallest key first
    pub const ALL: [Self; 3] = [Self::A128CbcHs256, Self::A192CbcHs384, Self::A256CbcHs512];

    /// The `enc` header value
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::A128CbcHs256 => "A128CBC-HS256",
            Self::A192CbcHs384 => "A192CBC-HS384",
            Self::A256CbcHs512 => "A256CBC-HS512",
        }
    }

    /// Length of each sub-key, and of the truncated tag
    #[must_use]
    pub const fn half_key_size(self) -> usize {
        match self {
            Self::A128CbcHs256 => 16,
            Self::A192CbcHs384 => 24,
            Self::A256CbcHs512 => 32,
        }
    }

    fn check_key(self, key: &[u8]) -> JoseResult<()> {
        let expected = self.key_size();
        if key.len() != expected {
            return Err(JoseError::key_validation(format!(
                "Invalid key for {}: expected {expected} bytes, got {}",
                self.name(),
                key.len()
            )));
        }
        Ok(())
    }

    fn authentication_tag(
        self,
        mac_key: &[u8],
        aad: &[u8],
        iv: &[u8],
        ciphertext: &[u8],
    ) -> JoseResult<Vec<u8>> {
        let aad_bits = u64::try_from(aad.len())
            .ok()
            .and_then(|len| len.checked_mul(8))
            .ok_or_else(|| JoseError::crypto("Additional authenticated data is too long"))?;
        let al = aad_bits.to_be_bytes();
        let parts: [&[u8]; 4] = [aad, iv, ciphertext, &al];
        let tag_len = self.half_key_size();

        match self {
            Self::A128CbcHs256 => hmac_tag::<Hmac<Sha256>>(mac_key, &parts, tag_len),
            Self::A192CbcHs384 => hmac_tag::<Hmac<Sha384>>(mac_key, &parts, tag_len),
            Self::A256CbcHs512 => hmac_tag::<Hmac<Sha512>>(mac_key, &parts, tag_len),
        }
    }

    fn cbc_encrypt(self, enc_key: &[u8], iv: &[u8], plaintext: &[u8]) -> JoseResult<Vec<u8>> {
        match self {
            Self::A128CbcHs256 => cbc_encrypt::<Aes128>(enc_key, iv, plaintext),
            Self::A192CbcHs384 => cbc_encrypt::<Aes192>(enc_key, iv, plaintext),
            Self::A256CbcHs512 => cbc_encrypt::<Aes256>(enc_key, iv, plaintext),
        }
    }

    fn cbc_decrypt(self, enc_key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Option<Vec<u8>> {
        match self {
            Self::A128CbcHs256 => cbc_decrypt::<Aes128>(enc_key, iv, ciphertext),
            Self::A192CbcHs384 => cbc_decrypt::<Aes192>(enc_key, iv, ciphertext),
            Self::A256CbcHs512 => cbc_decrypt::<Aes256>(enc_key, iv, ciphertext),
        }
    }
}

impl Algorithm for AesCbcHmacSha2 {
    fn identifier(&self) -> &str {
        self.name()
    }

    fn key_persuasion(&self) -> KeyPersuasion {
        KeyPersuasion::Symmetric
    }

    fn key_type(&self) -> &str {
        "oct"
    }
}

impl ContentEncryptionAlgorithm for AesCbcHmacSha2 {
    fn key_size(&self) -> usize {
        self.half_key_size() * 2
    }

    fn iv_size(&self) -> usize {
        IV_SIZE
    }

    fn tag_size(&self) -> usize {
        self.half_key_size()
    }

    fn encrypt(
        &self,
        plaintext: &[u8],
        aad: &[u8],
        key: &[u8],
        iv: Option<&[u8]>,
    ) -> JoseResult<EncryptionResult> {
        self.check_key(key)?;
        let iv = match iv {
            Some(iv) => {
                if iv.len() != IV_SIZE {
                    return Err(JoseError::crypto(format!(
                        "Invalid IV for {}: expected {IV_SIZE} bytes, got {}",
                        self.name(),
                        iv.len()
                    )));
                }
                tracing::debug!(enc = self.name(), "encrypting with a caller supplied IV");
                iv.to_vec()
            }
            None => generate_iv(IV_SIZE),
        };

        let (mac_key, enc_key) = key.split_at(self.half_key_size());
        let ciphertext = self.cbc_encrypt(enc_key, &iv, plaintext)?;
        let tag = self.authentication_tag(mac_key, aad, &iv, &ciphertext)?;

        Ok(EncryptionResult::new(ciphertext, iv, tag))
    }

    fn decrypt(
        &self,
        ciphertext: &[u8],
        iv: &[u8],
        aad: &[u8],
        tag: &[u8],
        key: &[u8],
    ) -> JoseResult<Vec<u8>> {
        self.check_key(key)?;
        let (mac_key, enc_key) = key.split_at(self.half_key_size());

        // The tag is checked before any block is decrypted or unpadded.
        let expected = self
            .authentication_tag(mac_key, aad, iv, ciphertext)
            .map_err(|_| JoseError::decryption_integrity())?;
        if !bool::from(expected.as_slice().ct_eq(tag)) {
            tracing::debug!(enc = self.name(), "content decryption rejected");
            return Err(JoseError::decryption_integrity());
        }

        self.cbc_decrypt(enc_key, iv, ciphertext).ok_or_else(|| {
            tracing::debug!(enc = self.name(), "content decryption rejected");
            JoseError::decryption_integrity()
        })
    }
}

fn hmac_tag<M>(key: &[u8], parts: &[&[u8]], len: usize) -> JoseResult<Vec<u8>>
where
    M: Mac + MacKeyInit,
{
    let mut mac = <M as MacKeyInit>::new_from_slice(key)
        .map_err(|_| JoseError::crypto("Invalid HMAC key length"))?;
    for part in parts {
        mac.update(part);
    }
    let mut tag = mac.finalize().into_bytes().to_vec();
    tag.truncate(len);
    Ok(tag)
}

fn cbc_encrypt<C>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> JoseResult<Vec<u8>>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    let encryptor = cbc::Encryptor::<C>::new_from_slices(key, iv)
        .map_err(|_| JoseError::crypto("Invalid AES key or IV length"))?;
    Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn cbc_decrypt<C>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Option<Vec<u8>>
where
    C: BlockDecryptMut + BlockCipher + KeyInit,
{
    let decryptor = cbc::Decryptor::<C>::new_from_slices(key, iv).ok()?;
    decryptor.decrypt_padded_vec_mut::<Pkcs7>(ciphertext).ok()
}
