//! Keys used to sign, verify and encrypt JOSE envelopes
//!
//! Key-format import is limited to raw bytes and DER (PKCS#8 / SPKI). Each
//! algorithm checks the key *type* it is handed on every call; the strength
//! checks in this module only run when key validation is switched on.

use jose_common::{JoseError, JoseResult};
use rsa::traits::PublicKeyParts;
use rsa::{
    pkcs8::{DecodePrivateKey, DecodePublicKey},
    RsaPrivateKey, RsaPublicKey,
};
use std::fmt;
use zeroize::Zeroizing;

/// Smallest RSA modulus accepted when key validation is on
pub const MIN_RSA_KEY_SIZE_BITS: usize = 2048;

/// A key for one of the supported algorithm families
#[derive(Clone)]
pub enum JoseKey {
    /// Shared secret octets, wiped on drop
    Symmetric(Zeroizing<Vec<u8>>),
    /// RSA private key
    RsaPrivate(Box<RsaPrivateKey>),
    /// RSA public key
    RsaPublic(Box<RsaPublicKey>),
    /// NIST P-256 private key
    P256Private(p256::ecdsa::SigningKey),
    /// NIST P-256 public key
    P256Public(p256::ecdsa::VerifyingKey),
    /// NIST P-384 private key
    P384Private(p384::ecdsa::SigningKey),
    /// NIST P-384 public key
    P384Public(p384::ecdsa::VerifyingKey),
}

impl JoseKey {
    /// Wrap shared secret octets
    #[must_use]
    pub fn symmetric(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Symmetric(Zeroizing::new(bytes.into()))
    }

    /// Parse a PKCS#8 DER encoded RSA private key
    ///
    /// # Errors
    /// Returns `JoseError::KeyValidation` if the DER cannot be decoded.
    pub fn rsa_private_from_pkcs8_der(der: &[u8]) -> JoseResult<Self> {
        let key = RsaPrivateKey::from_pkcs8_der(der)
            .map_err(|e| JoseError::key_validation(format!("Invalid RSA private key: {e}")))?;
        Ok(Self::RsaPrivate(Box::new(key)))
    }

    /// Parse an SPKI DER encoded RSA public key
    ///
    /// # Errors
    /// Returns `JoseError::KeyValidation` if the DER cannot be decoded.
    pub fn rsa_public_from_public_key_der(der: &[u8]) -> JoseResult<Self> {
        let key = RsaPublicKey::from_public_key_der(der)
            .map_err(|e| JoseError::key_validation(format!("Invalid RSA public key: {e}")))?;
        Ok(Self::RsaPublic(Box::new(key)))
    }

    /// Parse a PKCS#8 DER encoded EC private key on P-256 or P-384
    ///
    /// # Errors
    /// Returns `JoseError::KeyValidation` if the DER is not a key on either curve.
    pub fn ec_private_from_pkcs8_der(der: &[u8]) -> JoseResult<Self> {
        if let Ok(key) = p256::ecdsa::SigningKey::from_pkcs8_der(der) {
            return Ok(Self::P256Private(key));
        }
        p384::ecdsa::SigningKey::from_pkcs8_der(der)
            .map(Self::P384Private)
            .map_err(|e| JoseError::key_validation(format!("Invalid EC private key: {e}")))
    }

    /// Parse an SPKI DER encoded EC public key on P-256 or P-384
    ///
    /// # Errors
    /// Returns `JoseError::KeyValidation` if the DER is not a key on either curve.
    pub fn ec_public_from_public_key_der(der: &[u8]) -> JoseResult<Self> {
        if let Ok(key) = p256::ecdsa::VerifyingKey::from_public_key_der(der) {
            return Ok(Self::P256Public(key));
        }
        p384::ecdsa::VerifyingKey::from_public_key_der(der)
            .map(Self::P384Public)
            .map_err(|e| JoseError::key_validation(format!("Invalid EC public key: {e}")))
    }

    /// P-256 private key from its 32 byte scalar
    ///
    /// # Errors
    /// Returns `JoseError::KeyValidation` if the scalar is out of range.
    pub fn p256_private_from_bytes(scalar: &[u8]) -> JoseResult<Self> {
        p256::ecdsa::SigningKey::from_slice(scalar)
            .map(Self::P256Private)
            .map_err(|_| JoseError::key_validation("Invalid P-256 private key bytes"))
    }

    /// P-384 private key from its 48 byte scalar
    ///
    /// # Errors
    /// Returns `JoseError::KeyValidation` if the scalar is out of range.
    pub fn p384_private_from_bytes(scalar: &[u8]) -> JoseResult<Self> {
        p384::ecdsa::SigningKey::from_slice(scalar)
            .map(Self::P384Private)
            .map_err(|_| JoseError::key_validation("Invalid P-384 private key bytes"))
    }

    /// JWK `kty` of this key
    #[must_use]
    pub fn key_type(&self) -> &'static str {
        match self {
            Self::Symmetric(_) => "oct",
            Self::RsaPrivate(_) | Self::RsaPublic(_) => "RSA",
            Self::P256Private(_) | Self::P256Public(_) | Self::P384Private(_) | Self::P384Public(_) => {
                "EC"
            }
        }
    }

    /// Whether this key holds private material
    #[must_use]
    pub fn is_private(&self) -> bool {
        matches!(
            self,
            Self::RsaPrivate(_) | Self::P256Private(_) | Self::P384Private(_)
        )
    }

    /// The public half of an asymmetric key; public keys return a copy of themselves
    #[must_use]
    pub fn public_key(&self) -> Option<Self> {
        match self {
            Self::Symmetric(_) => None,
            Self::RsaPrivate(key) => Some(Self::RsaPublic(Box::new(key.to_public_key()))),
            Self::P256Private(key) => Some(Self::P256Public(key.verifying_key().clone())),
            Self::P384Private(key) => Some(Self::P384Public(key.verifying_key().clone())),
            Self::RsaPublic(_) | Self::P256Public(_) | Self::P384Public(_) => Some(self.clone()),
        }
    }

    /// Shared secret octets, if this is a symmetric key
    #[must_use]
    pub fn symmetric_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Symmetric(bytes) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    /// Modulus size of an RSA key in bits
    #[must_use]
    pub fn rsa_key_size_bits(&self) -> Option<usize> {
        match self {
            Self::RsaPrivate(key) => Some(key.size() * 8),
            Self::RsaPublic(key) => Some(key.size() * 8),
            _ => None,
        }
    }

    /// Curve name of an EC key, as used in a JWK `crv`
    #[must_use]
    pub fn curve(&self) -> Option<&'static str> {
        match self {
            Self::P256Private(_) | Self::P256Public(_) => Some("P-256"),
            Self::P384Private(_) | Self::P384Public(_) => Some("P-384"),
            _ => None,
        }
    }
}

impl fmt::Debug for JoseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symmetric(bytes) => f
                .debug_struct("Symmetric")
                .field("len", &bytes.len())
                .finish_non_exhaustive(),
            Self::RsaPrivate(_) | Self::RsaPublic(_) => f
                .debug_struct("Rsa")
                .field("private", &self.is_private())
                .field("bits", &self.rsa_key_size_bits())
                .finish(),
            _ => f
                .debug_struct("Ec")
                .field("private", &self.is_private())
                .field("curve", &self.curve())
                .finish(),
        }
    }
}

impl From<RsaPrivateKey> for JoseKey {
    fn from(key: RsaPrivateKey) -> Self {
        Self::RsaPrivate(Box::new(key))
    }
}

impl From<RsaPublicKey> for JoseKey {
    fn from(key: RsaPublicKey) -> Self {
        Self::RsaPublic(Box::new(key))
    }
}

impl From<p256::ecdsa::SigningKey> for JoseKey {
    fn from(key: p256::ecdsa::SigningKey) -> Self {
        Self::P256Private(key)
    }
}

impl From<p256::ecdsa::VerifyingKey> for JoseKey {
    fn from(key: p256::ecdsa::VerifyingKey) -> Self {
        Self::P256Public(key)
    }
}

impl From<p384::ecdsa::SigningKey> for JoseKey {
    fn from(key: p384::ecdsa::SigningKey) -> Self {
        Self::P384Private(key)
    }
}

impl From<p384::ecdsa::VerifyingKey> for JoseKey {
    fn from(key: p384::ecdsa::VerifyingKey) -> Self {
        Self::P384Public(key)
    }
}

/// Require a key to be present
pub(crate) fn require_key<'a>(key: Option<&'a JoseKey>, alg: &str) -> JoseResult<&'a JoseKey> {
    key.ok_or_else(|| JoseError::key_validation(format!("Key cannot be null for {alg}")))
}

/// Validate HMAC secret key length: at least as many bits as the hash output
pub(crate) fn validate_hmac_key(secret: &[u8], alg: &str, min_length: usize) -> JoseResult<()> {
    if secret.len() < min_length {
        return Err(JoseError::key_validation(format!(
            "A key of the same size as the hash output (i.e. {} bits for {alg}) or larger MUST be used with the HMAC SHA algorithms but this key is only {} bits",
            min_length * 8,
            secret.len() * 8
        )));
    }
    Ok(())
}

/// Validate RSA modulus size
pub(crate) fn validate_rsa_key_size(key: &JoseKey, alg: &str) -> JoseResult<()> {
    let bits = key.rsa_key_size_bits().unwrap_or_default();
    if bits < MIN_RSA_KEY_SIZE_BITS {
        return Err(JoseError::key_validation(format!(
            "An RSA key of size {MIN_RSA_KEY_SIZE_BITS} bits or larger MUST be used with {alg} (this key is only {bits} bits)"
        )));
    }
    Ok(())
}
