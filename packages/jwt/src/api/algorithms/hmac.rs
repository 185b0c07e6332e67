//! HMAC-based JWS algorithms (HS256, HS384, HS512)

use super::identifiers::{HMAC_SHA256, HMAC_SHA384, HMAC_SHA512};
use super::JwsAlgorithm;
use crate::api::keys::{require_key, validate_hmac_key, JoseKey};
use hmac::{Hmac, Mac};
use jose_common::{Algorithm, JoseError, JoseResult, KeyPersuasion};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// HMAC with a SHA-2 hash
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HmacUsingShaAlgorithm {
    /// HS256
    Hs256,
    /// HS384
    Hs384,
    /// HS512
    Hs512,
}

impl HmacUsingShaAlgorithm {
    /// Every variant
    pub const ALL: [Self; 3] = [Self::Hs256, Self::Hs384, Self::Hs512];

    /// Minimum key length in bytes, the size of the hash output
    #[must_use]
    pub const fn min_key_length(self) -> usize {
        match self {
            Self::Hs256 => 32,
            Self::Hs384 => 48,
            Self::Hs512 => 64,
        }
    }

    fn secret<'a>(&self, key: Option<&'a JoseKey>) -> JoseResult<&'a [u8]> {
        let key = require_key(key, self.identifier())?;
        key.symmetric_bytes().ok_or_else(|| {
            JoseError::key_validation(format!(
                "{} requires a symmetric (oct) key but a {} key was provided",
                self.identifier(),
                key.key_type()
            ))
        })
    }

    fn mac(self, secret: &[u8], input: &[u8]) -> JoseResult<Vec<u8>> {
        let tag = match self {
            Self::Hs256 => {
                let mut mac = HmacSha256::new_from_slice(secret)
                    .map_err(|_| JoseError::key_validation("Invalid HMAC key"))?;
                mac.update(input);
                mac.finalize().into_bytes().to_vec()
            }
            Self::Hs384 => {
                let mut mac = HmacSha384::new_from_slice(secret)
                    .map_err(|_| JoseError::key_validation("Invalid HMAC key"))?;
                mac.update(input);
                mac.finalize().into_bytes().to_vec()
            }
            Self::Hs512 => {
                let mut mac = HmacSha512::new_from_slice(secret)
                    .map_err(|_| JoseError::key_validation("Invalid HMAC key"))?;
                mac.update(input);
                mac.finalize().into_bytes().to_vec()
            }
        };
        Ok(tag)
    }
}

impl Algorithm for HmacUsingShaAlgorithm {
    fn identifier(&self) -> &str {
        match self {
            Self::Hs256 => HMAC_SHA256,
            Self::Hs384 => HMAC_SHA384,
            Self::Hs512 => HMAC_SHA512,
        }
    }

    fn key_persuasion(&self) -> KeyPersuasion {
        KeyPersuasion::Symmetric
    }

    fn key_type(&self) -> &str {
        "oct"
    }
}

impl JwsAlgorithm for HmacUsingShaAlgorithm {
    fn validate_signing_key(&self, key: Option<&JoseKey>) -> JoseResult<()> {
        validate_hmac_key(self.secret(key)?, self.identifier(), self.min_key_length())
    }

    fn validate_verification_key(&self, key: Option<&JoseKey>) -> JoseResult<()> {
        self.validate_signing_key(key)
    }

    fn sign(&self, key: Option<&JoseKey>, input: &[u8]) -> JoseResult<Vec<u8>> {
        self.mac(self.secret(key)?, input)
    }

    fn verify_signature(
        &self,
        signature: &[u8],
        key: Option<&JoseKey>,
        input: &[u8],
    ) -> JoseResult<bool> {
        let expected = self.mac(self.secret(key)?, input)?;
        Ok(bool::from(expected.as_slice().ct_eq(signature)))
    }
}
