//! ECDSA JWS algorithms (ES256, ES384)
//!
//! Signatures are the fixed-width concatenation `R || S`, not DER.

use super::identifiers::{ECDSA_USING_P256_CURVE_AND_SHA256, ECDSA_USING_P384_CURVE_AND_SHA384};
use super::JwsAlgorithm;
use crate::api::keys::{require_key, JoseKey};
use jose_common::{Algorithm, JoseError, JoseResult, KeyPersuasion};
use p256::ecdsa::signature::{Signer, Verifier};

/// ECDSA on a NIST curve with the matching SHA-2 hash
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EcdsaUsingShaAlgorithm {
    /// ES256: P-256 and SHA-256
    Es256,
    /// ES384: P-384 and SHA-384
    Es384,
}

impl EcdsaUsingShaAlgorithm {
    /// Every variant
    pub const ALL: [Self; 2] = [Self::Es256, Self::Es384];

    /// Curve name the key must be on
    #[must_use]
    pub const fn curve(self) -> &'static str {
        match self {
            Self::Es256 => "P-256",
            Self::Es384 => "P-384",
        }
    }

    /// Length of the `R || S` signature
    #[must_use]
    pub const fn signature_length(self) -> usize {
        match self {
            Self::Es256 => 64,
            Self::Es384 => 96,
        }
    }

    fn check_key<'a>(&self, key: Option<&'a JoseKey>, private: bool) -> JoseResult<&'a JoseKey> {
        let key = require_key(key, self.identifier())?;
        match key.curve() {
            Some(curve) if curve == self.curve() => {}
            Some(curve) => {
                return Err(JoseError::key_validation(format!(
                    "{} requires a key on curve {} but the key is on {curve}",
                    self.identifier(),
                    self.curve()
                )))
            }
            None => {
                return Err(JoseError::key_validation(format!(
                    "{} requires an EC key but a {} key was provided",
                    self.identifier(),
                    key.key_type()
                )))
            }
        }
        if private && !key.is_private() {
            return Err(JoseError::key_validation(format!(
                "{} signing requires an EC private key",
                self.identifier()
            )));
        }
        Ok(key)
    }
}

impl Algorithm for EcdsaUsingShaAlgorithm {
    fn identifier(&self) -> &str {
        match self {
            Self::Es256 => ECDSA_USING_P256_CURVE_AND_SHA256,
            Self::Es384 => ECDSA_USING_P384_CURVE_AND_SHA384,
        }
    }

    fn key_persuasion(&self) -> KeyPersuasion {
        KeyPersuasion::Asymmetric
    }

    fn key_type(&self) -> &str {
        "EC"
    }
}

impl JwsAlgorithm for EcdsaUsingShaAlgorithm {
    fn validate_signing_key(&self, key: Option<&JoseKey>) -> JoseResult<()> {
        self.check_key(key, true).map(|_| ())
    }

    fn validate_verification_key(&self, key: Option<&JoseKey>) -> JoseResult<()> {
        self.check_key(key, false).map(|_| ())
    }

    fn sign(&self, key: Option<&JoseKey>, input: &[u8]) -> JoseResult<Vec<u8>> {
        match self.check_key(key, true)? {
            JoseKey::P256Private(signing_key) => {
                let signature: p256::ecdsa::Signature = signing_key
                    .try_sign(input)
                    .map_err(|e| JoseError::crypto(format!("ES256 signing failed: {e}")))?;
                Ok(signature.to_bytes().to_vec())
            }
            JoseKey::P384Private(signing_key) => {
                let signature: p384::ecdsa::Signature = signing_key
                    .try_sign(input)
                    .map_err(|e| JoseError::crypto(format!("ES384 signing failed: {e}")))?;
                Ok(signature.to_bytes().to_vec())
            }
            other => Err(JoseError::key_validation(format!(
                "{} cannot sign with a {} key",
                self.identifier(),
                other.key_type()
            ))),
        }
    }

    fn verify_signature(
        &self,
        signature: &[u8],
        key: Option<&JoseKey>,
        input: &[u8],
    ) -> JoseResult<bool> {
        if signature.len() != self.signature_length() {
            tracing::debug!(
                alg = self.identifier(),
                len = signature.len(),
                "ECDSA signature has the wrong length"
            );
            self.check_key(key, false)?;
            return Ok(false);
        }

        let verified = match self.check_key(key, false)? {
            JoseKey::P256Private(signing_key) => {
                verify_p256(signing_key.verifying_key(), signature, input)
            }
            JoseKey::P256Public(verifying_key) => verify_p256(verifying_key, signature, input),
            JoseKey::P384Private(signing_key) => {
                verify_p384(signing_key.verifying_key(), signature, input)
            }
            JoseKey::P384Public(verifying_key) => verify_p384(verifying_key, signature, input),
            other => {
                return Err(JoseError::key_validation(format!(
                    "{} cannot verify with a {} key",
                    self.identifier(),
                    other.key_type()
                )))
            }
        };
        Ok(verified)
    }
}

fn verify_p256(key: &p256::ecdsa::VerifyingKey, signature: &[u8], input: &[u8]) -> bool {
    match p256::ecdsa::Signature::from_slice(signature) {
        Ok(signature) => key.verify(input, &signature).is_ok(),
        Err(_) => false,
    }
}

fn verify_p384(key: &p384::ecdsa::VerifyingKey, signature: &[u8], input: &[u8]) -> bool {
    match p384::ecdsa::Signature::from_slice(signature) {
        Ok(signature) => key.verify(input, &signature).is_ok(),
        Err(_) => false,
    }
}
