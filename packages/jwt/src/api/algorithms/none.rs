//! The unsecured `none` algorithm

use super::identifiers::NONE;
use super::JwsAlgorithm;
use crate::api::keys::JoseKey;
use jose_common::{Algorithm, JoseError, JoseResult, KeyPersuasion};

/// `none`: an empty signature, valid only when the signature is empty
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaintextNoneAlgorithm;

impl PlaintextNoneAlgorithm {
    fn require_no_key(key: Option<&JoseKey>) -> JoseResult<()> {
        match key {
            None => Ok(()),
            Some(_) => Err(JoseError::key_validation(
                "JWS Plaintext (alg=none) must not use a key.",
            )),
        }
    }
}

impl Algorithm for PlaintextNoneAlgorithm {
    fn identifier(&self) -> &str {
        NONE
    }

    fn key_persuasion(&self) -> KeyPersuasion {
        KeyPersuasion::None
    }

    fn key_type(&self) -> &str {
        ""
    }
}

impl JwsAlgorithm for PlaintextNoneAlgorithm {
    fn validate_signing_key(&self, key: Option<&JoseKey>) -> JoseResult<()> {
        Self::require_no_key(key)
    }

    fn validate_verification_key(&self, key: Option<&JoseKey>) -> JoseResult<()> {
        Self::require_no_key(key)
    }

    fn sign(&self, key: Option<&JoseKey>, _input: &[u8]) -> JoseResult<Vec<u8>> {
        Self::require_no_key(key)?;
        Ok(Vec::new())
    }

    fn verify_signature(
        &self,
        signature: &[u8],
        key: Option<&JoseKey>,
        _input: &[u8],
    ) -> JoseResult<bool> {
        Self::require_no_key(key)?;
        Ok(signature.is_empty())
    }
}
