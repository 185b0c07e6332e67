//! RSASSA-PKCS1-v1_5 JWS algorithms (RS256, RS384, RS512)

use super::identifiers::{RSA_USING_SHA256, RSA_USING_SHA384, RSA_USING_SHA512};
use super::JwsAlgorithm;
use crate::api::keys::{require_key, validate_rsa_key_size, JoseKey};
use jose_common::{Algorithm, JoseError, JoseResult, KeyPersuasion};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::sha2::{Sha256, Sha384, Sha512};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};

/// RSASSA-PKCS1-v1_5 with a SHA-2 hash
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RsaUsingShaAlgorithm {
    /// RS256
    Rs256,
    /// RS384
    Rs384,
    /// RS512
    Rs512,
}

impl RsaUsingShaAlgorithm {
    /// Every variant
    pub const ALL: [Self; 3] = [Self::Rs256, Self::Rs384, Self::Rs512];

    fn wrong_key(&self, key: &JoseKey) -> JoseError {
        JoseError::key_validation(format!(
            "{} requires an RSA key but a {} key was provided",
            self.identifier(),
            key.key_type()
        ))
    }

    fn private_key<'a>(&self, key: Option<&'a JoseKey>) -> JoseResult<&'a RsaPrivateKey> {
        match require_key(key, self.identifier())? {
            JoseKey::RsaPrivate(private) => Ok(&**private),
            JoseKey::RsaPublic(_) => Err(JoseError::key_validation(format!(
                "{} signing requires an RSA private key",
                self.identifier()
            ))),
            other => Err(self.wrong_key(other)),
        }
    }

    fn public_key(&self, key: Option<&JoseKey>) -> JoseResult<RsaPublicKey> {
        match require_key(key, self.identifier())? {
            JoseKey::RsaPublic(public) => Ok(public.as_ref().clone()),
            JoseKey::RsaPrivate(private) => Ok(private.to_public_key()),
            other => Err(self.wrong_key(other)),
        }
    }
}

impl Algorithm for RsaUsingShaAlgorithm {
    fn identifier(&self) -> &str {
        match self {
            Self::Rs256 => RSA_USING_SHA256,
            Self::Rs384 => RSA_USING_SHA384,
            Self::Rs512 => RSA_USING_SHA512,
        }
    }

    fn key_persuasion(&self) -> KeyPersuasion {
        KeyPersuasion::Asymmetric
    }

    fn key_type(&self) -> &str {
        "RSA"
    }
}

impl JwsAlgorithm for RsaUsingShaAlgorithm {
    fn validate_signing_key(&self, key: Option<&JoseKey>) -> JoseResult<()> {
        self.private_key(key)?;
        validate_rsa_key_size(require_key(key, self.identifier())?, self.identifier())
    }

    fn validate_verification_key(&self, key: Option<&JoseKey>) -> JoseResult<()> {
        self.public_key(key)?;
        validate_rsa_key_size(require_key(key, self.identifier())?, self.identifier())
    }

    fn sign(&self, key: Option<&JoseKey>, input: &[u8]) -> JoseResult<Vec<u8>> {
        let private_key = self.private_key(key)?.clone();
        let signature = match self {
            Self::Rs256 => SigningKey::<Sha256>::new(private_key).try_sign(input),
            Self::Rs384 => SigningKey::<Sha384>::new(private_key).try_sign(input),
            Self::Rs512 => SigningKey::<Sha512>::new(private_key).try_sign(input),
        }
        .map_err(|e| JoseError::crypto(format!("RSA signing failed: {e}")))?;
        Ok(signature.to_vec())
    }

    fn verify_signature(
        &self,
        signature: &[u8],
        key: Option<&JoseKey>,
        input: &[u8],
    ) -> JoseResult<bool> {
        let public_key = self.public_key(key)?;
        let Ok(signature) = Signature::try_from(signature) else {
            return Ok(false);
        };

        let verified = match self {
            Self::Rs256 => VerifyingKey::<Sha256>::new(public_key).verify(input, &signature),
            Self::Rs384 => VerifyingKey::<Sha384>::new(public_key).verify(input, &signature),
            Self::Rs512 => VerifyingKey::<Sha512>::new(public_key).verify(input, &signature),
        };

        match verified {
            Ok(()) => Ok(true),
            Err(_) => Ok(false),
        }
    }
}
