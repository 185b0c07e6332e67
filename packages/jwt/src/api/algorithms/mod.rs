//! Algorithm capabilities, the process-wide registry and constraints

mod constraints;
mod ecdsa;
mod factory;
mod hmac;
mod key_management;
mod none;
mod rsa;

pub use constraints::{AlgorithmConstraints, ConstraintType};
pub use ecdsa::EcdsaUsingShaAlgorithm;
pub use factory::{AlgorithmFactories, AlgorithmFactory};
pub use hmac::HmacUsingShaAlgorithm;
pub use key_management::{ContentEncryptionKeys, DirectKeyManagement, KeyManagementAlgorithm};
pub use none::PlaintextNoneAlgorithm;
pub use rsa::RsaUsingShaAlgorithm;

use crate::api::keys::JoseKey;
use jose_common::{Algorithm, JoseResult};

/// Identifiers of the registered `alg` values
pub mod identifiers {
    /// Unsecured JWS
    pub const NONE: &str = "none";
    /// HMAC using SHA-256
    pub const HMAC_SHA256: &str = "HS256";
    /// HMAC using SHA-384
    pub const HMAC_SHA384: &str = "HS384";
    /// HMAC using SHA-512
    pub const HMAC_SHA512: &str = "HS512";
    /// RSASSA-PKCS1-v1_5 using SHA-256
    pub const RSA_USING_SHA256: &str = "RS256";
    /// RSASSA-PKCS1-v1_5 using SHA-384
    pub const RSA_USING_SHA384: &str = "RS384";
    /// RSASSA-PKCS1-v1_5 using SHA-512
    pub const RSA_USING_SHA512: &str = "RS512";
    /// ECDSA using P-256 and SHA-256
    pub const ECDSA_USING_P256_CURVE_AND_SHA256: &str = "ES256";
    /// ECDSA using P-384 and SHA-384
    pub const ECDSA_USING_P384_CURVE_AND_SHA384: &str = "ES384";
    /// Direct use of a shared symmetric key as the content encryption key
    pub const DIRECT: &str = "dir";
    /// AES-128-CBC with HMAC-SHA-256
    pub const AES_128_CBC_HMAC_SHA_256: &str = "A128CBC-HS256";
    /// AES-192-CBC with HMAC-SHA-384
    pub const AES_192_CBC_HMAC_SHA_384: &str = "A192CBC-HS384";
    /// AES-256-CBC with HMAC-SHA-512
    pub const AES_256_CBC_HMAC_SHA_512: &str = "A256CBC-HS512";
}

/// A JWS `alg`: produces and checks signatures over the signing input
///
/// `sign` and `verify_signature` reject a key of the wrong type regardless
/// of whether the `validate_*` strength checks were run.
pub trait JwsAlgorithm: Algorithm {
    /// Check that `key` is suitable for producing signatures
    ///
    /// # Errors
    /// Returns `JoseError::KeyValidation` when the key is missing, of the
    /// wrong type or too weak.
    fn validate_signing_key(&self, key: Option<&JoseKey>) -> JoseResult<()>;

    /// Check that `key` is suitable for verifying signatures
    ///
    /// # Errors
    /// Returns `JoseError::KeyValidation` when the key is missing, of the
    /// wrong type or too weak.
    fn validate_verification_key(&self, key: Option<&JoseKey>) -> JoseResult<()>;

    /// Sign `input`
    ///
    /// # Errors
    /// Returns `JoseError::KeyValidation` for an unusable key or
    /// `JoseError::Crypto` if the primitive fails.
    fn sign(&self, key: Option<&JoseKey>, input: &[u8]) -> JoseResult<Vec<u8>>;

    /// Check `signature` over `input`; a bad signature is `Ok(false)`
    ///
    /// # Errors
    /// Returns `JoseError::KeyValidation` for an unusable key.
    fn verify_signature(
        &self,
        signature: &[u8],
        key: Option<&JoseKey>,
        input: &[u8],
    ) -> JoseResult<bool>;
}
