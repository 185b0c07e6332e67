//! JSON Web Encryption (RFC 7516) in compact serialization
//!
//! `header.encryptedKey.iv.ciphertext.tag`, with the ASCII bytes of the
//! encoded header as additional authenticated data.

use crate::api::algorithms::{AlgorithmConstraints, AlgorithmFactories, KeyManagementAlgorithm};
use crate::api::keys::JoseKey;
use crate::headers::{names, Headers};
use crate::structure::JoseState;
use jose_cipher::ContentEncryptionAlgorithm;
use jose_common::{base64url, CharEncoding, CompactSerializer, JoseError, JoseResult};
use std::fmt;
use std::sync::Arc;
use zeroize::Zeroizing;

/// The encrypted key segment is empty for `dir`
const JWE_SERIALIZER: CompactSerializer = CompactSerializer::allowing_empty(1);

/// An encrypted envelope
#[derive(Clone)]
pub struct JsonWebEncryption {
    state: JoseState,
    content_encryption_constraints: AlgorithmConstraints,
    plaintext: Option<Zeroizing<Vec<u8>>>,
    plaintext_char_encoding: CharEncoding,
    encrypted_key: Vec<u8>,
    iv: Vec<u8>,
    ciphertext: Vec<u8>,
    authentication_tag: Vec<u8>,
    explicit_iv: Option<Vec<u8>>,
}

impl Default for JsonWebEncryption {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for JsonWebEncryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonWebEncryption")
            .field("headers", &self.state.headers)
            .field("key", &self.state.key)
            .field("decrypted", &self.plaintext.is_some())
            .field("ciphertext_len", &self.ciphertext.len())
            .finish_non_exhaustive()
    }
}

impl JsonWebEncryption {
    /// An empty envelope accepting any registered `alg` and `enc`
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: JoseState::new(AlgorithmConstraints::NO_CONSTRAINTS),
            content_encryption_constraints: AlgorithmConstraints::NO_CONSTRAINTS,
            plaintext: None,
            plaintext_char_encoding: CharEncoding::default(),
            encrypted_key: Vec::new(),
            iv: Vec::new(),
            ciphertext: Vec::new(),
            authentication_tag: Vec::new(),
            explicit_iv: None,
        }
    }

    /// Parse a five part compact serialization
    ///
    /// # Errors
    /// Returns `JoseError::Format` unless the input has exactly 5 well formed parts.
    pub fn from_compact_serialization(compact_serialization: &str) -> JoseResult<Self> {
        let parts = JWE_SERIALIZER.deserialize(compact_serialization)?;
        if parts.len() != 5 {
            return Err(JoseError::format(format!(
                "A JWE Compact Serialization must have exactly 5 parts separated by period ('.') characters (wrong part count {}).",
                parts.len()
            )));
        }

        let mut jwe = Self::new();
        jwe.state.headers = Headers::from_encoded(&parts[0])?;
        jwe.encrypted_key = base64url::decode(&parts[1])?;
        jwe.iv = base64url::decode(&parts[2])?;
        jwe.ciphertext = base64url::decode(&parts[3])?;
        jwe.authentication_tag = base64url::decode(&parts[4])?;
        Ok(jwe)
    }

    /// Set textual plaintext, encoded with the plaintext char encoding
    ///
    /// # Errors
    /// Returns `JoseError::Format` if the text cannot be represented in that encoding.
    pub fn set_plaintext(&mut self, plaintext: &str) -> JoseResult<()> {
        let bytes = self.plaintext_char_encoding.encode(plaintext)?;
        self.set_plaintext_bytes(bytes);
        Ok(())
    }

    /// Set binary plaintext
    pub fn set_plaintext_bytes(&mut self, plaintext: impl Into<Vec<u8>>) {
        self.plaintext = Some(Zeroizing::new(plaintext.into()));
        self.state.touch();
    }

    /// Encoding used between plaintext text and bytes, UTF-8 by default
    pub fn set_plaintext_char_encoding(&mut self, encoding: CharEncoding) {
        self.plaintext_char_encoding = encoding;
    }

    /// Decrypt if needed and return the plaintext
    ///
    /// # Errors
    /// Algorithm and key errors, or the generic `JoseError::Integrity` for
    /// any problem with the protected content.
    pub fn plaintext(&mut self) -> JoseResult<String> {
        let bytes = self.plaintext_bytes()?;
        self.plaintext_char_encoding.decode(&bytes)
    }

    /// Decrypt if needed and return the plaintext bytes
    ///
    /// # Errors
    /// Same as [`Self::plaintext`].
    pub fn plaintext_bytes(&mut self) -> JoseResult<Vec<u8>> {
        if self.plaintext.is_none() {
            self.decrypt()?;
        }
        self.plaintext
            .as_ref()
            .map(|plaintext| plaintext.to_vec())
            .ok_or_else(JoseError::decryption_integrity)
    }

    fn decrypt(&mut self) -> JoseResult<()> {
        let key_management = self.key_management_mode_algorithm()?;
        let content_encryption = self.content_encryption_algorithm()?;
        let key = self.state.key.as_ref();
        if self.state.do_key_validation {
            key_management.validate_decryption_key(key, content_encryption.as_ref())?;
        }
        self.state.check_crit()?;

        let cek = key_management.manage_for_decrypt(
            key,
            &self.encrypted_key,
            content_encryption.as_ref(),
        )?;
        let aad = self.state.headers.encoded_header()?;
        let plaintext = content_encryption.decrypt(
            &self.ciphertext,
            &self.iv,
            aad.as_bytes(),
            &self.authentication_tag,
            &cek,
        )?;
        tracing::debug!(
            alg = key_management.identifier(),
            enc = content_encryption.identifier(),
            "JWE decrypted"
        );
        self.plaintext = Some(Zeroizing::new(plaintext));
        Ok(())
    }

    /// Encrypt the plaintext and produce the five part serialization
    ///
    /// # Errors
    /// Algorithm and key errors, or `JoseError::Format` when no plaintext is set.
    pub fn compact_serialization(&mut self) -> JoseResult<String> {
        let key_management = self.key_management_mode_algorithm()?;
        let content_encryption = self.content_encryption_algorithm()?;
        let key = self.state.key.as_ref();
        if self.state.do_key_validation {
            key_management.validate_encryption_key(key, content_encryption.as_ref())?;
        }

        let keys = key_management.manage_for_encrypt(key, content_encryption.as_ref())?;
        let plaintext = self
            .plaintext
            .as_ref()
            .ok_or_else(|| JoseError::format("The plaintext payload for the JWE has not been set."))?;
        let header = self.state.headers.encoded_header()?;
        let explicit_iv = self.explicit_iv.take();
        let result = content_encryption.encrypt(
            plaintext,
            header.as_bytes(),
            &keys.content_encryption_key,
            explicit_iv.as_deref(),
        )?;

        let (ciphertext, iv, tag) = result.into_parts();
        self.encrypted_key = keys.encrypted_key;
        self.iv = iv;
        self.ciphertext = ciphertext;
        self.authentication_tag = tag;

        let encrypted_key = base64url::encode(&self.encrypted_key);
        let iv = base64url::encode(&self.iv);
        let ciphertext = base64url::encode(&self.ciphertext);
        let tag = base64url::encode(&self.authentication_tag);
        JWE_SERIALIZER.serialize(&[
            Some(&header),
            Some(&encrypted_key),
            Some(&iv),
            Some(&ciphertext),
            Some(&tag),
        ])
    }

    /// Use `iv` for the next encryption instead of a random one
    ///
    /// Only for reproducing known answers; the IV is used once and then forgotten.
    pub fn set_iv(&mut self, iv: impl Into<Vec<u8>>) {
        self.explicit_iv = Some(iv.into());
    }

    /// Resolve `alg`, enforcing the key management constraints
    ///
    /// # Errors
    /// `InvalidAlgorithm`, `ConstraintViolation` or `UnknownAlgorithm`.
    pub fn key_management_mode_algorithm(&self) -> JoseResult<Arc<dyn KeyManagementAlgorithm>> {
        let id = self.state.algorithm_header_value()?;
        self.state.constraints.check_constraint(id)?;
        AlgorithmFactories::instance()
            .jwe_key_management_algorithm_factory()
            .get_algorithm(id)
    }

    /// Resolve `enc`, enforcing the content encryption constraints
    ///
    /// # Errors
    /// `InvalidAlgorithm`, `ConstraintViolation` or `UnknownAlgorithm`.
    pub fn content_encryption_algorithm(&self) -> JoseResult<Arc<dyn ContentEncryptionAlgorithm>> {
        let id = self
            .state
            .headers
            .string_value(names::ENCRYPTION_METHOD)
            .ok_or_else(|| {
                JoseError::invalid_algorithm("Content encryption header (enc) not set.")
            })?;
        self.content_encryption_constraints.check_constraint(id)?;
        AlgorithmFactories::instance()
            .jwe_content_encryption_algorithm_factory()
            .get_algorithm(id)
    }

    /// Set the key management or decryption key
    pub fn set_key(&mut self, key: impl Into<Option<JoseKey>>) {
        self.state.set_key(key.into());
    }

    /// Policy for `alg`
    pub fn set_algorithm_constraints(&mut self, constraints: AlgorithmConstraints) {
        self.state.set_constraints(constraints);
    }

    /// Policy for `enc`
    pub fn set_content_encryption_algorithm_constraints(
        &mut self,
        constraints: AlgorithmConstraints,
    ) {
        self.content_encryption_constraints = constraints;
        self.state.touch();
    }

    /// Turn key strength checks on or off
    pub fn set_do_key_validation(&mut self, do_key_validation: bool) {
        self.state.do_key_validation = do_key_validation;
        self.state.touch();
    }

    /// Header names this caller understands when they appear in `crit`
    pub fn set_known_critical_headers<I, S>(&mut self, header_names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.known_critical_headers = header_names.into_iter().map(Into::into).collect();
        self.state.touch();
    }

    /// Set any header parameter
    pub fn set_header(&mut self, name: &str, value: impl Into<serde_json::Value>) {
        self.state.set_header(name, value);
    }

    /// Set `alg`
    pub fn set_algorithm_header_value(&mut self, alg: &str) {
        self.set_header(names::ALGORITHM, alg);
    }

    /// Set `enc`
    pub fn set_encryption_method_header_parameter(&mut self, enc: &str) {
        self.set_header(names::ENCRYPTION_METHOD, enc);
    }

    /// Set `cty`
    pub fn set_content_type_header_value(&mut self, cty: &str) {
        self.set_header(names::CONTENT_TYPE, cty);
    }

    /// Header parameters
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.state.headers
    }

    /// The `cty` header value
    #[must_use]
    pub fn content_type_header_value(&self) -> Option<&str> {
        self.state.headers.string_value(names::CONTENT_TYPE)
    }

    /// Raw IV bytes
    #[must_use]
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    /// Raw ciphertext bytes
    #[must_use]
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Raw authentication tag bytes
    #[must_use]
    pub fn authentication_tag(&self) -> &[u8] {
        &self.authentication_tag
    }

    /// Raw encrypted key bytes, empty for `dir`
    #[must_use]
    pub fn encrypted_key(&self) -> &[u8] {
        &self.encrypted_key
    }
}
