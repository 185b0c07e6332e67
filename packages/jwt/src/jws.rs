//! JSON Web Signature (RFC 7515) in compact serialization
//!
//! The envelope owns its header, payload and signature. Verification results
//! are cached against a generation counter: changing the key, a header, the
//! payload, the signature or the constraints makes the cached result stale.

use crate::api::algorithms::{AlgorithmConstraints, AlgorithmFactories, JwsAlgorithm};
use crate::api::keys::JoseKey;
use crate::headers::{names, Headers};
use crate::structure::JoseState;
use jose_common::{
    base64url, CharEncoding, CompactSerializer, JoseConfig, JoseError, JoseResult, KeyPersuasion,
};
use std::sync::Arc;

/// The payload segment may be empty (detached content, or an empty payload)
const JWS_SERIALIZER: CompactSerializer = CompactSerializer::allowing_empty(1);

/// Outcome of the most recent verification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerificationState {
    /// Not verified since the last change
    Unknown,
    /// The signature verified
    Valid,
    /// The signature did not verify
    Invalid,
}

/// A signed envelope
#[derive(Clone, Debug)]
pub struct JsonWebSignature {
    state: JoseState,
    config: JoseConfig,
    payload: Vec<u8>,
    payload_char_encoding: CharEncoding,
    encoded_payload: Option<String>,
    signature: Vec<u8>,
    verified: Option<(u64, bool)>,
}

impl Default for JsonWebSignature {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonWebSignature {
    /// An empty envelope with secure defaults
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(JoseConfig::default())
    }

    /// An empty envelope honouring `config`
    ///
    /// `none` is blocked unless `config.allow_none_algorithm` is set.
    #[must_use]
    pub fn with_config(config: JoseConfig) -> Self {
        let constraints = if config.allow_none_algorithm {
            AlgorithmConstraints::NO_CONSTRAINTS
        } else {
            AlgorithmConstraints::DISALLOW_NONE
        };
        Self {
            state: JoseState::new(constraints),
            config,
            payload: Vec::new(),
            payload_char_encoding: CharEncoding::default(),
            encoded_payload: None,
            signature: Vec::new(),
            verified: None,
        }
    }

    /// Parse a compact serialization with secure defaults
    ///
    /// # Errors
    /// Returns `JoseError::Format` unless the input has exactly 3 well formed parts.
    pub fn from_compact_serialization(compact_serialization: &str) -> JoseResult<Self> {
        Self::from_compact_serialization_with_config(compact_serialization, JoseConfig::default())
    }

    /// Parse a compact serialization honouring `config`
    ///
    /// # Errors
    /// Returns `JoseError::Format` unless the input has exactly 3 well formed parts.
    pub fn from_compact_serialization_with_config(
        compact_serialization: &str,
        config: JoseConfig,
    ) -> JoseResult<Self> {
        let parts = JWS_SERIALIZER.deserialize(compact_serialization)?;
        if parts.len() != 3 {
            return Err(JoseError::format(format!(
                "A JWS Compact Serialization must have exactly 3 parts separated by period ('.') characters (wrong part count {}).",
                parts.len()
            )));
        }

        let mut jws = Self::with_config(config);
        jws.state.headers = Headers::from_encoded(&parts[0])?;
        jws.set_encoded_payload(&parts[1])?;
        jws.signature = base64url::decode(&parts[2])?;
        jws.state.touch();
        Ok(jws)
    }

    /// Set a textual payload, encoded with the payload char encoding
    ///
    /// # Errors
    /// Returns `JoseError::Format` if the text cannot be represented in that encoding.
    pub fn set_payload(&mut self, payload: &str) -> JoseResult<()> {
        let bytes = self.payload_char_encoding.encode(payload)?;
        self.set_payload_bytes(bytes);
        Ok(())
    }

    /// Set a binary payload
    pub fn set_payload_bytes(&mut self, payload: impl Into<Vec<u8>>) {
        self.payload = payload.into();
        self.encoded_payload = None;
        self.state.touch();
    }

    /// Encoding used between payload text and bytes, UTF-8 by default
    pub fn set_payload_char_encoding(&mut self, encoding: CharEncoding) {
        self.payload_char_encoding = encoding;
    }

    /// Current payload char encoding
    #[must_use]
    pub fn payload_char_encoding(&self) -> CharEncoding {
        self.payload_char_encoding
    }

    /// Set the base64url payload segment directly
    ///
    /// The segment stays authoritative for the signing input until the
    /// payload is set again.
    ///
    /// # Errors
    /// Returns `JoseError::Format` if the segment is not valid base64url.
    pub fn set_encoded_payload(&mut self, encoded_payload: &str) -> JoseResult<()> {
        self.payload = base64url::decode(encoded_payload)?;
        self.encoded_payload = Some(encoded_payload.to_string());
        self.state.touch();
        Ok(())
    }

    /// The base64url payload segment
    #[must_use]
    pub fn encoded_payload(&self) -> String {
        match &self.encoded_payload {
            Some(encoded) => encoded.clone(),
            None => base64url::encode(&self.payload),
        }
    }

    /// The payload, after the signature verifies
    ///
    /// # Errors
    /// Returns `JoseError::Integrity` if the signature does not verify, or
    /// any error verification itself raises.
    pub fn payload(&mut self) -> JoseResult<String> {
        self.ensure_verified_for_read()?;
        self.payload_char_encoding.decode(&self.payload)
    }

    /// The payload bytes, after the signature verifies
    ///
    /// # Errors
    /// Same as [`Self::payload`].
    pub fn payload_bytes(&mut self) -> JoseResult<Vec<u8>> {
        self.ensure_verified_for_read()?;
        Ok(self.payload.clone())
    }

    /// The payload without any signature check
    ///
    /// # Errors
    /// Returns `JoseError::Format` if the bytes are invalid in the payload char encoding.
    pub fn unverified_payload(&self) -> JoseResult<String> {
        self.payload_char_encoding.decode(&self.payload)
    }

    /// The payload bytes without any signature check
    #[must_use]
    pub fn unverified_payload_bytes(&self) -> &[u8] {
        &self.payload
    }

    fn ensure_verified_for_read(&mut self) -> JoseResult<()> {
        if self.config.skip_payload_verification_on_read {
            tracing::warn!(
                "returning a JWS payload without verifying its signature (skip_payload_verification_on_read is set)"
            );
            return Ok(());
        }
        if self.verify_signature()? {
            Ok(())
        } else {
            Err(JoseError::integrity("JWS signature is invalid."))
        }
    }

    /// Set the signing or verification key
    pub fn set_key(&mut self, key: impl Into<Option<JoseKey>>) {
        self.state.set_key(key.into());
    }

    /// Current key
    #[must_use]
    pub fn key(&self) -> Option<&JoseKey> {
        self.state.key.as_ref()
    }

    /// Replace the algorithm policy
    pub fn set_algorithm_constraints(&mut self, constraints: AlgorithmConstraints) {
        self.state.set_constraints(constraints);
    }

    /// Turn key strength checks on or off; key type checks always run
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

    /// Set `kid`
    pub fn set_key_id_header_value(&mut self, kid: &str) {
        self.set_header(names::KEY_ID, kid);
    }

    /// Set `cty`
    pub fn set_content_type_header_value(&mut self, cty: &str) {
        self.set_header(names::CONTENT_TYPE, cty);
    }

    /// Set `crit`
    pub fn set_critical_header_names(&mut self, header_names: &[&str]) {
        self.set_header(names::CRITICAL, header_names.to_vec());
    }

    /// Header parameters
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.state.headers
    }

    /// A header parameter if it is a string
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.state.headers.string_value(name)
    }

    /// The `alg` header value, unchecked
    #[must_use]
    pub fn algorithm_header_value(&self) -> Option<&str> {
        self.header(names::ALGORITHM)
    }

    /// The `cty` header value
    #[must_use]
    pub fn content_type_header_value(&self) -> Option<&str> {
        self.header(names::CONTENT_TYPE)
    }

    /// The `kid` header value
    #[must_use]
    pub fn key_id_header_value(&self) -> Option<&str> {
        self.header(names::KEY_ID)
    }

    /// Resolve `alg`, enforcing the constraints
    ///
    /// # Errors
    /// `InvalidAlgorithm` when `alg` is missing, `ConstraintViolation` when the
    /// policy rejects it, `UnknownAlgorithm` when nothing implements it.
    pub fn algorithm(&self) -> JoseResult<Arc<dyn JwsAlgorithm>> {
        self.resolve_algorithm(true)
    }

    /// Resolve `alg` without consulting the constraints
    ///
    /// # Errors
    /// `InvalidAlgorithm` or `UnknownAlgorithm`.
    pub fn algorithm_no_constraint_check(&self) -> JoseResult<Arc<dyn JwsAlgorithm>> {
        self.resolve_algorithm(false)
    }

    fn resolve_algorithm(&self, check_constraints: bool) -> JoseResult<Arc<dyn JwsAlgorithm>> {
        let id = self.state.algorithm_header_value()?;
        if check_constraints {
            self.state.constraints.check_constraint(id)?;
        }
        AlgorithmFactories::instance()
            .jws_algorithm_factory()
            .get_algorithm(id)
    }

    /// Key type the algorithm expects, without a constraint check
    ///
    /// # Errors
    /// `InvalidAlgorithm` or `UnknownAlgorithm`.
    pub fn key_type(&self) -> JoseResult<String> {
        Ok(self.algorithm_no_constraint_check()?.key_type().to_string())
    }

    /// Key management category, without a constraint check
    ///
    /// # Errors
    /// `InvalidAlgorithm` or `UnknownAlgorithm`.
    pub fn key_persuasion(&self) -> JoseResult<KeyPersuasion> {
        Ok(self.algorithm_no_constraint_check()?.key_persuasion())
    }

    fn signing_input(&self) -> JoseResult<String> {
        Ok(format!(
            "{}.{}",
            self.state.headers.encoded_header()?,
            self.encoded_payload()
        ))
    }

    /// Compute the signature over the current header and payload
    ///
    /// # Errors
    /// Algorithm resolution errors, `KeyValidation` for an unsuitable key, or
    /// `Crypto` if the primitive fails.
    pub fn sign(&mut self) -> JoseResult<()> {
        let algorithm = self.algorithm()?;
        let key = self.state.key.as_ref();
        if self.state.do_key_validation {
            algorithm.validate_signing_key(key)?;
        }
        let input = self.signing_input()?;
        self.signature = algorithm.sign(key, input.as_bytes())?;
        self.state.touch();
        tracing::debug!(alg = algorithm.identifier(), "JWS signed");
        Ok(())
    }

    /// Check the signature, reusing a result computed against the current state
    ///
    /// # Errors
    /// Algorithm resolution errors, `KeyValidation` for an unsuitable key,
    /// `UnprocessedCriticalHeader` for an unknown `crit` entry.
    pub fn verify_signature(&mut self) -> JoseResult<bool> {
        let generation = self.state.generation();
        if let Some((checked, valid)) = self.verified {
            if checked == generation {
                return Ok(valid);
            }
        }

        let algorithm = self.algorithm()?;
        let key = self.state.key.as_ref();
        if self.state.do_key_validation {
            algorithm.validate_verification_key(key)?;
        }
        self.state.check_crit()?;

        let input = self.signing_input()?;
        let valid = algorithm.verify_signature(&self.signature, key, input.as_bytes())?;
        tracing::debug!(alg = algorithm.identifier(), valid, "JWS signature checked");
        self.verified = Some((generation, valid));
        Ok(valid)
    }

    /// Cached verification outcome for the current state
    #[must_use]
    pub fn verification_state(&self) -> VerificationState {
        match self.verified {
            Some((generation, true)) if generation == self.state.generation() => {
                VerificationState::Valid
            }
            Some((generation, false)) if generation == self.state.generation() => {
                VerificationState::Invalid
            }
            _ => VerificationState::Unknown,
        }
    }

    /// Raw signature bytes
    #[must_use]
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// The base64url signature segment
    #[must_use]
    pub fn encoded_signature(&self) -> String {
        base64url::encode(&self.signature)
    }

    /// Sign, then produce `header.payload.signature`
    ///
    /// # Errors
    /// Any error from [`Self::sign`].
    pub fn compact_serialization(&mut self) -> JoseResult<String> {
        self.sign()?;
        let header = self.state.headers.encoded_header()?;
        let payload = self.encoded_payload();
        let signature = self.encoded_signature();
        JWS_SERIALIZER.serialize(&[Some(&header), Some(&payload), Some(&signature)])
    }

    /// Sign, then produce `header..signature` with the payload left out
    ///
    /// The signature still covers the payload, which the recipient must
    /// supply before verifying.
    ///
    /// # Errors
    /// Any error from [`Self::sign`].
    pub fn detached_content_compact_serialization(&mut self) -> JoseResult<String> {
        self.sign()?;
        let header = self.state.headers.encoded_header()?;
        let signature = self.encoded_signature();
        JWS_SERIALIZER.serialize(&[Some(&header), None, Some(&signature)])
    }
}
