//! Processing a compact JWT: unwrap, verify, decrypt, validate

use super::context::JwtContext;
use crate::api::algorithms::{identifiers, AlgorithmConstraints};
use crate::api::claims::{JwtClaims, Validator};
use crate::api::keys::JoseKey;
use crate::structure::JoseObject;
use jose_common::{JoseConfig, JoseError, JoseResult};

/// A nested JWT is marked with a `cty` of `JWT`
fn is_nested_jwt(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|cty| {
        cty.eq_ignore_ascii_case("JWT") || cty.eq_ignore_ascii_case("application/jwt")
    })
}

/// Consumes JWTs according to the policy fixed by [`super::JwtConsumerBuilder`]
pub struct JwtConsumer {
    pub(super) config: JoseConfig,
    pub(super) verification_key: Option<JoseKey>,
    pub(super) decryption_key: Option<JoseKey>,
    pub(super) jws_constraints: Option<AlgorithmConstraints>,
    pub(super) jwe_constraints: Option<AlgorithmConstraints>,
    pub(super) jwe_content_encryption_constraints: Option<AlgorithmConstraints>,
    pub(super) require_signature: bool,
    pub(super) require_encryption: bool,
    pub(super) skip_signature_verification: bool,
    pub(super) relax_verification_key_validation: bool,
    pub(super) relax_decryption_key_validation: bool,
    pub(super) skip_all_validators: bool,
    pub(super) known_critical_headers: Vec<String>,
    pub(super) validators: Vec<Box<dyn Validator>>,
}

impl JwtConsumer {
    /// Process `jwt` and return its validated claims
    ///
    /// # Errors
    /// See [`Self::process`].
    pub fn process_to_claims(&self, jwt: &str) -> JoseResult<JwtClaims> {
        self.process(jwt).map(JwtContext::into_jwt_claims)
    }

    /// Unwrap every nested envelope of `jwt`, then validate the claims
    ///
    /// # Errors
    /// Format, algorithm, key and integrity errors from the envelopes as they
    /// are raised; `JoseError::InvalidJwt` for a bad signature, a missing
    /// signature or encryption, and for the collected validator failures.
    pub fn process(&self, jwt: &str) -> JoseResult<JwtContext> {
        let mut jose_objects = Vec::new();
        let mut current = jwt.to_string();
        let mut has_signature = false;
        let mut has_encryption = false;

        let claims = loop {
            let mut jose_object = JoseObject::from_compact_serialization(&current, self.config)?;
            let payload = match &mut jose_object {
                JoseObject::Signature(jws) => {
                    let unsecured = jws.algorithm_header_value() == Some(identifiers::NONE);
                    match &self.jws_constraints {
                        Some(constraints) => jws.set_algorithm_constraints(constraints.clone()),
                        None if unsecured && !self.require_signature => {
                            jws.set_algorithm_constraints(AlgorithmConstraints::NO_CONSTRAINTS);
                        }
                        None => {}
                    }
                    jws.set_known_critical_headers(self.known_critical_headers.iter().cloned());
                    if !self.skip_signature_verification {
                        let key = if unsecured {
                            None
                        } else {
                            self.verification_key.clone()
                        };
                        jws.set_key(key);
                        jws.set_do_key_validation(!self.relax_verification_key_validation);
                        if !jws.verify_signature()? {
                            return Err(JoseError::invalid_jwt(format!(
                                "JWS signature is invalid: {current}"
                            )));
                        }
                    }
                    has_signature |= !unsecured;
                    jws.unverified_payload()?
                }
                JoseObject::Encryption(jwe) => {
                    if let Some(constraints) = &self.jwe_constraints {
                        jwe.set_algorithm_constraints(constraints.clone());
                    }
                    if let Some(constraints) = &self.jwe_content_encryption_constraints {
                        jwe.set_content_encryption_algorithm_constraints(constraints.clone());
                    }
                    jwe.set_known_critical_headers(self.known_critical_headers.iter().cloned());
                    jwe.set_key(self.decryption_key.clone());
                    jwe.set_do_key_validation(!self.relax_decryption_key_validation);
                    has_encryption = true;
                    jwe.plaintext()?
                }
            };

            let nested = is_nested_jwt(jose_object.content_type());
            jose_objects.push(jose_object);
            if nested {
                tracing::debug!(depth = jose_objects.len(), "unwrapping nested JWT");
                current = payload;
            } else {
                break JwtClaims::parse(&payload)?;
            }
        };

        if self.require_signature && !has_signature {
            return Err(JoseError::invalid_jwt(format!(
                "The JWT has no signature but the JWT Consumer is configured to require one: {jwt}"
            )));
        }
        if self.require_encryption && !has_encryption {
            return Err(JoseError::invalid_jwt(format!(
                "The JWT has no encryption but the JWT Consumer is configured to require it: {jwt}"
            )));
        }

        jose_objects.reverse();
        let context = JwtContext::new(jwt.to_string(), claims, jose_objects);
        self.validate(context.jwt_claims())?;
        Ok(context)
    }

    /// Run every validator and report all failures together
    ///
    /// # Errors
    /// `JoseError::InvalidJwt` listing each failure in validator order.
    pub fn validate(&self, claims: &JwtClaims) -> JoseResult<()> {
        if self.skip_all_validators {
            return Ok(());
        }

        let details: Vec<String> = self
            .validators
            .iter()
            .filter_map(|validator| match validator.validate(claims) {
                Ok(reason) => reason,
                Err(err) => Some(err.to_string()),
            })
            .collect();

        if details.is_empty() {
            return Ok(());
        }
        tracing::debug!(
            claims = %claims.to_json(),
            failures = details.len(),
            "JWT rejected due to invalid claims"
        );
        Err(JoseError::InvalidJwt { details })
    }
}
