//! Configuring a [`JwtConsumer`]

use super::jwt_consumer::JwtConsumer;
use crate::api::algorithms::AlgorithmConstraints;
use crate::api::claims::{
    AudValidator, IssValidator, JtiValidator, NumericDate, NumericDateValidator, SubValidator,
    Validator,
};
use crate::api::keys::JoseKey;
use jose_common::JoseConfig;

/// Builder for [`JwtConsumer`]
///
/// Defaults: a signature is required, `aud` is checked (so a token with an
/// `aud` claim is rejected until an expected audience is set), `exp`, `iat`
/// and `nbf` are checked when present.
pub struct JwtConsumerBuilder {
    config: JoseConfig,
    verification_key: Option<JoseKey>,
    decryption_key: Option<JoseKey>,
    jws_constraints: Option<AlgorithmConstraints>,
    jwe_constraints: Option<AlgorithmConstraints>,
    jwe_content_encryption_constraints: Option<AlgorithmConstraints>,
    require_signature: bool,
    require_encryption: bool,
    skip_signature_verification: bool,
    relax_verification_key_validation: bool,
    relax_decryption_key_validation: bool,
    skip_all_validators: bool,
    skip_default_audience_validation: bool,
    expected_audience: Option<(Vec<String>, bool)>,
    expected_issuer: Option<(Option<Vec<String>>, bool)>,
    require_subject: bool,
    expected_subject: Option<String>,
    require_jwt_id: bool,
    date_validator: NumericDateValidator,
    known_critical_headers: Vec<String>,
    custom_validators: Vec<Box<dyn Validator>>,
}

impl Default for JwtConsumerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl JwtConsumerBuilder {
    /// Builder with secure defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: JoseConfig::default(),
            verification_key: None,
            decryption_key: None,
            jws_constraints: None,
            jwe_constraints: None,
            jwe_content_encryption_constraints: None,
            require_signature: true,
            require_encryption: false,
            skip_signature_verification: false,
            relax_verification_key_validation: false,
            relax_decryption_key_validation: false,
            skip_all_validators: false,
            skip_default_audience_validation: false,
            expected_audience: None,
            expected_issuer: None,
            require_subject: false,
            expected_subject: None,
            require_jwt_id: false,
            date_validator: NumericDateValidator::new(),
            known_critical_headers: Vec::new(),
            custom_validators: Vec::new(),
        }
    }

    /// Configuration handed to every parsed JWS
    #[must_use]
    pub fn with_config(mut self, config: JoseConfig) -> Self {
        self.config = config;
        self
    }

    /// Key used to verify JWS signatures
    #[must_use]
    pub fn with_verification_key(mut self, key: JoseKey) -> Self {
        self.verification_key = Some(key);
        self
    }

    /// Key used to decrypt JWEs
    #[must_use]
    pub fn with_decryption_key(mut self, key: JoseKey) -> Self {
        self.decryption_key = Some(key);
        self
    }

    /// Policy for JWS `alg`
    #[must_use]
    pub fn with_jws_algorithm_constraints(mut self, constraints: AlgorithmConstraints) -> Self {
        self.jws_constraints = Some(constraints);
        self
    }

    /// Policy for JWE `alg`
    #[must_use]
    pub fn with_jwe_algorithm_constraints(mut self, constraints: AlgorithmConstraints) -> Self {
        self.jwe_constraints = Some(constraints);
        self
    }

    /// Policy for JWE `enc`
    #[must_use]
    pub fn with_jwe_content_encryption_algorithm_constraints(
        mut self,
        constraints: AlgorithmConstraints,
    ) -> Self {
        self.jwe_content_encryption_constraints = Some(constraints);
        self
    }

    /// Accept tokens with no signature (or `alg` `none`)
    #[must_use]
    pub fn disable_require_signature(mut self) -> Self {
        self.require_signature = false;
        self
    }

    /// Reject tokens that are not encrypted
    #[must_use]
    pub fn enable_require_encryption(mut self) -> Self {
        self.require_encryption = true;
        self
    }

    /// Do not verify signatures at all
    #[must_use]
    pub fn skip_signature_verification(mut self) -> Self {
        self.skip_signature_verification = true;
        self
    }

    /// Skip strength checks on the verification key
    #[must_use]
    pub fn relax_verification_key_validation(mut self) -> Self {
        self.relax_verification_key_validation = true;
        self
    }

    /// Skip strength checks on the decryption key
    #[must_use]
    pub fn relax_decryption_key_validation(mut self) -> Self {
        self.relax_decryption_key_validation = true;
        self
    }

    /// Run no claim validators
    #[must_use]
    pub fn skip_all_validators(mut self) -> Self {
        self.skip_all_validators = true;
        self
    }

    /// Do not check `aud` unless an expected audience is set
    #[must_use]
    pub fn skip_default_audience_validation(mut self) -> Self {
        self.skip_default_audience_validation = true;
        self
    }

    /// Accept tokens whose `aud` contains one of `audience`, and require `aud`
    #[must_use]
    pub fn with_expected_audience<I, S>(self, audience: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_expected_audience_required(true, audience)
    }

    /// Accept tokens whose `aud` contains one of `audience`
    #[must_use]
    pub fn with_expected_audience_required<I, S>(mut self, require: bool, audience: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected_audience = Some((audience.into_iter().map(Into::into).collect(), require));
        self
    }

    /// Require `iss` to equal `issuer`
    #[must_use]
    pub fn with_expected_issuer(mut self, issuer: &str) -> Self {
        self.expected_issuer = Some((Some(vec![issuer.to_string()]), true));
        self
    }

    /// Accept any of `issuers` (any issuer when `None`), optionally requiring `iss`
    #[must_use]
    pub fn with_expected_issuers(mut self, require: bool, issuers: Option<Vec<String>>) -> Self {
        self.expected_issuer = Some((issuers, require));
        self
    }

    /// Require `sub`
    #[must_use]
    pub fn require_subject(mut self) -> Self {
        self.require_subject = true;
        self
    }

    /// Require `sub` to equal `subject`
    #[must_use]
    pub fn with_expected_subject(mut self, subject: &str) -> Self {
        self.expected_subject = Some(subject.to_string());
        self
    }

    /// Require `jti`
    #[must_use]
    pub fn require_jwt_id(mut self) -> Self {
        self.require_jwt_id = true;
        self
    }

    /// Require `exp`
    #[must_use]
    pub fn require_expiration_time(mut self) -> Self {
        self.date_validator.set_require_exp(true);
        self
    }

    /// Require `iat`
    #[must_use]
    pub fn require_issued_at(mut self) -> Self {
        self.date_validator.set_require_iat(true);
        self
    }

    /// Require `nbf`
    #[must_use]
    pub fn require_not_before(mut self) -> Self {
        self.date_validator.set_require_nbf(true);
        self
    }

    /// Leeway for `exp` and `nbf`
    #[must_use]
    pub fn with_allowed_clock_skew_seconds(mut self, seconds: u32) -> Self {
        self.date_validator.set_allowed_clock_skew_seconds(seconds);
        self
    }

    /// Reject `exp` values further than `minutes` ahead
    #[must_use]
    pub fn with_max_future_validity_minutes(mut self, minutes: u32) -> Self {
        self.date_validator.set_max_future_validity_minutes(minutes);
        self
    }

    /// Validate dates as of `evaluation_time` instead of now
    #[must_use]
    pub fn with_evaluation_time(mut self, evaluation_time: NumericDate) -> Self {
        self.date_validator.set_evaluation_time(Some(evaluation_time));
        self
    }

    /// Header names understood when listed in `crit`
    #[must_use]
    pub fn with_known_critical_headers<I, S>(mut self, header_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_critical_headers = header_names.into_iter().map(Into::into).collect();
        self
    }

    /// Add a validator run after the built-in ones
    #[must_use]
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.custom_validators.push(Box::new(validator));
        self
    }

    /// Finish
    #[must_use]
    pub fn build(self) -> JwtConsumer {
        let mut validators: Vec<Box<dyn Validator>> = Vec::new();

        match self.expected_audience {
            Some((audience, require)) => {
                validators.push(Box::new(AudValidator::new(audience, require)));
            }
            None if !self.skip_default_audience_validation => {
                validators.push(Box::new(AudValidator::new(Vec::new(), false)));
            }
            None => {}
        }
        if let Some((issuers, require)) = self.expected_issuer {
            validators.push(Box::new(IssValidator::new(issuers, require)));
        }
        validators.push(Box::new(self.date_validator));
        if self.require_subject || self.expected_subject.is_some() {
            validators.push(Box::new(SubValidator::new(
                self.require_subject,
                self.expected_subject,
            )));
        }
        if self.require_jwt_id {
            validators.push(Box::new(JtiValidator::new(true)));
        }
        validators.extend(self.custom_validators);

        JwtConsumer {
            config: self.config,
            verification_key: self.verification_key,
            decryption_key: self.decryption_key,
            jws_constraints: self.jws_constraints,
            jwe_constraints: self.jwe_constraints,
            jwe_content_encryption_constraints: self.jwe_content_encryption_constraints,
            require_signature: self.require_signature,
            require_encryption: self.require_encryption,
            skip_signature_verification: self.skip_signature_verification,
            relax_verification_key_validation: self.relax_verification_key_validation,
            relax_decryption_key_validation: self.relax_decryption_key_validation,
            skip_all_validators: self.skip_all_validators,
            known_critical_headers: self.known_critical_headers,
            validators,
        }
    }
}
