//! Pluggable claim validators
//!
//! A validator returns `Ok(None)` when the claims pass and `Ok(Some(reason))`
//! with a human readable reason when they do not. `Err` is reserved for
//! claims that cannot be read at all, such as a claim of the wrong type.

use super::jwt_claims::JwtClaims;
use jose_common::JoseResult;

/// One rule applied to a parsed claims set
pub trait Validator: Send + Sync {
    /// Check `claims`
    ///
    /// # Errors
    /// `JoseError::MalformedClaim` when a claim the rule reads has the wrong type.
    fn validate(&self, claims: &JwtClaims) -> JoseResult<Option<String>>;
}

impl<F> Validator for F
where
    F: Fn(&JwtClaims) -> JoseResult<Option<String>> + Send + Sync,
{
    fn validate(&self, claims: &JwtClaims) -> JoseResult<Option<String>> {
        self(claims)
    }
}

/// Checks `iss` against the accepted issuers
#[derive(Clone, Debug, Default)]
pub struct IssValidator {
    expected_issuers: Option<Vec<String>>,
    require_issuer: bool,
}

impl IssValidator {
    /// Accept only `expected` (any issuer when `None`)
    #[must_use]
    pub fn new(expected: Option<Vec<String>>, require_issuer: bool) -> Self {
        Self {
            expected_issuers: expected,
            require_issuer,
        }
    }
}

impl Validator for IssValidator {
    fn validate(&self, claims: &JwtClaims) -> JoseResult<Option<String>> {
        let Some(issuer) = claims.issuer()? else {
            if !self.require_issuer {
                return Ok(None);
            }
            return Ok(Some(match &self.expected_issuers {
                Some(expected) => {
                    format!("No Issuer (iss) claim present but was expecting {expected:?}")
                }
                None => "No Issuer (iss) claim present.".to_string(),
            }));
        };
        match &self.expected_issuers {
            Some(expected) if !expected.iter().any(|e| e == issuer) => Ok(Some(format!(
                "Issuer (iss) claim value ({issuer}) doesn't match expected value of {}",
                expected.join(", ")
            ))),
            _ => Ok(None),
        }
    }
}

/// Checks that `aud` names at least one acceptable audience
///
/// An `aud` claim that is present when no audience is expected fails too,
/// unless the check was skipped when building the consumer.
#[derive(Clone, Debug, Default)]
pub struct AudValidator {
    acceptable_audiences: Vec<String>,
    require_audience_claim: bool,
}

impl AudValidator {
    /// Accept any of `acceptable_audiences`
    #[must_use]
    pub fn new(acceptable_audiences: Vec<String>, require_audience_claim: bool) -> Self {
        Self {
            acceptable_audiences,
            require_audience_claim,
        }
    }
}

impl Validator for AudValidator {
    fn validate(&self, claims: &JwtClaims) -> JoseResult<Option<String>> {
        if !claims.has_audience() {
            return Ok(self
                .require_audience_claim
                .then(|| "No Audience (aud) claim present.".to_string()));
        }

        let audiences = claims.audience()?;
        if audiences
            .iter()
            .any(|aud| self.acceptable_audiences.iter().any(|ok| ok == aud))
        {
            return Ok(None);
        }

        let reason = if self.acceptable_audiences.is_empty() {
            format!(
                "Audience (aud) claim {audiences:?} present in the JWT but no expected audience value(s) were provided to the JWT Consumer."
            )
        } else {
            format!(
                "Audience (aud) claim {audiences:?} doesn't contain an acceptable identifier. Expected one of {:?} as an aud value.",
                self.acceptable_audiences
            )
        };
        Ok(Some(reason))
    }
}

/// Checks `sub`
#[derive(Clone, Debug, Default)]
pub struct SubValidator {
    require_subject: bool,
    expected_subject: Option<String>,
}

impl SubValidator {
    /// Optionally require `sub`, and optionally pin its value
    #[must_use]
    pub fn new(require_subject: bool, expected_subject: Option<String>) -> Self {
        Self {
            require_subject,
            expected_subject,
        }
    }
}

impl Validator for SubValidator {
    fn validate(&self, claims: &JwtClaims) -> JoseResult<Option<String>> {
        match (claims.subject()?, &self.expected_subject) {
            (None, _) if self.require_subject || self.expected_subject.is_some() => {
                Ok(Some("No Subject (sub) claim is present.".to_string()))
            }
            (Some(subject), Some(expected)) if subject != expected => Ok(Some(format!(
                "Subject (sub) claim value ({subject}) doesn't match expected value of {expected}"
            ))),
            _ => Ok(None),
        }
    }
}

/// Checks that `jti` is present when required
#[derive(Clone, Debug, Default)]
pub struct JtiValidator {
    require_jti: bool,
}

impl JtiValidator {
    /// Optionally require `jti`
    #[must_use]
    pub fn new(require_jti: bool) -> Self {
        Self { require_jti }
    }
}

impl Validator for JtiValidator {
    fn validate(&self, claims: &JwtClaims) -> JoseResult<Option<String>> {
        let jti = claims.jwt_id()?;
        if jti.is_none() && self.require_jti {
            return Ok(Some("The JWT ID (jti) claim is not present.".to_string()));
        }
        Ok(None)
    }
}
