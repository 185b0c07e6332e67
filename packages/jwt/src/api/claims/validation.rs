//! Time-based claim validation (`exp`, `iat`, `nbf`)
//!
//! Rules run in order and the first failure wins:
//! 1. a required `exp`, `iat` or `nbf` is missing
//! 2. `evaluation_time - skew >= exp` (expired)
//! 3. `exp < iat`
//! 4. `exp < nbf`
//! 5. `(exp - skew) - evaluation_time` exceeds the maximum future validity
//! 6. `evaluation_time + skew < nbf` (not yet valid)
//!
//! Rules 2 to 5 only apply when `exp` is present, rule 6 only when `nbf` is.

use super::jwt_claims::JwtClaims;
use super::numeric_date::NumericDate;
use super::validator::Validator;
use jose_common::JoseResult;

/// Validates `exp`, `iat` and `nbf` against an evaluation time
#[derive(Clone, Debug, Default)]
pub struct NumericDateValidator {
    require_exp: bool,
    require_iat: bool,
    require_nbf: bool,
    static_evaluation_time: Option<NumericDate>,
    allowed_clock_skew_seconds: u32,
    max_future_validity_minutes: u32,
}

impl NumericDateValidator {
    /// Nothing required, no skew, no future bound, evaluated at the current time
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail when `exp` is absent
    pub fn set_require_exp(&mut self, require: bool) {
        self.require_exp = require;
    }

    /// Fail when `iat` is absent
    pub fn set_require_iat(&mut self, require: bool) {
        self.require_iat = require;
    }

    /// Fail when `nbf` is absent
    pub fn set_require_nbf(&mut self, require: bool) {
        self.require_nbf = require;
    }

    /// Evaluate at a fixed time instead of now
    pub fn set_evaluation_time(&mut self, evaluation_time: Option<NumericDate>) {
        self.static_evaluation_time = evaluation_time;
    }

    /// Leeway applied against `exp` and `nbf`
    pub fn set_allowed_clock_skew_seconds(&mut self, seconds: u32) {
        self.allowed_clock_skew_seconds = seconds;
    }

    /// Upper bound on how far `exp` may be in the future; zero means unbounded
    pub fn set_max_future_validity_minutes(&mut self, minutes: u32) {
        self.max_future_validity_minutes = minutes;
    }

    fn skew_message(&self) -> String {
        if self.allowed_clock_skew_seconds > 0 {
            format!(
                " (even when providing {} seconds of leeway to account for clock skew).",
                self.allowed_clock_skew_seconds
            )
        } else {
            ".".to_string()
        }
    }

    /// Apply the rules to the given dates
    #[must_use]
    pub fn check(
        &self,
        expiration_time: Option<NumericDate>,
        issued_at: Option<NumericDate>,
        not_before: Option<NumericDate>,
    ) -> Option<String> {
        if self.require_exp && expiration_time.is_none() {
            return Some("No Expiration Time (exp) claim present.".to_string());
        }
        if self.require_iat && issued_at.is_none() {
            return Some("No Issued At (iat) claim present.".to_string());
        }
        if self.require_nbf && not_before.is_none() {
            return Some("No Not Before (nbf) claim present.".to_string());
        }

        let evaluation_time = self.static_evaluation_time.unwrap_or_else(NumericDate::now);
        let skew = i64::from(self.allowed_clock_skew_seconds);

        if let Some(exp) = expiration_time {
            if evaluation_time.value().saturating_sub(skew) >= exp.value() {
                return Some(format!(
                    "The JWT is no longer valid - the evaluation time {evaluation_time} is on or after the Expiration Time (exp={exp}) claim value{}",
                    self.skew_message()
                ));
            }

            if let Some(iat) = issued_at {
                if exp.is_before(iat) {
                    return Some(format!(
                        "The Expiration Time (exp={exp}) claim value cannot be before the Issued At (iat={iat}) claim value."
                    ));
                }
            }

            if let Some(nbf) = not_before {
                if exp.is_before(nbf) {
                    return Some(format!(
                        "The Expiration Time (exp={exp}) claim value cannot be before the Not Before (nbf={nbf}) claim value."
                    ));
                }
            }

            if self.max_future_validity_minutes > 0 {
                let delta_seconds = exp
                    .value()
                    .saturating_sub(skew)
                    .saturating_sub(evaluation_time.value());
                if delta_seconds > i64::from(self.max_future_validity_minutes).saturating_mul(60) {
                    return Some(format!(
                        "The Expiration Time (exp={exp}) claim value cannot be more than {} minutes in the future relative to the evaluation time {evaluation_time}{}",
                        self.max_future_validity_minutes,
                        self.skew_message()
                    ));
                }
            }
        }

        if let Some(nbf) = not_before {
            if evaluation_time.value().saturating_add(skew) < nbf.value() {
                return Some(format!(
                    "The JWT is not yet valid as the evaluation time {evaluation_time} is before the Not Before (nbf={nbf}) claim time{}",
                    self.skew_message()
                ));
            }
        }

        None
    }
}

impl Validator for NumericDateValidator {
    fn validate(&self, claims: &JwtClaims) -> JoseResult<Option<String>> {
        Ok(self.check(
            claims.expiration_time()?,
            claims.issued_at()?,
            claims.not_before()?,
        ))
    }
}
