//! The JWT Claims Set

use super::numeric_date::NumericDate;
use jose_common::{base64url, JoseError, JoseResult};
use rand::{rng, RngCore};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Registered claim names
pub mod names {
    /// Issuer
    pub const ISSUER: &str = "iss";
    /// Subject
    pub const SUBJECT: &str = "sub";
    /// Audience
    pub const AUDIENCE: &str = "aud";
    /// Expiration time
    pub const EXPIRATION_TIME: &str = "exp";
    /// Not before
    pub const NOT_BEFORE: &str = "nbf";
    /// Issued at
    pub const ISSUED_AT: &str = "iat";
    /// JWT ID
    pub const JWT_ID: &str = "jti";
}

const GENERATED_JWT_ID_BYTES: usize = 16;

/// Claims as a JSON object, with typed access to the registered ones
///
/// Typed getters fail with `JoseError::MalformedClaim` when a claim is
/// present with the wrong JSON type; an absent claim is `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JwtClaims {
    claims: Map<String, Value>,
}

impl JwtClaims {
    /// No claims
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object
    ///
    /// # Errors
    /// Returns `JoseError::Json` if the text is not a JSON object.
    pub fn parse(json: &str) -> JoseResult<Self> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(claims) => Ok(Self { claims }),
            other => Err(JoseError::Json(format!(
                "The JWT Claims Set must be a JSON object but was {other}"
            ))),
        }
    }

    /// Serialize to JSON text
    #[must_use]
    pub fn to_json(&self) -> String {
        Value::Object(self.claims.clone()).to_string()
    }

    /// All claims
    #[must_use]
    pub fn claims_map(&self) -> &Map<String, Value> {
        &self.claims
    }

    /// Claim names present
    pub fn claim_names(&self) -> impl Iterator<Item = &str> {
        self.claims.keys().map(String::as_str)
    }

    /// Raw claim value
    #[must_use]
    pub fn claim_value(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// Whether the claim is present
    #[must_use]
    pub fn has_claim(&self, name: &str) -> bool {
        self.claims.contains_key(name)
    }

    /// Set any claim
    pub fn set_claim(&mut self, name: &str, value: impl Into<Value>) {
        self.claims.insert(name.to_string(), value.into());
    }

    /// Remove a claim
    pub fn unset_claim(&mut self, name: &str) -> Option<Value> {
        self.claims.remove(name)
    }

    fn malformed(name: &str, value: &Value, expected: &str) -> JoseError {
        JoseError::malformed_claim(format!(
            "The value of the '{name}' claim is not the expected type ({value} - expected {expected})"
        ))
    }

    /// A claim that must be a string if present
    ///
    /// # Errors
    /// `MalformedClaim` if the claim is not a string.
    pub fn string_claim_value(&self, name: &str) -> JoseResult<Option<&str>> {
        match self.claims.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(Self::malformed(name, other, "a string")),
        }
    }

    /// A claim that must be a string or an array of strings if present
    ///
    /// # Errors
    /// `MalformedClaim` for any other shape.
    pub fn string_list_claim_value(&self, name: &str) -> JoseResult<Vec<&str>> {
        match self.claims.get(name) {
            None => Ok(Vec::new()),
            Some(Value::String(s)) => Ok(vec![s.as_str()]),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .ok_or_else(|| Self::malformed(name, item, "an array of strings"))
                })
                .collect(),
            Some(other) => Err(Self::malformed(name, other, "a string or array of strings")),
        }
    }

    /// A numeric date claim; fractional seconds are truncated
    ///
    /// # Errors
    /// `MalformedClaim` if the claim is not a number.
    pub fn numeric_date_claim_value(&self, name: &str) -> JoseResult<Option<NumericDate>> {
        match self.claims.get(name) {
            None => Ok(None),
            Some(Value::Number(number)) => number_to_seconds(number)
                .map(|seconds| Some(NumericDate::from_seconds(seconds)))
                .ok_or_else(|| {
                    Self::malformed(name, &Value::Number(number.clone()), "a numeric date")
                }),
            Some(other) => Err(Self::malformed(name, other, "a numeric date")),
        }
    }

    /// `iss`
    ///
    /// # Errors
    /// `MalformedClaim` if not a string.
    pub fn issuer(&self) -> JoseResult<Option<&str>> {
        self.string_claim_value(names::ISSUER)
    }

    /// Set `iss`
    pub fn set_issuer(&mut self, issuer: &str) {
        self.set_claim(names::ISSUER, issuer);
    }

    /// `sub`
    ///
    /// # Errors
    /// `MalformedClaim` if not a string.
    pub fn subject(&self) -> JoseResult<Option<&str>> {
        self.string_claim_value(names::SUBJECT)
    }

    /// Set `sub`
    pub fn set_subject(&mut self, subject: &str) {
        self.set_claim(names::SUBJECT, subject);
    }

    /// `aud` as a list, empty when absent
    ///
    /// # Errors
    /// `MalformedClaim` unless a string or an array of strings.
    pub fn audience(&self) -> JoseResult<Vec<&str>> {
        self.string_list_claim_value(names::AUDIENCE)
    }

    /// Whether `aud` is present
    #[must_use]
    pub fn has_audience(&self) -> bool {
        self.has_claim(names::AUDIENCE)
    }

    /// Set `aud`; a single audience is written as a plain string
    pub fn set_audience<I, S>(&mut self, audience: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut audience: Vec<String> = audience.into_iter().map(Into::into).collect();
        if audience.len() == 1 {
            let single = audience.remove(0);
            self.set_claim(names::AUDIENCE, single);
        } else {
            self.set_claim(names::AUDIENCE, audience);
        }
    }

    /// `exp`
    ///
    /// # Errors
    /// `MalformedClaim` if not a number.
    pub fn expiration_time(&self) -> JoseResult<Option<NumericDate>> {
        self.numeric_date_claim_value(names::EXPIRATION_TIME)
    }

    /// Set `exp`
    pub fn set_expiration_time(&mut self, when: NumericDate) {
        self.set_numeric_date_claim(names::EXPIRATION_TIME, when);
    }

    /// Set `exp` to `minutes` from now
    pub fn set_expiration_time_minutes_in_the_future(&mut self, minutes: f64) {
        self.set_expiration_time(offset_from_now(minutes));
    }

    /// `nbf`
    ///
    /// # Errors
    /// `MalformedClaim` if not a number.
    pub fn not_before(&self) -> JoseResult<Option<NumericDate>> {
        self.numeric_date_claim_value(names::NOT_BEFORE)
    }

    /// Set `nbf`
    pub fn set_not_before(&mut self, when: NumericDate) {
        self.set_numeric_date_claim(names::NOT_BEFORE, when);
    }

    /// Set `nbf` to `minutes` ago
    pub fn set_not_before_minutes_in_the_past(&mut self, minutes: f64) {
        self.set_not_before(offset_from_now(-minutes));
    }

    /// `iat`
    ///
    /// # Errors
    /// `MalformedClaim` if not a number.
    pub fn issued_at(&self) -> JoseResult<Option<NumericDate>> {
        self.numeric_date_claim_value(names::ISSUED_AT)
    }

    /// Set `iat`
    pub fn set_issued_at(&mut self, when: NumericDate) {
        self.set_numeric_date_claim(names::ISSUED_AT, when);
    }

    /// Set `iat` to the current time
    pub fn set_issued_at_to_now(&mut self) {
        self.set_issued_at(NumericDate::now());
    }

    /// `jti`
    ///
    /// # Errors
    /// `MalformedClaim` if not a string.
    pub fn jwt_id(&self) -> JoseResult<Option<&str>> {
        self.string_claim_value(names::JWT_ID)
    }

    /// Set `jti`
    pub fn set_jwt_id(&mut self, jwt_id: &str) {
        self.set_claim(names::JWT_ID, jwt_id);
    }

    /// Set `jti` to a fresh random value
    pub fn set_generated_jwt_id(&mut self) {
        let mut bytes = [0u8; GENERATED_JWT_ID_BYTES];
        rng().fill_bytes(&mut bytes);
        self.set_jwt_id(&base64url::encode(bytes));
    }

    fn set_numeric_date_claim(&mut self, name: &str, when: NumericDate) {
        self.set_claim(name, when.value());
    }
}

fn offset_from_now(minutes: f64) -> NumericDate {
    // Saturating float to int conversion; NaN becomes zero.
    #[allow(clippy::cast_possible_truncation)]
    let seconds = (minutes * 60.0).round() as i64;
    NumericDate::now().add_seconds(seconds)
}

#[allow(clippy::cast_possible_truncation)]
fn number_to_seconds(number: &Number) -> Option<i64> {
    number
        .as_i64()
        .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
}
