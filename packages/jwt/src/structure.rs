//! State shared by signed and encrypted envelopes, and parsing either one

use crate::api::algorithms::AlgorithmConstraints;
use crate::api::keys::JoseKey;
use crate::headers::{names, Headers};
use crate::jwe::JsonWebEncryption;
use crate::jws::JsonWebSignature;
use jose_common::{JoseConfig, JoseError, JoseResult};

/// Headers, key and policy common to JWS and JWE
///
/// Every mutation bumps `generation` so cached results computed against an
/// older state are recognised as stale.
#[derive(Clone, Debug)]
pub(crate) struct JoseState {
    pub(crate) headers: Headers,
    pub(crate) key: Option<JoseKey>,
    pub(crate) constraints: AlgorithmConstraints,
    pub(crate) do_key_validation: bool,
    pub(crate) known_critical_headers: Vec<String>,
    generation: u64,
}

impl JoseState {
    pub(crate) fn new(constraints: AlgorithmConstraints) -> Self {
        Self {
            headers: Headers::new(),
            key: None,
            constraints,
            do_key_validation: true,
            known_critical_headers: Vec::new(),
            generation: 0,
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub(crate) fn set_header(&mut self, name: &str, value: impl Into<serde_json::Value>) {
        self.headers.set(name, value);
        self.touch();
    }

    pub(crate) fn set_key(&mut self, key: Option<JoseKey>) {
        self.key = key;
        self.touch();
    }

    pub(crate) fn set_constraints(&mut self, constraints: AlgorithmConstraints) {
        self.constraints = constraints;
        self.touch();
    }

    /// The `alg` header value
    pub(crate) fn algorithm_header_value(&self) -> JoseResult<&str> {
        match self.headers.get(names::ALGORITHM) {
            None => Err(JoseError::invalid_algorithm(
                "Encoded JOSE object is missing the alg header.",
            )),
            Some(value) => value.as_str().ok_or_else(|| {
                JoseError::invalid_algorithm(format!(
                    "The alg header value must be a string ({value})."
                ))
            }),
        }
    }

    /// Every name in `crit` must be one this caller declared it understands
    pub(crate) fn check_crit(&self) -> JoseResult<()> {
        let Some(critical) = self.headers.critical_names()? else {
            return Ok(());
        };
        for name in critical {
            if !self.known_critical_headers.iter().any(|known| known == name) {
                return Err(JoseError::UnprocessedCriticalHeader(format!(
                    "Unrecognized header '{name}' marked as critical."
                )));
            }
        }
        Ok(())
    }
}

/// A parsed compact serialization of either kind
#[derive(Debug)]
pub enum JoseObject {
    /// Three part JWS
    Signature(JsonWebSignature),
    /// Five part JWE
    Encryption(JsonWebEncryption),
}

impl JoseObject {
    /// Parse a JWS or JWE, chosen by the number of parts
    ///
    /// # Errors
    /// Returns `JoseError::Format` unless the input has 3 or 5 well formed parts.
    pub fn from_compact_serialization(
        compact_serialization: &str,
        config: JoseConfig,
    ) -> JoseResult<Self> {
        match compact_serialization.split('.').count() {
            3 => JsonWebSignature::from_compact_serialization_with_config(
                compact_serialization,
                config,
            )
            .map(Self::Signature),
            5 => JsonWebEncryption::from_compact_serialization(compact_serialization)
                .map(Self::Encryption),
            count => Err(JoseError::format(format!(
                "Invalid JOSE Compact Serialization. Expecting either 3 or 5 parts for JWS or JWE respectively but was {count}."
            ))),
        }
    }

    /// Header parameters
    #[must_use]
    pub fn headers(&self) -> &Headers {
        match self {
            Self::Signature(jws) => jws.headers(),
            Self::Encryption(jwe) => jwe.headers(),
        }
    }

    /// The `cty` header value
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers().string_value(names::CONTENT_TYPE)
    }

    /// The `alg` header value, without resolving or checking it
    #[must_use]
    pub fn algorithm_header_value(&self) -> Option<&str> {
        self.headers().string_value(names::ALGORITHM)
    }

    /// The `kid` header value
    #[must_use]
    pub fn key_id(&self) -> Option<&str> {
        self.headers().string_value(names::KEY_ID)
    }

    /// Whether this is a JWS
    #[must_use]
    pub fn is_signature(&self) -> bool {
        matches!(self, Self::Signature(_))
    }
}
