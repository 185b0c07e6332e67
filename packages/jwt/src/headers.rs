//! JOSE header parameters and their encoded form

use jose_common::{base64url, JoseError, JoseResult};
use serde_json::{Map, Value};

/// Header parameter names
pub mod names {
    /// Algorithm
    pub const ALGORITHM: &str = "alg";
    /// Content encryption method
    pub const ENCRYPTION_METHOD: &str = "enc";
    /// Key identifier
    pub const KEY_ID: &str = "kid";
    /// Media type of the complete envelope
    pub const TYPE: &str = "typ";
    /// Media type of the secured content
    pub const CONTENT_TYPE: &str = "cty";
    /// Extensions that must be understood
    pub const CRITICAL: &str = "crit";
}

/// Header parameters with a cached base64url encoding
///
/// A header parsed from the wire keeps its original encoding, which is what
/// signatures and AAD were computed over. Any change re-encodes on demand.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Headers {
    params: Map<String, Value>,
    encoded: Option<String>,
}

impl Headers {
    /// No parameters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the first segment of a compact serialization
    ///
    /// # Errors
    /// Returns `JoseError::Format` for bad base64url and `JoseError::Json`
    /// when the header is not a JSON object.
    pub fn from_encoded(encoded: &str) -> JoseResult<Self> {
        let bytes = base64url::decode(encoded)?;
        let params = match serde_json::from_slice::<Value>(&bytes)? {
            Value::Object(params) => params,
            other => {
                return Err(JoseError::Json(format!(
                    "JOSE header is not a JSON object: {other}"
                )))
            }
        };
        Ok(Self {
            params,
            encoded: Some(encoded.to_string()),
        })
    }

    /// The base64url header segment
    ///
    /// # Errors
    /// Returns `JoseError::Json` if the parameters cannot be serialized.
    pub fn encoded_header(&self) -> JoseResult<String> {
        match &self.encoded {
            Some(encoded) => Ok(encoded.clone()),
            None => Ok(base64url::encode(self.full_header_as_json()?)),
        }
    }

    /// The header as JSON text
    ///
    /// # Errors
    /// Returns `JoseError::Json` if the parameters cannot be serialized.
    pub fn full_header_as_json(&self) -> JoseResult<String> {
        Ok(serde_json::to_string(&self.params)?)
    }

    /// Set a parameter
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.params.insert(name.to_string(), value.into());
        self.encoded = None;
    }

    /// Remove a parameter
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let removed = self.params.remove(name);
        if removed.is_some() {
            self.encoded = None;
        }
        removed
    }

    /// Raw parameter value
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// Parameter value if it is a string
    #[must_use]
    pub fn string_value(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(Value::as_str)
    }

    /// Whether the parameter is present
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// All parameters
    #[must_use]
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Names listed in `crit`, if present
    ///
    /// # Errors
    /// Returns `JoseError::Format` when `crit` is not an array of strings.
    pub fn critical_names(&self) -> JoseResult<Option<Vec<&str>>> {
        let Some(crit) = self.params.get(names::CRITICAL) else {
            return Ok(None);
        };
        let Value::Array(entries) = crit else {
            return Err(JoseError::format(format!(
                "{} header value not an array ({crit}).",
                names::CRITICAL
            )));
        };
        entries
            .iter()
            .map(|entry| {
                entry.as_str().ok_or_else(|| {
                    JoseError::format(format!(
                        "{} header value contains a non-string entry ({entry}).",
                        names::CRITICAL
                    ))
                })
            })
            .collect::<JoseResult<Vec<&str>>>()
            .map(Some)
    }
}
