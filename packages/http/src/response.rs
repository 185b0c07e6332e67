//! The fetch contract and its response

use crate::error::FetchResult;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;

/// Anything that can GET a location and return its decoded body
pub trait SimpleGet: Send + Sync {
    /// Fetch `location`
    ///
    /// # Errors
    /// A [`crate::FetchError`] once retries, if any, are exhausted.
    fn get(&self, location: &str) -> impl Future<Output = FetchResult<SimpleResponse>> + Send;
}

/// Status, headers and decoded body of a successful GET
#[derive(Clone)]
pub struct SimpleResponse {
    status_code: u16,
    status_message: String,
    headers: HashMap<String, Vec<String>>,
    body: String,
}

impl SimpleResponse {
    /// Assemble a response; header names are stored lower-cased
    #[must_use]
    pub fn new(
        status_code: u16,
        status_message: impl Into<String>,
        headers: HashMap<String, Vec<String>>,
        body: impl Into<String>,
    ) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, values)| (name.to_ascii_lowercase(), values))
            .collect();
        Self {
            status_code,
            status_message: status_message.into(),
            headers,
            body: body.into(),
        }
    }

    /// HTTP status code
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Reason phrase
    #[must_use]
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Every header, keyed by lower-cased name
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, Vec<String>> {
        &self.headers
    }

    /// Values of one header, matched case-insensitively
    #[must_use]
    pub fn header_values(&self, name: &str) -> &[String] {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map_or(&[], Vec::as_slice)
    }

    /// The decoded body
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl fmt::Debug for SimpleResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleResponse")
            .field("status_code", &self.status_code)
            .field("status_message", &self.status_message)
            .field("headers", &self.headers)
            .field("body_chars", &self.body.chars().count())
            .finish()
    }
}
