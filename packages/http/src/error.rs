//! Fetch failures, classified as retryable or terminal

use thiserror::Error;

/// Result alias for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

/// Why a GET failed
#[derive(Error, Debug)]
pub enum FetchError {
    /// The location could not be parsed as a URL
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected location
        url: String,
        /// Parser message
        reason: String,
    },

    /// The client could not be configured (bad proxy or certificate)
    #[error("HTTP client configuration error: {0}")]
    Config(String),

    /// TLS handshake or peer verification failed
    #[error("TLS failure fetching {url}: {reason}")]
    Tls {
        /// Requested URL
        url: String,
        /// TLS error text
        reason: String,
    },

    /// 404 or 410
    #[error("{url} was not found")]
    NotFound {
        /// Requested URL
        url: String,
    },

    /// The body exceeded the configured character limit
    #[error("More than {limit} characters have been read from the response body.")]
    ResponseTooLarge {
        /// The limit in characters
        limit: i64,
    },

    /// Any status other than 200
    #[error("Non 200 status code ({code} {message}) returned from {url}")]
    Status {
        /// Status code
        code: u16,
        /// Reason phrase
        message: String,
        /// Requested URL
        url: String,
    },

    /// Connection, timeout or transfer failure
    #[error("I/O failure fetching {url}: {source}")]
    Io {
        /// Requested URL
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Whether another attempt could succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Status { .. } | Self::Io { .. })
    }
}
