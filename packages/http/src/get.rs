//! Resilient GET over `reqwest`
//!
//! Only a 200 response is a success. Failed attempts are retried up to the
//! configured count, waiting between attempts; TLS failures, 404/410 and
//! oversized bodies are returned immediately.

use crate::error::{FetchError, FetchResult};
use crate::response::{SimpleGet, SimpleResponse};
use jose_common::CharEncoding;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Certificate, Client, Proxy, StatusCode, Url};
use std::collections::HashMap;
use std::error::Error as StdError;
use std::time::Duration;

/// Upper bound on a single progressive wait
pub const MAX_RETRY_WAIT: Duration = Duration::from_millis(8000);

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
const DEFAULT_RETRIES: u32 = 3;
const DEFAULT_INITIAL_RETRY_WAIT: Duration = Duration::from_millis(180);
const DEFAULT_BODY_SIZE_LIMIT: i64 = 1024 * 512;

/// Configurable HTTP GET with retries and a body size cap
#[derive(Clone, Debug)]
pub struct Get {
    connect_timeout: Duration,
    read_timeout: Duration,
    retries: u32,
    initial_retry_wait: Duration,
    progressive_retry_wait: bool,
    response_body_size_limit: i64,
    proxy: Option<String>,
    trusted_certificates: Vec<Vec<u8>>,
}

impl Default for Get {
    fn default() -> Self {
        Self::new()
    }
}

impl Get {
    /// 20 s timeouts, 3 retries from 180 ms with doubling waits, 512 KiB
    /// character limit, no proxy, system roots
    #[must_use]
    pub fn new() -> Self {
        Self {
            connect_timeout: DEFAULT_TIMEOUT,
            read_timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            initial_retry_wait: DEFAULT_INITIAL_RETRY_WAIT,
            progressive_retry_wait: true,
            response_body_size_limit: DEFAULT_BODY_SIZE_LIMIT,
            proxy: None,
            trusted_certificates: Vec::new(),
        }
    }

    /// Time allowed to establish a connection
    pub fn set_connect_timeout(&mut self, timeout: Duration) {
        self.connect_timeout = timeout;
    }

    /// Time allowed between reads
    pub fn set_read_timeout(&mut self, timeout: Duration) {
        self.read_timeout = timeout;
    }

    /// Attempts after the first one
    pub fn set_retries(&mut self, retries: u32) {
        self.retries = retries;
    }

    /// Wait before the first retry
    pub fn set_initial_retry_wait(&mut self, wait: Duration) {
        self.initial_retry_wait = wait;
    }

    /// Double the wait on each retry (capped at [`MAX_RETRY_WAIT`]) instead of
    /// waiting the initial time every time
    pub fn set_progressive_retry_wait(&mut self, progressive: bool) {
        self.progressive_retry_wait = progressive;
    }

    /// Body limit in characters; zero or negative disables it
    pub fn set_response_body_size_limit(&mut self, limit: i64) {
        self.response_body_size_limit = limit;
    }

    /// Route requests through `proxy_url`
    pub fn set_http_proxy(&mut self, proxy_url: impl Into<String>) {
        self.proxy = Some(proxy_url.into());
    }

    /// Trust these DER encoded root certificates in addition to the defaults
    pub fn set_trusted_certificates<I>(&mut self, certificates: I)
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        self.trusted_certificates = certificates.into_iter().collect();
    }

    /// Wait before retry number `attempt` (1-based)
    #[must_use]
    pub fn retry_wait(&self, attempt: u32) -> Duration {
        if !self.progressive_retry_wait {
            return self.initial_retry_wait;
        }
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_retry_wait
            .saturating_mul(factor)
            .min(MAX_RETRY_WAIT)
    }

    fn client(&self) -> FetchResult<Client> {
        let mut builder = Client::builder()
            .connect_timeout(self.connect_timeout)
            .read_timeout(self.read_timeout);

        if let Some(proxy) = &self.proxy {
            let proxy = Proxy::all(proxy)
                .map_err(|e| FetchError::Config(format!("invalid proxy '{proxy}': {e}")))?;
            builder = builder.proxy(proxy);
        }
        for der in &self.trusted_certificates {
            let certificate = Certificate::from_der(der)
                .map_err(|e| FetchError::Config(format!("invalid trusted certificate: {e}")))?;
            builder = builder.add_root_certificate(certificate);
        }

        builder
            .build()
            .map_err(|e| FetchError::Config(format!("unable to build HTTP client: {e}")))
    }

    async fn attempt(&self, client: &Client, url: &Url) -> FetchResult<SimpleResponse> {
        let mut response = client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        let message = status.canonical_reason().unwrap_or_default().to_string();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(FetchError::NotFound {
                url: url.to_string(),
            });
        }
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                code: status.as_u16(),
                message,
                url: url.to_string(),
            });
        }

        let encoding = charset(response.headers());
        let headers = header_map(response.headers());
        let byte_limit = self.byte_limit(encoding);

        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| classify(url, e))? {
            bytes.extend_from_slice(&chunk);
            if byte_limit.is_some_and(|limit| bytes.len() > limit) {
                return Err(self.too_large());
            }
        }

        let body = encoding
            .decode(&bytes)
            .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
        let characters = body.chars().count();
        if self.response_body_size_limit > 0
            && i64::try_from(characters).unwrap_or(i64::MAX) > self.response_body_size_limit
        {
            return Err(self.too_large());
        }
        tracing::debug!(characters, charset = encoding.name(), "read response body");

        Ok(SimpleResponse::new(status.as_u16(), message, headers, body))
    }

    /// Bytes that cannot possibly decode to no more than the character limit
    fn byte_limit(&self, encoding: CharEncoding) -> Option<usize> {
        if self.response_body_size_limit <= 0 {
            return None;
        }
        let bytes_per_char = match encoding {
            CharEncoding::Utf8 => 4,
            CharEncoding::Ascii | CharEncoding::Latin1 => 1,
        };
        usize::try_from(self.response_body_size_limit)
            .ok()
            .map(|limit| limit.saturating_mul(bytes_per_char))
    }

    fn too_large(&self) -> FetchError {
        FetchError::ResponseTooLarge {
            limit: self.response_body_size_limit,
        }
    }
}

impl SimpleGet for Get {
    async fn get(&self, location: &str) -> FetchResult<SimpleResponse> {
        tracing::debug!(location, "HTTP GET");
        let url = Url::parse(location).map_err(|e| FetchError::InvalidUrl {
            url: location.to_string(),
            reason: e.to_string(),
        })?;
        let client = self.client()?;

        let mut attempts = 0u32;
        loop {
            match self.attempt(&client, &url).await {
                Ok(response) => {
                    tracing::debug!(%url, status = response.status_code(), "HTTP GET succeeded");
                    return Ok(response);
                }
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) => {
                    attempts += 1;
                    if attempts > self.retries {
                        return Err(err);
                    }
                    let wait = self.retry_wait(attempts);
                    tracing::debug!(
                        wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                        attempt = attempts,
                        retries = self.retries,
                        %url,
                        error = %err,
                        "retrying HTTP GET after failed attempt"
                    );
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }
}

/// Separate TLS failures, which are never retried, from other client errors
fn classify(url: &Url, error: reqwest::Error) -> FetchError {
    if let Some(tls) = find_tls_error(&error) {
        return FetchError::Tls {
            url: url.to_string(),
            reason: tls.to_string(),
        };
    }
    FetchError::Io {
        url: url.to_string(),
        source: error,
    }
}

/// Walk the cause chain for a `rustls::Error`
///
/// `io::Error::source` skips the error it wraps, and the connector nests
/// the TLS error inside more than one `io::Error`, so wrapped errors are
/// followed through `get_ref` as well.
fn find_tls_error(error: &reqwest::Error) -> Option<&rustls::Error> {
    let mut cause: Option<&(dyn StdError + 'static)> = error.source();
    while let Some(current) = cause {
        if let Some(tls) = current.downcast_ref::<rustls::Error>() {
            return Some(tls);
        }
        cause = match current.downcast_ref::<std::io::Error>() {
            Some(io) => match io.get_ref() {
                Some(inner) => Some(inner as &(dyn StdError + 'static)),
                None => current.source(),
            },
            None => current.source(),
        };
    }
    None
}

/// The `charset` parameter of `Content-Type`, UTF-8 when absent or unsupported
fn charset(headers: &HeaderMap) -> CharEncoding {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return CharEncoding::Utf8;
    };
    let declared = content_type
        .replace(' ', "")
        .split(';')
        .find_map(|part| part.strip_prefix("charset=").map(|c| c.trim_matches('"').to_string()));

    match declared {
        None => CharEncoding::Utf8,
        Some(name) => name.parse().unwrap_or_else(|_| {
            tracing::debug!(
                content_type,
                "unsupported charset in Content-Type, using UTF-8"
            );
            CharEncoding::Utf8
        }),
    }
}

fn header_map(headers: &HeaderMap) -> HashMap<String, Vec<String>> {
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        map.entry(name.as_str().to_string()).or_default().push(value);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progressive_waits_double_and_cap() {
        let get = Get::new();
        assert_eq!(get.retry_wait(1), Duration::from_millis(180));
        assert_eq!(get.retry_wait(2), Duration::from_millis(360));
        assert_eq!(get.retry_wait(3), Duration::from_millis(720));
        assert_eq!(get.retry_wait(6), Duration::from_millis(5760));
        assert_eq!(get.retry_wait(7), MAX_RETRY_WAIT);
        assert_eq!(get.retry_wait(40), MAX_RETRY_WAIT);
    }

    #[test]
    fn constant_waits() {
        let mut get = Get::new();
        get.set_progressive_retry_wait(false);
        get.set_initial_retry_wait(Duration::from_millis(50));
        assert_eq!(get.retry_wait(1), Duration::from_millis(50));
        assert_eq!(get.retry_wait(9), Duration::from_millis(50));
    }

    #[test]
    fn charset_from_content_type() {
        let mut headers = HeaderMap::new();
        assert_eq!(charset(&headers), CharEncoding::Utf8);

        headers.insert(CONTENT_TYPE, "application/json; charset=ISO-8859-1".parse().unwrap());
        assert_eq!(charset(&headers), CharEncoding::Latin1);

        headers.insert(CONTENT_TYPE, "text/plain; charset=\"us-ascii\"".parse().unwrap());
        assert_eq!(charset(&headers), CharEncoding::Ascii);

        headers.insert(CONTENT_TYPE, "text/plain; charset=KOI8-R".parse().unwrap());
        assert_eq!(charset(&headers), CharEncoding::Utf8);
    }

    #[test]
    fn byte_limit_depends_on_charset() {
        let mut get = Get::new();
        get.set_response_body_size_limit(10);
        assert_eq!(get.byte_limit(CharEncoding::Utf8), Some(40));
        assert_eq!(get.byte_limit(CharEncoding::Latin1), Some(10));
        get.set_response_body_size_limit(0);
        assert_eq!(get.byte_limit(CharEncoding::Utf8), None);
        get.set_response_body_size_limit(-1);
        assert_eq!(get.byte_limit(CharEncoding::Ascii), None);
    }
}
