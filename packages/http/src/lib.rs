//! # Remote content fetch
//!
//! A small, resilient HTTP GET used to retrieve remote key material such as
//! JSON Web Key Sets. Transient failures are retried with a bounded backoff;
//! TLS failures, missing resources and oversized bodies are not.
//!
//! ```no_run
//! use jose_http::{Get, SimpleGet};
//!
//! # async fn fetch() -> Result<(), jose_http::FetchError> {
//! let mut get = Get::new();
//! get.set_retries(1);
//! let response = get.get("https://example.com/.well-known/jwks.json").await?;
//! println!("{}", response.body());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod get;
pub mod response;

pub use error::{FetchError, FetchResult};
pub use get::{Get, MAX_RETRY_WAIT};
pub use response::{SimpleGet, SimpleResponse};
