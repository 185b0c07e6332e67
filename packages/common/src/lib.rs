//! Shared building blocks for the JOSE crates
//!
//! This crate provides:
//! - The error taxonomy used by every envelope operation
//! - Unpadded base64url helpers
//! - Compact serialization of period separated segments
//! - Payload character encodings
//! - The base `Algorithm` capability and explicit configuration

#![forbid(unsafe_code)]

pub mod algorithm;
pub mod base64url;
pub mod charset;
pub mod compact;
pub mod config;
pub mod error;

pub use algorithm::{Algorithm, KeyPersuasion};
pub use charset::CharEncoding;
pub use compact::CompactSerializer;
pub use config::JoseConfig;
pub use error::{JoseError, JoseResult, INTEGRITY_FAILURE_MESSAGE};
