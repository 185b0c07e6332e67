//! Error taxonomy shared by every JOSE crate
//!
//! Format, algorithm, key, header, integrity and claim failures are distinct
//! variants so callers can react to them without string matching.

pub mod constructors;
pub mod types;

pub use types::{JoseError, JoseResult, INTEGRITY_FAILURE_MESSAGE};
