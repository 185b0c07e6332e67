//! JSON Web Signature, JSON Web Encryption and JWT processing
//!
//! This crate provides:
//! - Signed envelopes ([`JsonWebSignature`]) with none, HMAC, RSA and ECDSA algorithms
//! - Encrypted envelopes ([`JsonWebEncryption`]) with direct key agreement and
//!   AES-CBC-HMAC-SHA2 content encryption
//! - A process-wide algorithm registry with per-envelope constraints
//! - JWT claims, numeric dates and a pluggable validator chain
//! - [`JwtConsumer`], which unwraps nested tokens and validates the claims
//!
//! ```no_run
//! use jose_jwt::{JoseKey, JsonWebSignature};
//!
//! # fn main() -> jose_common::JoseResult<()> {
//! let mut jws = JsonWebSignature::new();
//! jws.set_payload("{\"sub\":\"alice\"}")?;
//! jws.set_algorithm_header_value("HS256");
//! jws.set_key(JoseKey::symmetric(vec![7u8; 32]));
//! let token = jws.compact_serialization()?;
//!
//! let mut received = JsonWebSignature::from_compact_serialization(&token)?;
//! received.set_key(JoseKey::symmetric(vec![7u8; 32]));
//! assert_eq!(received.payload()?, "{\"sub\":\"alice\"}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod api;
pub mod consumer;
pub mod headers;
pub mod jwe;
pub mod jws;
mod structure;

pub use api::algorithms::{
    identifiers, AlgorithmConstraints, AlgorithmFactories, AlgorithmFactory, ConstraintType,
    JwsAlgorithm, KeyManagementAlgorithm,
};
pub use api::claims::{
    AudValidator, IssValidator, JtiValidator, JwtClaims, NumericDate, NumericDateValidator,
    SubValidator, Validator,
};
pub use api::keys::JoseKey;
pub use consumer::{JwtConsumer, JwtConsumerBuilder, JwtContext};
pub use headers::Headers;
pub use jwe::JsonWebEncryption;
pub use jws::{JsonWebSignature, VerificationState};
pub use structure::JoseObject;

pub use jose_common::{JoseConfig, JoseError, JoseResult};
