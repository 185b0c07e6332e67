//! # JOSE content encryption
//!
//! Authenticated content encryption for JWE following RFC 7518 section 5.2:
//! AES in CBC mode combined with a truncated HMAC-SHA2 tag.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

/// Content encryption primitives
pub mod cipher;

pub use cipher::{
    generate_content_encryption_key, generate_iv, AesCbcHmacSha2, ContentEncryptionAlgorithm,
    EncryptionResult,
};
