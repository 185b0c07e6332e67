//! Explicit configuration for envelope processing
//!
//! Both switches weaken security and default to off. They are passed to the
//! envelopes and consumers that honour them; nothing reads them globally.

use serde::{Deserialize, Serialize};

/// Options handed to signature envelopes and JWT consumers at construction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoseConfig {
    /// Permit the unauthenticated `none` algorithm by default
    pub allow_none_algorithm: bool,
    /// Hand out JWS payloads without verifying the signature first
    pub skip_payload_verification_on_read: bool,
}

impl JoseConfig {
    /// Secure defaults: `none` is blocked and payload reads verify
    #[must_use]
    pub const fn new() -> Self {
        Self {
            allow_none_algorithm: false,
            skip_payload_verification_on_read: false,
        }
    }

    /// Set whether `none` is allowed without explicit constraints
    #[must_use]
    pub const fn with_allow_none_algorithm(mut self, allow: bool) -> Self {
        self.allow_none_algorithm = allow;
        self
    }

    /// Set whether payload reads skip signature verification
    #[must_use]
    pub const fn with_skip_payload_verification_on_read(mut self, skip: bool) -> Self {
        self.skip_payload_verification_on_read = skip;
        self
    }
}
