//! Capabilities shared by every registered JOSE algorithm

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the key for an algorithm is established
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyPersuasion {
    /// No key at all (`none`)
    None,
    /// A shared secret
    Symmetric,
    /// A public/private key pair
    Asymmetric,
}

impl fmt::Display for KeyPersuasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Symmetric => f.write_str("symmetric"),
            Self::Asymmetric => f.write_str("asymmetric"),
        }
    }
}

/// An algorithm that can be looked up by its header identifier
pub trait Algorithm: Send + Sync + 'static {
    /// Identifier as it appears in the `alg` or `enc` header, e.g. `HS256`
    fn identifier(&self) -> &str;

    /// Key management category
    fn key_persuasion(&self) -> KeyPersuasion;

    /// JWK `kty` of the keys this algorithm uses, empty when keyless
    fn key_type(&self) -> &str;

    /// Whether the algorithm can run in this build
    fn is_available(&self) -> bool {
        true
    }
}
