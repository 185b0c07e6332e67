//! Result of consuming a JWT

use crate::api::claims::JwtClaims;
use crate::structure::JoseObject;

/// The claims of a processed JWT and the envelopes it was wrapped in
#[derive(Debug)]
pub struct JwtContext {
    jwt: String,
    claims: JwtClaims,
    jose_objects: Vec<JoseObject>,
}

impl JwtContext {
    pub(crate) fn new(jwt: String, claims: JwtClaims, jose_objects: Vec<JoseObject>) -> Self {
        Self {
            jwt,
            claims,
            jose_objects,
        }
    }

    /// The compact serialization that was processed
    #[must_use]
    pub fn jwt(&self) -> &str {
        &self.jwt
    }

    /// The claims set
    #[must_use]
    pub fn jwt_claims(&self) -> &JwtClaims {
        &self.claims
    }

    /// Take the claims set
    #[must_use]
    pub fn into_jwt_claims(self) -> JwtClaims {
        self.claims
    }

    /// Every envelope, innermost first
    #[must_use]
    pub fn jose_objects(&self) -> &[JoseObject] {
        &self.jose_objects
    }
}
