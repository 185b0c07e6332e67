//! Keys, algorithms and claims

pub mod algorithms;
pub mod claims;
pub mod keys;

pub use algorithms::{AlgorithmConstraints, AlgorithmFactories, JwsAlgorithm};
pub use claims::{JwtClaims, NumericDate, Validator};
pub use keys::JoseKey;
