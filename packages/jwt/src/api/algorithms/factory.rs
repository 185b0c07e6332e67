//! Identifier to implementation lookup
//!
//! The three factories are built once, on first use, and are read-only from
//! then on, so concurrent lookups need no locking.

use super::ecdsa::EcdsaUsingShaAlgorithm;
use super::hmac::HmacUsingShaAlgorithm;
use super::key_management::{DirectKeyManagement, KeyManagementAlgorithm};
use super::none::PlaintextNoneAlgorithm;
use super::rsa::RsaUsingShaAlgorithm;
use super::JwsAlgorithm;
use jose_cipher::{AesCbcHmacSha2, ContentEncryptionAlgorithm};
use jose_common::{Algorithm, JoseError, JoseResult};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

static FACTORIES: Lazy<AlgorithmFactories> = Lazy::new(AlgorithmFactories::build);

/// Algorithms of one kind, keyed by header identifier
pub struct AlgorithmFactory<A: ?Sized> {
    parameter_name: &'static str,
    algorithms: HashMap<String, Arc<A>>,
}

impl<A: ?Sized + Algorithm> AlgorithmFactory<A> {
    /// Empty factory for the header parameter `parameter_name` (`alg` or `enc`)
    #[must_use]
    pub fn new(parameter_name: &'static str) -> Self {
        Self {
            parameter_name,
            algorithms: HashMap::new(),
        }
    }

    /// Add an algorithm if it can run in this build
    pub fn register(&mut self, algorithm: Arc<A>) {
        let id = algorithm.identifier().to_string();
        if algorithm.is_available() {
            tracing::debug!(
                parameter = self.parameter_name,
                algorithm = %id,
                "registered algorithm"
            );
            self.algorithms.insert(id, algorithm);
        } else {
            tracing::debug!(
                parameter = self.parameter_name,
                algorithm = %id,
                "algorithm unavailable, not registered"
            );
        }
    }

    /// Look up an algorithm by identifier
    ///
    /// # Errors
    /// Returns `JoseError::UnknownAlgorithm` if nothing is registered under `id`.
    pub fn get_algorithm(&self, id: &str) -> JoseResult<Arc<A>> {
        self.algorithms.get(id).cloned().ok_or_else(|| {
            JoseError::unknown_algorithm(format!(
                "{id} is an unknown, unsupported or unavailable {} algorithm (not one of {:?}).",
                self.parameter_name,
                self.supported_algorithms()
            ))
        })
    }

    /// Registered identifiers, sorted
    #[must_use]
    pub fn supported_algorithms(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.algorithms.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Whether `id` is registered
    #[must_use]
    pub fn is_available(&self, id: &str) -> bool {
        self.algorithms.contains_key(id)
    }
}

/// The process-wide JWS, JWE key management and JWE content encryption factories
pub struct AlgorithmFactories {
    jws: AlgorithmFactory<dyn JwsAlgorithm>,
    jwe_key_management: AlgorithmFactory<dyn KeyManagementAlgorithm>,
    jwe_content_encryption: AlgorithmFactory<dyn ContentEncryptionAlgorithm>,
}

impl AlgorithmFactories {
    /// Shared instance, built on first call
    #[must_use]
    pub fn instance() -> &'static Self {
        &FACTORIES
    }

    fn build() -> Self {
        let mut jws: AlgorithmFactory<dyn JwsAlgorithm> = AlgorithmFactory::new("alg");
        jws.register(Arc::new(PlaintextNoneAlgorithm));
        for alg in HmacUsingShaAlgorithm::ALL {
            jws.register(Arc::new(alg));
        }
        for alg in RsaUsingShaAlgorithm::ALL {
            jws.register(Arc::new(alg));
        }
        for alg in EcdsaUsingShaAlgorithm::ALL {
            jws.register(Arc::new(alg));
        }

        let mut jwe_key_management: AlgorithmFactory<dyn KeyManagementAlgorithm> =
            AlgorithmFactory::new("alg");
        jwe_key_management.register(Arc::new(DirectKeyManagement));

        let mut jwe_content_encryption: AlgorithmFactory<dyn ContentEncryptionAlgorithm> =
            AlgorithmFactory::new("enc");
        for alg in AesCbcHmacSha2::ALL {
            jwe_content_encryption.register(Arc::new(alg));
        }

        tracing::debug!(
            jws = ?jws.supported_algorithms(),
            jwe_alg = ?jwe_key_management.supported_algorithms(),
            jwe_enc = ?jwe_content_encryption.supported_algorithms(),
            "algorithm factories initialized"
        );

        Self {
            jws,
            jwe_key_management,
            jwe_content_encryption,
        }
    }

    /// JWS `alg` implementations
    #[must_use]
    pub fn jws_algorithm_factory(&self) -> &AlgorithmFactory<dyn JwsAlgorithm> {
        &self.jws
    }

    /// JWE `alg` implementations
    #[must_use]
    pub fn jwe_key_management_algorithm_factory(
        &self,
    ) -> &AlgorithmFactory<dyn KeyManagementAlgorithm> {
        &self.jwe_key_management
    }

    /// JWE `enc` implementations
    #[must_use]
    pub fn jwe_content_encryption_algorithm_factory(
        &self,
    ) -> &AlgorithmFactory<dyn ContentEncryptionAlgorithm> {
        &self.jwe_content_encryption
    }
}
