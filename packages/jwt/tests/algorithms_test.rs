//! Algorithm registry and constraint policies

use jose_common::KeyPersuasion;
use jose_jwt::{identifiers, AlgorithmConstraints, AlgorithmFactories, ConstraintType, JoseError};

#[test]
fn test_registered_jws_algorithms() {
    let factory = AlgorithmFactories::instance().jws_algorithm_factory();
    assert_eq!(
        factory.supported_algorithms(),
        vec!["ES256", "ES384", "HS256", "HS384", "HS512", "RS256", "RS384", "RS512", "none"]
    );
    assert!(factory.is_available(identifiers::HMAC_SHA256));
    assert!(!factory.is_available("PS256"));

    let es256 = factory
        .get_algorithm(identifiers::ECDSA_USING_P256_CURVE_AND_SHA256)
        .unwrap();
    assert_eq!(es256.key_type(), "EC");
    assert_eq!(es256.key_persuasion(), KeyPersuasion::Asymmetric);

    let hs512 = factory.get_algorithm(identifiers::HMAC_SHA512).unwrap();
    assert_eq!(hs512.key_type(), "oct");
    assert_eq!(hs512.key_persuasion(), KeyPersuasion::Symmetric);

    let none = factory.get_algorithm(identifiers::NONE).unwrap();
    assert_eq!(none.key_persuasion(), KeyPersuasion::None);
}

#[test]
fn test_registered_jwe_algorithms() {
    let factories = AlgorithmFactories::instance();
    assert_eq!(
        factories.jwe_key_management_algorithm_factory().supported_algorithms(),
        vec!["dir"]
    );
    assert_eq!(
        factories
            .jwe_content_encryption_algorithm_factory()
            .supported_algorithms(),
        vec!["A128CBC-HS256", "A192CBC-HS384", "A256CBC-HS512"]
    );

    let enc = factories
        .jwe_content_encryption_algorithm_factory()
        .get_algorithm(identifiers::AES_192_CBC_HMAC_SHA_384)
        .unwrap();
    assert_eq!(enc.key_size(), 48);
    assert_eq!(enc.iv_size(), 16);
    assert_eq!(enc.tag_size(), 24);
}

#[test]
fn test_unknown_algorithm_lists_what_is_supported() {
    let factory = AlgorithmFactories::instance().jws_algorithm_factory();
    match factory.get_algorithm("PS256") {
        Err(JoseError::UnknownAlgorithm(msg)) => {
            assert!(msg.starts_with("PS256 is an unknown, unsupported or unavailable alg algorithm"));
            assert!(msg.contains("\"HS256\""));
        }
        Err(other) => panic!("expected unknown algorithm, got {other:?}"),
        Ok(_) => panic!("PS256 is not registered"),
    }
}

#[test]
fn test_the_registry_is_shared() {
    let handle = std::thread::spawn(|| {
        AlgorithmFactories::instance() as *const AlgorithmFactories as usize
    });
    let here = AlgorithmFactories::instance() as *const AlgorithmFactories as usize;
    assert_eq!(handle.join().unwrap(), here);
}

#[test]
fn test_no_constraints_allows_everything() {
    for alg in ["none", "HS256", "anything"] {
        assert!(AlgorithmConstraints::NO_CONSTRAINTS.check_constraint(alg).is_ok());
    }
    assert_eq!(AlgorithmConstraints::default(), AlgorithmConstraints::NO_CONSTRAINTS);
}

#[test]
fn test_disallow_none() {
    let constraints = AlgorithmConstraints::DISALLOW_NONE;
    assert_eq!(constraints.constraint_type(), ConstraintType::Block);
    assert!(constraints.check_constraint("HS256").is_ok());
    match constraints.check_constraint("none") {
        Err(JoseError::ConstraintViolation(msg)) => assert_eq!(msg, "'none' is a blocked algorithm."),
        other => panic!("expected constraint violation, got {other:?}"),
    }
}

#[test]
fn test_permit_list() {
    let constraints = AlgorithmConstraints::permit([
        identifiers::RSA_USING_SHA256,
        identifiers::ECDSA_USING_P256_CURVE_AND_SHA256,
    ]);
    assert_eq!(constraints.constraint_type(), ConstraintType::Permit);
    assert_eq!(constraints.algorithms().collect::<Vec<_>>(), vec!["RS256", "ES256"]);
    assert!(constraints.check_constraint("ES256").is_ok());
    match constraints.check_constraint("HS256") {
        Err(JoseError::ConstraintViolation(msg)) => {
            assert_eq!(msg, "'HS256' is not a permitted algorithm.")
        }
        other => panic!("expected constraint violation, got {other:?}"),
    }
    // identifiers are case sensitive
    assert!(constraints.check_constraint("es256").is_err());
}

#[test]
fn test_empty_permit_list_allows_nothing() {
    let constraints = AlgorithmConstraints::permit(Vec::<String>::new());
    assert!(constraints.check_constraint("HS256").is_err());
}

#[test]
fn test_block_list_with_owned_names() {
    let blocked = vec!["HS256".to_string(), "HS384".to_string()];
    let constraints = AlgorithmConstraints::new(ConstraintType::Block, blocked);
    assert!(constraints.check_constraint("HS256").is_err());
    assert!(constraints.check_constraint("HS512").is_ok());
}
