//! Consuming signed, encrypted and nested JWTs

mod common;

use common::hmac_key;
use jose_jwt::{
    AlgorithmConstraints, JoseConfig, JoseError, JoseKey, JoseResult, JsonWebEncryption,
    JsonWebSignature, JwtClaims, JwtConsumerBuilder, NumericDate,
};

const NOW: i64 = 1_700_000_000;

fn claims() -> JwtClaims {
    let mut claims = JwtClaims::new();
    claims.set_issuer("https://issuer.example");
    claims.set_subject("alice");
    claims.set_audience(["api"]);
    claims.set_issued_at(NumericDate::from_seconds(NOW - 60));
    claims.set_expiration_time(NumericDate::from_seconds(NOW + 600));
    claims
}

fn sign(claims: &JwtClaims, key: JoseKey) -> String {
    let mut jws = JsonWebSignature::new();
    jws.set_payload(&claims.to_json()).unwrap();
    jws.set_algorithm_header_value("HS256");
    jws.set_key(key);
    jws.compact_serialization().unwrap()
}

fn dir_key() -> JoseKey {
    JoseKey::symmetric(vec![0x5Au8; 32])
}

fn encrypt(plaintext: &str, content_type: Option<&str>) -> String {
    let mut jwe = JsonWebEncryption::new();
    jwe.set_algorithm_header_value("dir");
    jwe.set_encryption_method_header_parameter("A128CBC-HS256");
    if let Some(cty) = content_type {
        jwe.set_content_type_header_value(cty);
    }
    jwe.set_key(dir_key());
    jwe.set_plaintext(plaintext).unwrap();
    jwe.compact_serialization().unwrap()
}

fn consumer() -> JwtConsumerBuilder {
    JwtConsumerBuilder::new()
        .with_verification_key(hmac_key(32))
        .with_expected_audience(["api"])
        .with_expected_issuer("https://issuer.example")
        .with_evaluation_time(NumericDate::from_seconds(NOW))
}

fn invalid_details(result: JoseResult<impl std::fmt::Debug>) -> Vec<String> {
    match result {
        Err(JoseError::InvalidJwt { details }) => details,
        other => panic!("expected an invalid JWT, got {other:?}"),
    }
}

#[test]
fn test_signed_jwt_is_accepted() {
    let token = sign(&claims(), hmac_key(32));
    let context = consumer().build().process(&token).unwrap();

    assert_eq!(context.jwt(), token);
    assert_eq!(context.jwt_claims().subject().unwrap(), Some("alice"));
    assert_eq!(context.jose_objects().len(), 1);
    assert!(context.jose_objects()[0].is_signature());
    assert_eq!(context.jose_objects()[0].algorithm_header_value(), Some("HS256"));
}

#[test]
fn test_nested_jwt_is_unwrapped() {
    let inner = sign(&claims(), hmac_key(32));
    let outer = encrypt(&inner, Some("JWT"));

    let context = consumer()
        .with_decryption_key(dir_key())
        .enable_require_encryption()
        .build()
        .process(&outer)
        .unwrap();

    let objects = context.jose_objects();
    assert_eq!(objects.len(), 2);
    assert!(objects[0].is_signature());
    assert!(!objects[1].is_signature());
    assert_eq!(objects[1].content_type(), Some("JWT"));
    assert_eq!(context.jwt_claims().issuer().unwrap(), Some("https://issuer.example"));
}

#[test]
fn test_encrypted_only_jwt_needs_signature_requirement_disabled() {
    let token = encrypt(&claims().to_json(), None);

    let details = invalid_details(
        consumer()
            .with_decryption_key(dir_key())
            .build()
            .process(&token),
    );
    assert_eq!(details.len(), 1);
    assert!(details[0].starts_with("The JWT has no signature"));

    let accepted = consumer()
        .with_decryption_key(dir_key())
        .disable_require_signature()
        .build()
        .process_to_claims(&token)
        .unwrap();
    assert_eq!(accepted, claims());
}

#[test]
fn test_encryption_can_be_required() {
    let token = sign(&claims(), hmac_key(32));
    let details = invalid_details(consumer().enable_require_encryption().build().process(&token));
    assert!(details[0].starts_with("The JWT has no encryption"));
}

#[test]
fn test_bad_signature_is_an_invalid_jwt() {
    let token = sign(&claims(), JoseKey::symmetric(vec![3u8; 32]));
    let details = invalid_details(consumer().build().process(&token));
    assert_eq!(details, vec![format!("JWS signature is invalid: {token}")]);
}

#[test]
fn test_skip_signature_verification() {
    let token = sign(&claims(), JoseKey::symmetric(vec![3u8; 32]));
    let processed = consumer()
        .skip_signature_verification()
        .build()
        .process_to_claims(&token)
        .unwrap();
    assert_eq!(processed.subject().unwrap(), Some("alice"));
}

#[test]
fn test_unsecured_jwt() {
    let config = JoseConfig::new().with_allow_none_algorithm(true);
    let mut jws = JsonWebSignature::with_config(config);
    jws.set_payload(&claims().to_json()).unwrap();
    jws.set_algorithm_header_value("none");
    let token = jws.compact_serialization().unwrap();

    assert!(matches!(
        consumer().build().process(&token),
        Err(JoseError::ConstraintViolation(_))
    ));

    let processed = consumer()
        .disable_require_signature()
        .build()
        .process_to_claims(&token)
        .unwrap();
    assert_eq!(processed.subject().unwrap(), Some("alice"));
}

#[test]
fn test_validator_failures_are_collected() {
    let mut bad = claims();
    bad.set_issuer("https://elsewhere.example");
    bad.set_audience(["other"]);
    bad.set_expiration_time(NumericDate::from_seconds(NOW - 1));
    bad.set_issued_at(NumericDate::from_seconds(NOW - 120));
    let token = sign(&bad, hmac_key(32));

    let details = invalid_details(consumer().build().process(&token));
    assert_eq!(details.len(), 3, "{details:?}");
    assert!(details[0].starts_with("Audience (aud) claim"));
    assert!(details[1].starts_with("Issuer (iss) claim value (https://elsewhere.example)"));
    assert!(details[2].starts_with("The JWT is no longer valid"));
}

#[test]
fn test_audience_is_checked_by_default() {
    let token = sign(&claims(), hmac_key(32));
    let builder = || {
        JwtConsumerBuilder::new()
            .with_verification_key(hmac_key(32))
            .with_evaluation_time(NumericDate::from_seconds(NOW))
    };

    let details = invalid_details(builder().build().process(&token));
    assert!(details[0].contains("no expected audience value(s) were provided"));

    assert!(builder()
        .skip_default_audience_validation()
        .build()
        .process(&token)
        .is_ok());

    let mut without_audience = claims();
    without_audience.unset_claim("aud");
    let token = sign(&without_audience, hmac_key(32));
    assert!(builder().build().process(&token).is_ok());
    let details = invalid_details(consumer().build().process(&token));
    assert_eq!(details, vec!["No Audience (aud) claim present.".to_string()]);
}

#[test]
fn test_subject_and_jwt_id_requirements() {
    let token = sign(&claims(), hmac_key(32));
    assert!(consumer().with_expected_subject("alice").build().process(&token).is_ok());

    let details = invalid_details(consumer().with_expected_subject("bob").build().process(&token));
    assert_eq!(
        details,
        vec!["Subject (sub) claim value (alice) doesn't match expected value of bob".to_string()]
    );

    let details = invalid_details(consumer().require_jwt_id().build().process(&token));
    assert_eq!(details, vec!["The JWT ID (jti) claim is not present.".to_string()]);
}

#[test]
fn test_date_requirements_and_skew() {
    let mut expiring = claims();
    expiring.set_expiration_time(NumericDate::from_seconds(NOW - 10));
    let token = sign(&expiring, hmac_key(32));

    assert!(consumer().build().process(&token).is_err());
    assert!(consumer()
        .with_allowed_clock_skew_seconds(30)
        .build()
        .process(&token)
        .is_ok());

    let details = invalid_details(consumer().require_not_before().build().process(&token));
    assert_eq!(details, vec!["No Not Before (nbf) claim present.".to_string()]);

    let token = sign(&claims(), hmac_key(32));
    let details = invalid_details(
        consumer()
            .with_max_future_validity_minutes(5)
            .build()
            .process(&token),
    );
    assert!(details[0].contains("cannot be more than 5 minutes in the future"));
}

#[test]
fn test_malformed_claim_is_reported() {
    let mut malformed = claims();
    malformed.set_claim("exp", "tomorrow");
    let token = sign(&malformed, hmac_key(32));

    let details = invalid_details(consumer().build().process(&token));
    assert_eq!(details.len(), 1);
    assert!(details[0].contains("'exp' claim is not the expected type"));
}

#[test]
fn test_custom_validator() {
    let token = sign(&claims(), hmac_key(32));
    let require_admin = |claims: &JwtClaims| -> JoseResult<Option<String>> {
        let roles = claims.string_list_claim_value("roles")?;
        Ok((!roles.contains(&"admin")).then(|| "The admin role is required.".to_string()))
    };

    let details = invalid_details(
        consumer()
            .with_validator(require_admin)
            .build()
            .process(&token),
    );
    assert_eq!(details, vec!["The admin role is required.".to_string()]);

    let mut admin = claims();
    admin.set_claim("roles", vec!["admin"]);
    let token = sign(&admin, hmac_key(32));
    assert!(consumer()
        .with_validator(require_admin)
        .build()
        .process(&token)
        .is_ok());
}

#[test]
fn test_skip_all_validators() {
    let mut bad = claims();
    bad.set_expiration_time(NumericDate::from_seconds(NOW - 1000));
    let token = sign(&bad, hmac_key(32));
    assert!(consumer().skip_all_validators().build().process(&token).is_ok());
}

#[test]
fn test_algorithm_constraints_apply_to_each_layer() {
    let token = sign(&claims(), hmac_key(32));
    assert!(matches!(
        consumer()
            .with_jws_algorithm_constraints(AlgorithmConstraints::permit(["RS256"]))
            .build()
            .process(&token),
        Err(JoseError::ConstraintViolation(_))
    ));

    let outer = encrypt(&token, Some("JWT"));
    assert!(matches!(
        consumer()
            .with_decryption_key(dir_key())
            .with_jwe_content_encryption_algorithm_constraints(AlgorithmConstraints::permit([
                "A256CBC-HS512"
            ]))
            .build()
            .process(&outer),
        Err(JoseError::ConstraintViolation(_))
    ));
}

#[test]
fn test_envelope_errors_propagate() {
    assert!(matches!(
        consumer().build().process("not.a.jwt.at.all.really"),
        Err(JoseError::Format(_))
    ));

    let inner = sign(&claims(), hmac_key(32));
    let outer = encrypt(&inner, Some("JWT"));
    assert!(matches!(
        consumer()
            .with_decryption_key(JoseKey::symmetric(vec![0u8; 32]))
            .build()
            .process(&outer),
        Err(JoseError::Integrity(_))
    ));
}
