//! Typed claim access must report malformed claims instead of panicking

use jose_jwt::{JoseError, JwtClaims, NumericDate};
use serde_json::json;

fn claims(value: serde_json::Value) -> JwtClaims {
    JwtClaims::parse(&value.to_string()).unwrap()
}

#[test]
fn test_claims_must_be_an_object() {
    for text in ["[1,2,3]", "\"sub\"", "42", "null"] {
        assert!(matches!(JwtClaims::parse(text), Err(JoseError::Json(_))), "{text}");
    }
    assert!(matches!(JwtClaims::parse("{\"iss\":"), Err(JoseError::Json(_))));
}

#[test]
fn test_string_claims_of_the_wrong_type() {
    let parsed = claims(json!({"iss": 7, "sub": ["a"], "jti": {"id": 1}}));
    match parsed.issuer() {
        Err(JoseError::MalformedClaim(msg)) => assert_eq!(
            msg,
            "The value of the 'iss' claim is not the expected type (7 - expected a string)"
        ),
        other => panic!("expected malformed claim, got {other:?}"),
    }
    assert!(matches!(parsed.subject(), Err(JoseError::MalformedClaim(_))));
    assert!(matches!(parsed.jwt_id(), Err(JoseError::MalformedClaim(_))));
}

#[test]
fn test_absent_claims_are_none() {
    let parsed = JwtClaims::new();
    assert_eq!(parsed.issuer().unwrap(), None);
    assert_eq!(parsed.expiration_time().unwrap(), None);
    assert!(parsed.audience().unwrap().is_empty());
    assert!(!parsed.has_audience());
}

#[test]
fn test_audience_forms() {
    let single = claims(json!({"aud": "api"}));
    assert_eq!(single.audience().unwrap(), vec!["api"]);

    let many = claims(json!({"aud": ["api", "web"]}));
    assert_eq!(many.audience().unwrap(), vec!["api", "web"]);

    let mixed = claims(json!({"aud": ["api", 3]}));
    assert!(matches!(mixed.audience(), Err(JoseError::MalformedClaim(_))));

    let object = claims(json!({"aud": {"name": "api"}}));
    assert!(matches!(object.audience(), Err(JoseError::MalformedClaim(_))));
}

#[test]
fn test_single_audience_is_written_as_a_string() {
    let mut built = JwtClaims::new();
    built.set_audience(["api"]);
    assert_eq!(built.claim_value("aud"), Some(&json!("api")));

    built.set_audience(vec!["api".to_string(), "web".to_string()]);
    assert_eq!(built.claim_value("aud"), Some(&json!(["api", "web"])));
}

#[test]
fn test_numeric_dates() {
    let parsed = claims(json!({"exp": 1_300_819_380.9, "nbf": "soon", "iat": 1_300_819_000}));
    assert_eq!(
        parsed.expiration_time().unwrap(),
        Some(NumericDate::from_seconds(1_300_819_380))
    );
    assert_eq!(
        parsed.issued_at().unwrap(),
        Some(NumericDate::from_seconds(1_300_819_000))
    );
    match parsed.not_before() {
        Err(JoseError::MalformedClaim(msg)) => assert!(msg.contains("'nbf'")),
        other => panic!("expected malformed claim, got {other:?}"),
    }
}

#[test]
fn test_generated_jwt_ids_are_unique() {
    let mut first = JwtClaims::new();
    first.set_generated_jwt_id();
    let mut second = JwtClaims::new();
    second.set_generated_jwt_id();

    let first_id = first.jwt_id().unwrap().unwrap().to_string();
    assert_eq!(first_id.len(), 22);
    assert_ne!(Some(first_id.as_str()), second.jwt_id().unwrap());
}

#[test]
fn test_relative_dates() {
    let before = NumericDate::now();
    let mut built = JwtClaims::new();
    built.set_expiration_time_minutes_in_the_future(10.0);
    built.set_not_before_minutes_in_the_past(2.0);
    built.set_issued_at_to_now();
    let after = NumericDate::now();

    let exp = built.expiration_time().unwrap().unwrap();
    assert!(exp.value() >= before.value() + 600 && exp.value() <= after.value() + 600);
    let nbf = built.not_before().unwrap().unwrap();
    assert!(nbf.value() <= after.value() - 120);
    let iat = built.issued_at().unwrap().unwrap();
    assert!(iat.is_on_or_after(before) && !iat.is_after(after));
}

#[test]
fn test_claims_round_trip_through_json() {
    let mut built = JwtClaims::new();
    built.set_issuer("issuer");
    built.set_subject("subject");
    built.set_claim("roles", vec!["admin", "ops"]);
    built.set_expiration_time(NumericDate::from_seconds(1_300_819_380));

    let parsed = JwtClaims::parse(&built.to_json()).unwrap();
    assert_eq!(parsed, built);
    assert_eq!(parsed.string_list_claim_value("roles").unwrap(), vec!["admin", "ops"]);

    let mut names: Vec<&str> = parsed.claim_names().collect();
    names.sort_unstable();
    assert_eq!(names, vec!["exp", "iss", "roles", "sub"]);

    let mut trimmed = parsed.clone();
    assert_eq!(trimmed.unset_claim("roles"), Some(json!(["admin", "ops"])));
    assert!(!trimmed.has_claim("roles"));
}
