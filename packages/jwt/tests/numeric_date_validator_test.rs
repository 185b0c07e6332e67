//! Expiration, issued-at and not-before rules

use jose_jwt::{JwtClaims, NumericDate, NumericDateValidator, Validator};

const T: i64 = 1_300_819_380;

fn at(evaluation_time: i64) -> NumericDateValidator {
    let mut validator = NumericDateValidator::new();
    validator.set_evaluation_time(Some(NumericDate::from_seconds(evaluation_time)));
    validator
}

fn date(seconds: i64) -> Option<NumericDate> {
    Some(NumericDate::from_seconds(seconds))
}

#[test]
fn test_expiration_is_exclusive() {
    assert!(at(T).check(date(T), None, None).is_some());
    assert!(at(T - 1).check(date(T), None, None).is_none());
    assert!(at(T + 1).check(date(T), None, None).is_some());
}

#[test]
fn test_expired_message() {
    let reason = at(T).check(date(T), None, None).unwrap();
    assert_eq!(
        reason,
        "The JWT is no longer valid - the evaluation time NumericDate{1300819380 -> 2011-03-22T18:43:00+00:00} is on or after the Expiration Time (exp=NumericDate{1300819380 -> 2011-03-22T18:43:00+00:00}) claim value."
    );
}

#[test]
fn test_clock_skew_extends_expiration() {
    let mut validator = at(T + 3);
    validator.set_allowed_clock_skew_seconds(5);
    assert!(validator.check(date(T), None, None).is_none());

    let mut validator = at(T + 5);
    validator.set_allowed_clock_skew_seconds(5);
    let reason = validator.check(date(T), None, None).unwrap();
    assert!(reason.ends_with(
        "claim value (even when providing 5 seconds of leeway to account for clock skew)."
    ));
}

#[test]
fn test_skew_is_subtracted_from_the_evaluation_time() {
    let mut validator = at(T - 10);
    validator.set_allowed_clock_skew_seconds(5);
    assert!(validator.check(date(T), None, None).is_none());

    let mut validator = at(T - 3);
    validator.set_allowed_clock_skew_seconds(5);
    assert!(validator.check(date(T), None, None).is_none());
}

#[test]
fn test_expiration_before_issued_at() {
    let reason = at(T - 100).check(date(T), date(T + 1), None).unwrap();
    assert_eq!(
        reason,
        "The Expiration Time (exp=NumericDate{1300819380 -> 2011-03-22T18:43:00+00:00}) claim value cannot be before the Issued At (iat=NumericDate{1300819381 -> 2011-03-22T18:43:01+00:00}) claim value."
    );
    assert!(at(T - 100).check(date(T), date(T), None).is_none());
}

#[test]
fn test_expiration_before_not_before() {
    let reason = at(T - 100).check(date(T), None, date(T + 60)).unwrap();
    assert!(reason.starts_with("The Expiration Time (exp="));
    assert!(reason.contains("cannot be before the Not Before (nbf="));
}

#[test]
fn test_required_claims() {
    let mut validator = at(T);
    validator.set_require_exp(true);
    assert_eq!(
        validator.check(None, None, None).as_deref(),
        Some("No Expiration Time (exp) claim present.")
    );

    let mut validator = at(T);
    validator.set_require_iat(true);
    assert_eq!(
        validator.check(None, None, None).as_deref(),
        Some("No Issued At (iat) claim present.")
    );
    assert!(validator.check(None, date(T), None).is_none());

    let mut validator = at(T);
    validator.set_require_nbf(true);
    assert_eq!(
        validator.check(None, None, None).as_deref(),
        Some("No Not Before (nbf) claim present.")
    );
}

#[test]
fn test_nothing_required_and_nothing_present_passes() {
    assert!(NumericDateValidator::new().check(None, None, None).is_none());
}

#[test]
fn test_max_future_validity() {
    let mut validator = at(T);
    validator.set_max_future_validity_minutes(10);
    assert!(validator.check(date(T + 600), None, None).is_none());

    let reason = validator.check(date(T + 601), None, None).unwrap();
    assert!(reason.contains("cannot be more than 10 minutes in the future"));

    validator.set_allowed_clock_skew_seconds(30);
    assert!(validator.check(date(T + 620), None, None).is_none());
}

#[test]
fn test_not_before_with_skew() {
    let reason = at(T).check(None, None, date(T + 1)).unwrap();
    assert_eq!(
        reason,
        "The JWT is not yet valid as the evaluation time NumericDate{1300819380 -> 2011-03-22T18:43:00+00:00} is before the Not Before (nbf=NumericDate{1300819381 -> 2011-03-22T18:43:01+00:00}) claim time."
    );
    assert!(at(T).check(None, None, date(T)).is_none());

    let mut validator = at(T);
    validator.set_allowed_clock_skew_seconds(30);
    assert!(validator.check(None, None, date(T + 30)).is_none());
    assert!(validator.check(None, None, date(T + 31)).is_some());
}

#[test]
fn test_extreme_dates_with_skew() {
    let mut validator = at(i64::MAX);
    validator.set_allowed_clock_skew_seconds(5);
    assert!(validator.check(None, None, date(0)).is_none());
    assert!(validator.check(date(i64::MAX - 5), None, None).is_some());

    let mut validator = at(i64::MIN);
    validator.set_allowed_clock_skew_seconds(5);
    validator.set_max_future_validity_minutes(10);
    assert!(validator.check(date(i64::MIN + 1), None, None).is_none());
    assert!(validator.check(date(i64::MAX), None, None).is_some());
    assert!(validator.check(None, None, date(i64::MAX)).is_some());
}

#[test]
fn test_first_failure_wins() {
    let mut validator = at(T + 10);
    validator.set_require_iat(true);
    assert_eq!(
        validator.check(date(T), None, None).as_deref(),
        Some("No Issued At (iat) claim present.")
    );
    let reason = validator.check(date(T), date(T + 100), None).unwrap();
    assert!(reason.starts_with("The JWT is no longer valid"));
}

#[test]
fn test_validator_reads_claims() {
    let claims = JwtClaims::parse(r#"{"exp":1300819380,"nbf":1300819000.75}"#).unwrap();
    assert_eq!(at(T - 1).validate(&claims).unwrap(), None);
    assert!(at(T).validate(&claims).unwrap().is_some());
    assert!(at(1_300_818_999).validate(&claims).unwrap().is_some());

    let malformed = JwtClaims::parse(r#"{"exp":"tomorrow"}"#).unwrap();
    assert!(at(T).validate(&malformed).is_err());
}

#[test]
fn test_current_time_is_used_by_default() {
    let mut claims = JwtClaims::new();
    claims.set_expiration_time_minutes_in_the_future(5.0);
    claims.set_not_before_minutes_in_the_past(1.0);
    claims.set_issued_at_to_now();
    assert_eq!(NumericDateValidator::new().validate(&claims).unwrap(), None);

    claims.set_expiration_time(NumericDate::now().add_seconds(-1));
    assert!(NumericDateValidator::new()
        .validate(&claims)
        .unwrap()
        .is_some());
}
