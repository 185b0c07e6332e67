//! Tests for compact serialization of period separated segments

use jose_common::compact::{self, CompactSerializer};
use jose_common::JoseError;
use proptest::prelude::*;

#[test]
fn test_round_trip_three_parts() {
    let serialized = compact::serialize(&[Some("a"), Some("b"), Some("c")]).unwrap();
    assert_eq!(serialized, "a.b.c");
    assert_eq!(compact::deserialize(&serialized).unwrap(), vec!["a", "b", "c"]);
}

#[test]
fn test_detached_payload_round_trip() {
    let jws = CompactSerializer::allowing_empty(1);
    let serialized = jws.serialize(&[Some("H"), Some(""), Some("S")]).unwrap();
    assert_eq!(serialized, "H..S");
    assert_eq!(jws.deserialize(&serialized).unwrap(), vec!["H", "", "S"]);
}

#[test]
fn test_null_part_becomes_empty_segment() {
    let jws = CompactSerializer::allowing_empty(1);
    assert_eq!(jws.serialize(&[Some("H"), None, Some("S")]).unwrap(), "H..S");
    // a null final part is just an empty trailing segment
    assert_eq!(compact::serialize(&[Some("H"), Some("P"), None]).unwrap(), "H.P.");
}

#[test]
fn test_strict_serialize_rejects_empty_interior_part() {
    let result = compact::serialize(&[Some("H"), Some(""), Some("S")]);
    assert!(matches!(result, Err(JoseError::Format(_))));

    let result = compact::serialize(&[None, Some("P"), Some("S")]);
    assert!(matches!(result, Err(JoseError::Format(_))));
}

#[test]
fn test_strict_deserialize_rejects_empty_interior_segment() {
    assert!(matches!(compact::deserialize("H..S"), Err(JoseError::Format(_))));
    assert!(matches!(compact::deserialize(".P.S"), Err(JoseError::Format(_))));
    assert!(matches!(compact::deserialize(""), Err(JoseError::Format(_))));
}

#[test]
fn test_allowed_position_does_not_relax_other_positions() {
    let jws = CompactSerializer::allowing_empty(1);
    assert!(matches!(jws.deserialize(".P.S"), Err(JoseError::Format(_))));
    assert!(matches!(
        jws.serialize(&[Some(""), Some("P"), Some("S")]),
        Err(JoseError::Format(_))
    ));
}

#[test]
fn test_trailing_period_keeps_empty_final_segment() {
    assert_eq!(compact::deserialize("H.P.").unwrap(), vec!["H", "P", ""]);
    assert_eq!(compact::deserialize("H.P").unwrap(), vec!["H", "P"]);
}

#[test]
fn test_five_part_layout_with_empty_encrypted_key() {
    let jwe = CompactSerializer::allowing_empty(1);
    let parts = jwe.deserialize("hdr..iv.ct.tag").unwrap();
    assert_eq!(parts, vec!["hdr", "", "iv", "ct", "tag"]);
    assert!(jwe.deserialize("hdr..iv..tag").is_err());
}

proptest! {
    #[test]
    fn prop_round_trip_non_empty_parts(parts in prop::collection::vec("[A-Za-z0-9_-]{1,12}", 1..6)) {
        let refs: Vec<Option<&str>> = parts.iter().map(|p| Some(p.as_str())).collect();
        let serialized = compact::serialize(&refs).unwrap();
        prop_assert_eq!(compact::deserialize(&serialized).unwrap(), parts);
    }

    #[test]
    fn prop_round_trip_with_empty_final_part(parts in prop::collection::vec("[A-Za-z0-9_-]{1,12}", 1..5)) {
        let mut refs: Vec<Option<&str>> = parts.iter().map(|p| Some(p.as_str())).collect();
        refs.push(Some(""));
        let serialized = compact::serialize(&refs).unwrap();
        let mut expected = parts.clone();
        expected.push(String::new());
        prop_assert_eq!(compact::deserialize(&serialized).unwrap(), expected);
    }
}
