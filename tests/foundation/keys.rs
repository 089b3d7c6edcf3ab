//! Zoned key tests.

use mudcore_foundation::{ErrorKind, ZonedKey, build_zoned_key, split_zoned_key};

// =============================================================================
// Building
// =============================================================================

#[test]
fn bare_key_is_scoped_to_default_zone() {
    let key = build_zoned_key("sword", "armory").unwrap();
    assert_eq!(key.as_str(), "sword@armory");
    assert_eq!(key.basic_key(), "sword");
    assert_eq!(key.zone_key(), "armory");
}

#[test]
fn scoped_key_is_left_alone() {
    let key = build_zoned_key("sword@smithy", "armory").unwrap();
    assert_eq!(key.as_str(), "sword@smithy");
}

#[test]
fn empty_key_is_rejected() {
    let err = build_zoned_key("", "armory").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidKey { .. }));
}

#[test]
fn double_scoped_key_is_rejected() {
    let err = build_zoned_key("a@b@c", "armory").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidKey { .. }));
}

// =============================================================================
// Splitting
// =============================================================================

#[test]
fn split_returns_halves() {
    assert_eq!(split_zoned_key("gate@village").unwrap(), ("gate", "village"));
}

#[test]
fn split_requires_exactly_one_separator() {
    assert!(split_zoned_key("gate").is_err());
    assert!(split_zoned_key("a@b@c").is_err());
}

#[test]
fn from_parts_rejects_empty_halves() {
    assert!(ZonedKey::from_parts("", "zone").is_err());
    assert!(ZonedKey::from_parts("key", "").is_err());
    assert_eq!(ZonedKey::from_parts("key", "zone").unwrap().as_str(), "key@zone");
}

#[test]
fn scoped_keys_need_both_halves() {
    assert!(build_zoned_key("sword@", "armory").is_err());
    assert!(build_zoned_key("@", "armory").is_err());
    assert!(ZonedKey::parse("@smithy").is_err());
    assert!(ZonedKey::try_from("sword@smithy".to_string()).is_ok());
}
