//! Value tests.

use mudcore_foundation::{CharacterId, Value};

#[test]
fn conversions() {
    assert_eq!(Value::from(true).as_bool(), Some(true));
    assert_eq!(Value::from(7_i64).as_int(), Some(7));
    assert_eq!(Value::from("north").as_str(), Some("north"));
    assert_eq!(Value::from(CharacterId::new(2)).as_character(), Some(CharacterId::new(2)));
}

#[test]
fn default_is_nil() {
    assert!(Value::default().is_nil());
    assert!(!Value::default().is_truthy());
}

#[test]
fn map_lookup() {
    let v = Value::map([("price", Value::from(3_i64)), ("item", Value::from("ale"))]);
    assert_eq!(v.get("price"), Some(&Value::Int(3)));
    assert_eq!(v.get("missing"), None);
    assert_eq!(Value::Nil.get("price"), None);
}

#[test]
fn display() {
    assert_eq!(Value::Nil.to_string(), "nil");
    assert_eq!(Value::from("hi").to_string(), "\"hi\"");
}
