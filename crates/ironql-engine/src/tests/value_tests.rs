//! Wire-shape tests for values, errors, and results. Response JSON is a
//! public contract, so these assert exact strings.

use crate::ErrorLocation;
use crate::ExecutionError;
use crate::ExecutionResult;
use crate::PathSegment;
use crate::Value;

// =============================================================================
// Value serialization
// =============================================================================

#[test]
fn scalars_serialize_to_json_primitives() {
    let value = Value::object([
        ("n", Value::Int(42)),
        ("f", Value::Float(1.5)),
        ("s", Value::from("hi")),
        ("b", Value::Boolean(true)),
        ("z", Value::Null),
    ]);
    assert_eq!(
        serde_json::to_string(&value).unwrap(),
        r#"{"n":42,"f":1.5,"s":"hi","b":true,"z":null}"#,
    );
}

/// Enum values serialize as bare strings, indistinguishable from String
/// on the wire.
#[test]
fn enums_serialize_as_strings() {
    let value = Value::List(vec![Value::Enum("JEDI".to_string())]);
    assert_eq!(serde_json::to_string(&value).unwrap(), r#"["JEDI"]"#);
}

/// Object keys keep insertion order through serialization.
#[test]
fn objects_preserve_insertion_order() {
    let value = Value::object([
        ("zebra", Value::Int(1)),
        ("apple", Value::Int(2)),
        ("mango", Value::Int(3)),
    ]);
    assert_eq!(
        serde_json::to_string(&value).unwrap(),
        r#"{"zebra":1,"apple":2,"mango":3}"#,
    );
}

#[test]
fn value_accessors() {
    assert!(Value::Null.is_null());
    assert_eq!(Value::Int(7).as_i64(), Some(7));
    assert_eq!(Value::Int(7).as_f64(), Some(7.0));
    assert_eq!(Value::Enum("X".to_string()).as_str(), Some("X"));
    assert_eq!(
        Value::object([("a", 1)]).get("a"),
        Some(&Value::Int(1)),
    );
    assert_eq!(Value::object([("a", 1)]).get("b"), None);
}

#[test]
fn from_json_value() {
    let json: serde_json::Value =
        serde_json::from_str(r#"{"a":[1,2.5,"x",null,true]}"#).unwrap();
    let value: Value = json.into();
    assert_eq!(
        value,
        Value::object([(
            "a",
            Value::List(vec![
                Value::Int(1),
                Value::Float(2.5),
                Value::from("x"),
                Value::Null,
                Value::Boolean(true),
            ]),
        )]),
    );
}

// =============================================================================
// Error serialization
// =============================================================================

/// Path segments serialize as bare strings and integers.
#[test]
fn error_with_locations_and_path() {
    let error = ExecutionError {
        message: "boom".to_string(),
        locations: vec![ErrorLocation { line: 3, column: 5 }],
        path: vec![
            PathSegment::from("hero"),
            PathSegment::from(1usize),
            PathSegment::from("name"),
        ],
    };
    assert_eq!(
        serde_json::to_string(&error).unwrap(),
        r#"{"message":"boom","locations":[{"line":3,"column":5}],"path":["hero",1,"name"]}"#,
    );
}

/// Request-scoped errors carry neither locations nor path, and both keys
/// are omitted rather than serialized empty.
#[test]
fn error_without_locations_or_path() {
    let error = ExecutionError::new("Must provide an operation.");
    assert_eq!(
        serde_json::to_string(&error).unwrap(),
        r#"{"message":"Must provide an operation."}"#,
    );
}

// =============================================================================
// Result serialization
// =============================================================================

/// Pre-execution failures omit the data key entirely.
#[test]
fn result_from_errors_omits_data() {
    let result =
        ExecutionResult::from_errors(vec![ExecutionError::new("bad")]);
    assert_eq!(
        serde_json::to_string(&result).unwrap(),
        r#"{"errors":[{"message":"bad"}]}"#,
    );
}

/// A nulled-out root still serializes the data key, as JSON null.
#[test]
fn result_with_null_data_keeps_the_key() {
    let result = ExecutionResult::new(Value::Null, vec![ExecutionError::new("x")]);
    assert_eq!(
        serde_json::to_string(&result).unwrap(),
        r#"{"data":null,"errors":[{"message":"x"}]}"#,
    );
}

#[test]
fn clean_result_omits_errors_and_extensions() {
    let result = ExecutionResult::new(Value::object([("ok", true)]), vec![]);
    assert!(result.is_ok());
    assert_eq!(
        serde_json::to_string(&result).unwrap(),
        r#"{"data":{"ok":true}}"#,
    );
}
