//! Tests asserting the parser's `Expected X, found Y.` and `Unexpected X.`
//! diagnostics and their positions.

use crate::tests::utils::parse_error;
use crate::SyntaxErrorKind;

// =============================================================================
// Document structure
// =============================================================================

#[test]
fn empty_document() {
    let error = parse_error("");
    assert_eq!(error.kind(), SyntaxErrorKind::UnexpectedToken);
    assert_eq!(error.description(), "Unexpected EOF.");
    assert_eq!((error.location().line, error.location().column), (1, 1));
}

#[test]
fn unknown_top_level_name() {
    let error = parse_error("notanoperation Foo { field }");
    assert_eq!(
        error.description(),
        "Unexpected Name \"notanoperation\".",
    );
    assert_eq!(error.location().column, 1);
}

#[test]
fn top_level_punctuator() {
    let error = parse_error("...");
    assert_eq!(error.description(), "Unexpected \"...\".");
}

#[test]
fn missing_selection_set_renders_excerpt() {
    let error = parse_error("query");
    assert_eq!(error.kind(), SyntaxErrorKind::ExpectedToken);
    assert_eq!(
        error.message(),
        "Syntax Error GraphQL (1:6) Expected \"{\", found EOF.\n\
         1: query\n        \
         ^",
    );
}

#[test]
fn empty_selection_set() {
    let error = parse_error("{}");
    assert_eq!(error.description(), "Expected Name, found \"}\".");
    assert_eq!(error.location().column, 2);
}

#[test]
fn unbalanced_braces() {
    let error = parse_error("{ a { b }");
    assert_eq!(error.description(), "Expected Name, found EOF.");
}

// =============================================================================
// Fields and arguments
// =============================================================================

#[test]
fn missing_argument_value() {
    let error = parse_error("{ field(arg:) }");
    assert_eq!(error.description(), "Unexpected \")\".");
    assert_eq!(error.location().column, 13);
}

#[test]
fn empty_argument_list() {
    let error = parse_error("{ field() }");
    assert_eq!(error.description(), "Expected Name, found \")\".");
}

#[test]
fn missing_colon_in_argument() {
    let error = parse_error("{ field(arg 5) }");
    assert_eq!(error.description(), "Expected \":\", found Int \"5\".");
}

// =============================================================================
// Variable definitions
// =============================================================================

#[test]
fn empty_variable_definitions() {
    let error = parse_error("query Q() { f }");
    assert_eq!(error.description(), "Expected \"$\", found \")\".");
}

#[test]
fn variable_missing_type() {
    let error = parse_error("query Q($x) { f }");
    assert_eq!(error.description(), "Expected \":\", found \")\".");
}

#[test]
fn unclosed_list_type() {
    let error = parse_error("query Q($x: [Int) { f }");
    assert_eq!(error.description(), "Expected \"]\", found \")\".");
}

/// Default values are const: variable references are not allowed there.
#[test]
fn variable_in_default_value() {
    let error = parse_error("query Q($x: Int = $y) { f }");
    assert_eq!(error.kind(), SyntaxErrorKind::UnexpectedToken);
    assert_eq!(error.description(), "Unexpected \"$\".");
    assert_eq!(error.location().column, 19);
}

// =============================================================================
// Fragments
// =============================================================================

#[test]
fn fragment_missing_on_keyword() {
    let error = parse_error("fragment F x Type { f }");
    assert_eq!(error.description(), "Expected \"on\", found Name \"x\".");
    assert_eq!(error.location().column, 12);
}

/// `on` is reserved and cannot name a fragment.
#[test]
fn fragment_named_on() {
    let error = parse_error("fragment on on Type { f }");
    assert_eq!(error.description(), "Unexpected Name \"on\".");
}

#[test]
fn spread_of_fragment_named_on_is_inline_fragment() {
    // `...on Type` is always an inline fragment, never a spread.
    let error = parse_error("{ ...on }");
    assert_eq!(error.description(), "Expected Name, found \"}\".");
}

// =============================================================================
// Values
// =============================================================================

#[test]
fn unclosed_list_value() {
    let error = parse_error("{ f(a: [1, 2) }");
    assert_eq!(error.description(), "Unexpected \")\".");
}

#[test]
fn object_value_missing_colon() {
    let error = parse_error("{ f(a: {x 1}) }");
    assert_eq!(error.description(), "Expected \":\", found Int \"1\".");
}

/// Integer literals must fit in an `i64`.
#[test]
fn integer_out_of_range() {
    let error = parse_error("{ f(a: 99999999999999999999) }");
    assert_eq!(error.kind(), SyntaxErrorKind::InvalidNumber);
    assert_eq!(
        error.description(),
        "Invalid number, integer out of range: \"99999999999999999999\".",
    );
    assert_eq!(error.location().column, 8);
}

#[test]
fn negative_integer_boundaries() {
    // i64::MIN parses; one less does not.
    assert!(crate::parse("{ f(a: -9223372036854775808) }").is_ok());
    let error = parse_error("{ f(a: -9223372036854775809) }");
    assert_eq!(
        error.description(),
        "Invalid number, integer out of range: \"-9223372036854775809\".",
    );
}

// =============================================================================
// Lexical errors surfaced through parsing
// =============================================================================

/// A lexical error reaches the caller unchanged through `parse`.
#[test]
fn lexical_error_is_propagated() {
    let error = parse_error("{ f(a: \"unterminated) }");
    assert_eq!(error.kind(), SyntaxErrorKind::UnterminatedString);
    assert_eq!(error.description(), "Unterminated string.");
}

// =============================================================================
// Nesting depth
// =============================================================================

#[test]
fn nesting_depth_is_bounded() {
    // 100 nested selection sets exceed the 64-level limit.
    let mut source = String::new();
    for _ in 0..100 {
        source.push_str("{ f ");
    }
    for _ in 0..100 {
        source.push('}');
    }
    let error = parse_error(&source);
    assert_eq!(
        error.description(),
        "Document nesting exceeds maximum depth of 64.",
    );
}

#[test]
fn deeply_nested_list_values_are_bounded() {
    let mut source = String::from("{ f(a: ");
    for _ in 0..100 {
        source.push('[');
    }
    for _ in 0..100 {
        source.push(']');
    }
    source.push_str(") }");
    let error = parse_error(&source);
    assert_eq!(
        error.description(),
        "Document nesting exceeds maximum depth of 64.",
    );
}
