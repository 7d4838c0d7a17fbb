//! Tests for document parsing: operations, selections, fragments, values,
//! and parser options.

use crate::ast;
use crate::parse_with_options;
use crate::tests::utils::first_arg_value;
use crate::tests::utils::first_field;
use crate::tests::utils::only_operation;
use crate::tests::utils::parse_document;
use crate::ParserOptions;

// =============================================================================
// Operations
// =============================================================================

#[test]
fn shorthand_query() {
    let document = parse_document("{ hero }");
    let operation = only_operation(&document);
    assert_eq!(operation.kind, ast::OperationKind::Query);
    assert!(operation.name.is_none());
    assert!(operation.variable_definitions.is_empty());
    assert_eq!(operation.selection_set.selections.len(), 1);
}

#[test]
fn named_operations_of_each_kind() {
    let document = parse_document(
        "query Q { a }\nmutation M { b }\nsubscription S { c }",
    );
    let kinds: Vec<(ast::OperationKind, Option<&str>)> = document
        .operations()
        .map(|op| (op.kind, op.name_str()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (ast::OperationKind::Query, Some("Q")),
            (ast::OperationKind::Mutation, Some("M")),
            (ast::OperationKind::Subscription, Some("S")),
        ],
    );
}

#[test]
fn anonymous_full_form_query() {
    let document = parse_document("query { a }");
    let operation = only_operation(&document);
    assert_eq!(operation.kind, ast::OperationKind::Query);
    assert!(operation.name.is_none());
}

// =============================================================================
// Fields, aliases, arguments
// =============================================================================

#[test]
fn aliased_field_with_arguments() {
    let document = parse_document(r#"{ hero: character(id: "1000", role: HERO) }"#);
    let field = first_field(&only_operation(&document).selection_set);

    assert_eq!(field.alias.as_ref().map(|a| a.as_str()), Some("hero"));
    assert_eq!(field.name.as_str(), "character");
    assert_eq!(field.response_key(), "hero");
    assert_eq!(field.arguments.len(), 2);
    assert_eq!(field.arguments[1].name.as_str(), "role");
}

#[test]
fn response_key_without_alias_is_field_name() {
    let document = parse_document("{ hero }");
    let field = first_field(&only_operation(&document).selection_set);
    assert_eq!(field.response_key(), "hero");
}

#[test]
fn nested_selection_sets() {
    let document = parse_document("{ hero { friends { name } } }");
    let hero = first_field(&only_operation(&document).selection_set);
    let friends = first_field(hero.selection_set.as_ref().unwrap());
    let name = first_field(friends.selection_set.as_ref().unwrap());
    assert_eq!(name.name.as_str(), "name");
    assert!(name.selection_set.is_none());
}

// =============================================================================
// Variable definitions and type annotations
// =============================================================================

#[test]
fn variable_definitions_with_defaults() {
    let document = parse_document(
        "query Q($id: ID!, $first: Int = 10, $tags: [String!]) { f }",
    );
    let operation = only_operation(&document);
    let defs = &operation.variable_definitions;
    assert_eq!(defs.len(), 3);

    assert_eq!(defs[0].name.as_str(), "id");
    assert_eq!(defs[0].var_type.to_string(), "ID!");
    assert!(defs[0].var_type.is_non_null());
    assert!(defs[0].default_value.is_none());

    assert_eq!(defs[1].var_type.to_string(), "Int");
    assert!(matches!(
        defs[1].default_value,
        Some(ast::Value::Int { value: 10, .. }),
    ));

    assert_eq!(defs[2].var_type.to_string(), "[String!]");
    assert_eq!(defs[2].var_type.innermost_name(), "String");
}

#[test]
fn deeply_wrapped_type_annotation() {
    let document = parse_document("query Q($m: [[Episode!]]!) { f }");
    let def = &only_operation(&document).variable_definitions[0];
    assert_eq!(def.var_type.to_string(), "[[Episode!]]!");
    assert_eq!(def.var_type.innermost_name(), "Episode");
}

// =============================================================================
// Directives
// =============================================================================

#[test]
fn directives_on_fields_and_operations() {
    let document = parse_document(
        "query Q($if: Boolean!) @traced { field @skip(if: $if) @other }",
    );
    let operation = only_operation(&document);
    assert_eq!(operation.directives.len(), 1);
    assert_eq!(operation.directives[0].name.as_str(), "traced");

    let field = first_field(&operation.selection_set);
    assert_eq!(field.directives.len(), 2);
    assert_eq!(field.directives[0].name.as_str(), "skip");
    assert!(matches!(
        field.directives[0].arguments[0].value,
        ast::Value::Variable { .. },
    ));
}

// =============================================================================
// Fragments
// =============================================================================

#[test]
fn fragment_definition_and_spread() {
    let document = parse_document(
        "query Q { hero { ...comparisonFields } }\n\
         fragment comparisonFields on Character { name }",
    );
    let fragment = document.fragments().next().unwrap();
    assert_eq!(fragment.name.as_str(), "comparisonFields");
    assert_eq!(fragment.type_condition.as_str(), "Character");

    let hero = first_field(&only_operation(&document).selection_set);
    match &hero.selection_set.as_ref().unwrap().selections[0] {
        ast::Selection::FragmentSpread(spread) => {
            assert_eq!(spread.fragment_name.as_str(), "comparisonFields");
        },
        other => panic!("expected a fragment spread, got: {other:?}"),
    }
}

#[test]
fn inline_fragment_with_type_condition() {
    let document = parse_document("{ hero { ... on Droid { primaryFunction } } }");
    let hero = first_field(&only_operation(&document).selection_set);
    match &hero.selection_set.as_ref().unwrap().selections[0] {
        ast::Selection::InlineFragment(fragment) => {
            assert_eq!(
                fragment.type_condition.as_ref().map(|n| n.as_str()),
                Some("Droid"),
            );
        },
        other => panic!("expected an inline fragment, got: {other:?}"),
    }
}

#[test]
fn inline_fragment_without_type_condition() {
    let document = parse_document("{ hero { ... @include(if: true) { name } } }");
    let hero = first_field(&only_operation(&document).selection_set);
    match &hero.selection_set.as_ref().unwrap().selections[0] {
        ast::Selection::InlineFragment(fragment) => {
            assert!(fragment.type_condition.is_none());
            assert_eq!(fragment.directives[0].name.as_str(), "include");
        },
        other => panic!("expected an inline fragment, got: {other:?}"),
    }
}

// =============================================================================
// Values
// =============================================================================

#[test]
fn scalar_values() {
    let document = parse_document(
        r#"{ f(a: 123, b: -4.5, c: "str", d: true, e: false, g: null, h: EAST) }"#,
    );
    let field = first_field(&only_operation(&document).selection_set);
    let values: Vec<&ast::Value<'_>> =
        field.arguments.iter().map(|a| &a.value).collect();

    assert!(matches!(values[0], ast::Value::Int { value: 123, .. }));
    assert!(
        matches!(values[1], ast::Value::Float { value, .. } if *value == -4.5),
    );
    assert!(
        matches!(values[2], ast::Value::String { value, block: false, .. }
            if value == "str"),
    );
    assert!(matches!(values[3], ast::Value::Boolean { value: true, .. }));
    assert!(matches!(values[4], ast::Value::Boolean { value: false, .. }));
    assert!(matches!(values[5], ast::Value::Null { .. }));
    assert!(
        matches!(values[6], ast::Value::Enum { value, .. } if value == "EAST"),
    );
}

#[test]
fn list_and_object_values() {
    let document = parse_document(r#"{ f(a: [1, 2, [3]], b: {x: 1, y: {z: "w"}}) }"#);
    let field = first_field(&only_operation(&document).selection_set);

    match &field.arguments[0].value {
        ast::Value::List { items, .. } => {
            assert_eq!(items.len(), 3);
            assert!(matches!(items[2], ast::Value::List { .. }));
        },
        other => panic!("expected a list, got: {other:?}"),
    }
    match &field.arguments[1].value {
        ast::Value::Object { fields, .. } => {
            assert_eq!(fields.len(), 2);
            assert_eq!(fields[0].name.as_str(), "x");
            assert!(matches!(fields[1].value, ast::Value::Object { .. }));
        },
        other => panic!("expected an object, got: {other:?}"),
    }
}

#[test]
fn block_string_value() {
    let document = parse_document("{ f(a: \"\"\"\n  multi\n  line\n\"\"\") }");
    let field = first_field(&only_operation(&document).selection_set);
    match first_arg_value(field) {
        ast::Value::String { value, block: true, .. } => {
            assert_eq!(value.as_ref(), "multi\nline");
        },
        other => panic!("expected a block string, got: {other:?}"),
    }
}

#[test]
fn value_display_round_trips_literal_syntax() {
    let document =
        parse_document(r#"{ f(a: [1, null, {x: WEST, y: $v}]) }"#);
    let field = first_field(&only_operation(&document).selection_set);
    assert_eq!(
        first_arg_value(field).to_string(),
        "[1, null, {x: WEST, y: $v}]",
    );
}

// =============================================================================
// Comment retention
// =============================================================================

#[test]
fn comments_dropped_by_default() {
    let document = parse_document("# leading\n{ f }");
    assert!(only_operation(&document).comment.is_none());
}

#[test]
fn comments_retained_when_requested() {
    let source = "# op comment\nquery Q {\n  # field comment\n  # second line\n  f\n}";
    let document = parse_with_options(
        source,
        ParserOptions {
            retain_comments: true,
        },
    )
    .unwrap();
    let operation = only_operation(&document);
    assert_eq!(operation.comment.as_deref(), Some(" op comment"));

    let field = first_field(&operation.selection_set);
    assert_eq!(
        field.comment.as_deref(),
        Some(" field comment\n second line"),
    );
}
