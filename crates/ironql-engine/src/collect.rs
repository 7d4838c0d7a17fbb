//! Field collection: flattening a selection set (fields, fragment
//! spreads, inline fragments) into response-key-grouped fields for one
//! concrete object type.

use crate::schema::ObjectType;
use crate::schema::Schema;
use crate::Value;
use indexmap::IndexMap;
use indexmap::IndexSet;
use ironql_parser::ast;

/// Fields grouped by response key, in first-encounter order. Several
/// entries under one key mean the key was selected more than once (via
/// fragments or repeated selection) and their sub-selections merge.
pub(crate) type GroupedFields<'a, 'src> =
    IndexMap<&'a str, Vec<&'a ast::Field<'src>>>;

/// Collects the fields of `selection_set` that apply to `object_type`,
/// resolving fragment spreads, honoring type conditions, and evaluating
/// `@skip`/`@include`.
pub(crate) fn collect_fields<'a, 'src>(
    schema: &Schema,
    object_type: &ObjectType,
    selection_sets: &[&'a ast::SelectionSet<'src>],
    fragments: &IndexMap<&'a str, &'a ast::FragmentDefinition<'src>>,
    variables: &IndexMap<String, Value>,
) -> GroupedFields<'a, 'src> {
    let mut grouped = GroupedFields::new();
    let mut visited_fragments = IndexSet::new();
    for selection_set in selection_sets {
        collect_into(
            schema,
            object_type,
            selection_set,
            fragments,
            variables,
            &mut grouped,
            &mut visited_fragments,
        );
    }
    grouped
}

fn collect_into<'a, 'src>(
    schema: &Schema,
    object_type: &ObjectType,
    selection_set: &'a ast::SelectionSet<'src>,
    fragments: &IndexMap<&'a str, &'a ast::FragmentDefinition<'src>>,
    variables: &IndexMap<String, Value>,
    grouped: &mut GroupedFields<'a, 'src>,
    visited_fragments: &mut IndexSet<&'a str>,
) {
    for selection in &selection_set.selections {
        match selection {
            ast::Selection::Field(field) => {
                if skipped(&field.directives, variables) {
                    continue;
                }
                grouped
                    .entry(field.response_key())
                    .or_default()
                    .push(field);
            },
            ast::Selection::FragmentSpread(spread) => {
                if skipped(&spread.directives, variables) {
                    continue;
                }
                let name = spread.fragment_name.as_str();
                // Cycles are a validation error; guarding here keeps
                // collection terminating regardless.
                if !visited_fragments.insert(name) {
                    continue;
                }
                if let Some(fragment) = fragments.get(name)
                    && schema.type_condition_applies(
                        fragment.type_condition.as_str(),
                        object_type,
                    )
                {
                    collect_into(
                        schema,
                        object_type,
                        &fragment.selection_set,
                        fragments,
                        variables,
                        grouped,
                        visited_fragments,
                    );
                }
                visited_fragments.shift_remove(name);
            },
            ast::Selection::InlineFragment(fragment) => {
                if skipped(&fragment.directives, variables) {
                    continue;
                }
                let applies = match &fragment.type_condition {
                    Some(condition) => schema.type_condition_applies(
                        condition.as_str(),
                        object_type,
                    ),
                    None => true,
                };
                if applies {
                    collect_into(
                        schema,
                        object_type,
                        &fragment.selection_set,
                        fragments,
                        variables,
                        grouped,
                        visited_fragments,
                    );
                }
            },
        }
    }
}

/// Evaluates `@skip(if:)` and `@include(if:)` on a selection. A condition
/// that does not evaluate to a boolean leaves the directive inert.
fn skipped(
    directives: &[ast::Directive<'_>],
    variables: &IndexMap<String, Value>,
) -> bool {
    for directive in directives {
        let condition = || {
            directive
                .arguments
                .iter()
                .find(|argument| argument.name.as_str() == "if")
                .and_then(|argument| {
                    condition_value(&argument.value, variables)
                })
        };
        match directive.name.as_str() {
            "skip" if condition() == Some(true) => return true,
            "include" if condition() == Some(false) => return true,
            _ => {},
        }
    }
    false
}

fn condition_value(
    value: &ast::Value<'_>,
    variables: &IndexMap<String, Value>,
) -> Option<bool> {
    match value {
        ast::Value::Boolean { value, .. } => Some(*value),
        ast::Value::Variable { name, .. } => {
            variables.get(name.as_ref())?.as_bool()
        },
        _ => None,
    }
}
