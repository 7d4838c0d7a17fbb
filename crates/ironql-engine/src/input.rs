//! Input coercion: variables against their declared types, and argument
//! binding (literals plus variable substitution) against field argument
//! definitions.

use crate::schema::InputValueDefinition;
use crate::schema::Schema;
use crate::schema::TypeDefinition;
use crate::schema::TypeRef;
use crate::ExecutionError;
use crate::Value;
use indexmap::IndexMap;
use ironql_parser::ast;

/// Converts a document type annotation into a schema type reference.
pub fn type_ref_from_annotation(annotation: &ast::TypeAnnotation<'_>) -> TypeRef {
    match annotation {
        ast::TypeAnnotation::Named(name) => TypeRef::named(name.as_str()),
        ast::TypeAnnotation::List(inner, _) => {
            TypeRef::list(type_ref_from_annotation(inner))
        },
        ast::TypeAnnotation::NonNull(inner, _) => {
            TypeRef::non_null(type_ref_from_annotation(inner))
        },
    }
}

/// Converts a document literal to a runtime value, substituting variables
/// from `variables`. Returns `None` when a referenced variable is absent,
/// which callers treat the same as an omitted value.
pub fn value_from_ast(
    literal: &ast::Value<'_>,
    variables: &IndexMap<String, Value>,
) -> Option<Value> {
    match literal {
        ast::Value::Variable { name, .. } => {
            variables.get(name.as_ref()).cloned()
        },
        ast::Value::Int { value, .. } => Some(Value::Int(*value)),
        ast::Value::Float { value, .. } => Some(Value::Float(*value)),
        ast::Value::String { value, .. } => {
            Some(Value::String(value.to_string()))
        },
        ast::Value::Boolean { value, .. } => Some(Value::Boolean(*value)),
        ast::Value::Null { .. } => Some(Value::Null),
        ast::Value::Enum { value, .. } => Some(Value::Enum(value.to_string())),
        ast::Value::List { items, .. } => {
            let mut list = Vec::with_capacity(items.len());
            for item in items {
                // A missing variable inside a list becomes null rather
                // than dropping the element.
                list.push(
                    value_from_ast(item, variables).unwrap_or(Value::Null),
                );
            }
            Some(Value::List(list))
        },
        ast::Value::Object { fields, .. } => {
            let mut object = IndexMap::with_capacity(fields.len());
            for field in fields {
                if let Some(value) = value_from_ast(&field.value, variables) {
                    object.insert(field.name.as_str().to_string(), value);
                }
            }
            Some(Value::Object(object))
        },
    }
}

/// Coerces the variable values provided with a request against the
/// operation's variable definitions, applying declared defaults.
///
/// All failures are collected rather than stopping at the first, so a
/// request with several bad variables reports them all.
pub fn coerce_variable_values(
    schema: &Schema,
    operation: &ast::OperationDefinition<'_>,
    provided: &IndexMap<String, Value>,
) -> Result<IndexMap<String, Value>, Vec<ExecutionError>> {
    let mut coerced = IndexMap::new();
    let mut errors = Vec::new();
    let no_variables = IndexMap::new();

    for definition in &operation.variable_definitions {
        let name = definition.name.as_str();
        let var_type = type_ref_from_annotation(&definition.var_type);

        let value = match provided.get(name) {
            Some(value) => Some(value.clone()),
            None => definition
                .default_value
                .as_ref()
                .and_then(|default| value_from_ast(default, &no_variables)),
        };

        match value {
            None if var_type.is_non_null() => {
                errors.push(
                    ExecutionError::new(format!(
                        "Variable \"${name}\" of required type \
                         \"{var_type}\" was not provided.",
                    ))
                    .at(definition.loc),
                );
            },
            None => {},
            Some(value) => match coerce_input_value(schema, &var_type, value) {
                Ok(value) => {
                    coerced.insert(name.to_string(), value);
                },
                Err(reason) => {
                    errors.push(
                        ExecutionError::new(format!(
                            "Variable \"${name}\" got invalid value; {reason}",
                        ))
                        .at(definition.loc),
                    );
                },
            },
        }
    }

    if errors.is_empty() {
        Ok(coerced)
    } else {
        Err(errors)
    }
}

/// Coerces one externally provided value against a declared input type.
pub fn coerce_input_value(
    schema: &Schema,
    expected: &TypeRef,
    value: Value,
) -> Result<Value, String> {
    match expected {
        TypeRef::NonNull(inner) => {
            if value.is_null() {
                Err(format!(
                    "Expected non-nullable type \"{expected}\" not to be null.",
                ))
            } else {
                coerce_input_value(schema, inner, value)
            }
        },
        _ if value.is_null() => Ok(Value::Null),
        TypeRef::List(inner) => {
            let items = match value {
                Value::List(items) => items,
                // A single non-list value coerces to a one-element list.
                single => vec![single],
            };
            let mut coerced = Vec::with_capacity(items.len());
            for item in items {
                coerced.push(coerce_input_value(schema, inner, item)?);
            }
            Ok(Value::List(coerced))
        },
        TypeRef::Named(name) => coerce_named_input(schema, name, value),
    }
}

fn coerce_named_input(
    schema: &Schema,
    type_name: &str,
    value: Value,
) -> Result<Value, String> {
    match schema.type_named(type_name) {
        Some(TypeDefinition::Scalar(scalar)) => scalar.parse_value(&value),
        Some(TypeDefinition::Enum(enum_type)) => {
            let name = value
                .as_str()
                .ok_or_else(|| format!(
                    "Enum \"{type_name}\" cannot represent non-enum value: \
                     {value:?}",
                ))?;
            if enum_type.contains(name) {
                Ok(Value::Enum(name.to_string()))
            } else {
                Err(format!(
                    "Value \"{name}\" does not exist in \"{type_name}\" enum.",
                ))
            }
        },
        Some(TypeDefinition::InputObject(input_object)) => {
            let Value::Object(mut provided) = value else {
                return Err(format!(
                    "Expected type \"{type_name}\" to be an object.",
                ));
            };
            let mut coerced = IndexMap::new();
            for (field_name, field_def) in &input_object.fields {
                match provided.shift_remove(field_name) {
                    Some(field_value) => {
                        let value = coerce_input_value(
                            schema,
                            &field_def.value_type,
                            field_value,
                        )
                        .map_err(|reason| {
                            format!("In field \"{field_name}\": {reason}")
                        })?;
                        coerced.insert(field_name.clone(), value);
                    },
                    None => match &field_def.default_value {
                        Some(default) => {
                            coerced.insert(field_name.clone(), default.clone());
                        },
                        None if field_def.value_type.is_non_null() => {
                            return Err(format!(
                                "Field \"{field_name}\" of required type \
                                 \"{}\" was not provided.",
                                field_def.value_type,
                            ));
                        },
                        None => {},
                    },
                }
            }
            if let Some(unknown) = provided.keys().next() {
                return Err(format!(
                    "Field \"{unknown}\" is not defined by type \
                     \"{type_name}\".",
                ));
            }
            Ok(Value::Object(coerced))
        },
        Some(_) => Err(format!(
            "Type \"{type_name}\" is not a valid input type.",
        )),
        None => Err(format!("Unknown type \"{type_name}\".")),
    }
}

/// Binds a field's arguments: literals are converted (with variable
/// substitution), declared defaults applied, and everything coerced
/// against the declared argument types.
pub fn bind_arguments(
    schema: &Schema,
    field: &ast::Field<'_>,
    definitions: &[InputValueDefinition],
    variables: &IndexMap<String, Value>,
) -> Result<IndexMap<String, Value>, ExecutionError> {
    let mut bound = IndexMap::new();

    for definition in definitions {
        let supplied = field
            .arguments
            .iter()
            .find(|argument| argument.name.as_str() == definition.name);

        let (value, loc) = match supplied {
            Some(argument) => (
                literal_to_value(
                    schema,
                    &definition.value_type,
                    &argument.value,
                    variables,
                ),
                argument.value.loc(),
            ),
            None => (
                definition
                    .default_value
                    .clone(),
                field.loc,
            ),
        };

        match value {
            Some(value) => {
                let coerced =
                    coerce_input_value(schema, &definition.value_type, value)
                        .map_err(|reason| {
                            ExecutionError::new(format!(
                                "Argument \"{}\" has invalid value; {reason}",
                                definition.name,
                            ))
                            .at(loc)
                        })?;
                bound.insert(definition.name.clone(), coerced);
            },
            None if definition.value_type.is_non_null() => {
                return Err(ExecutionError::new(format!(
                    "Argument \"{}\" of required type \"{}\" was not \
                     provided.",
                    definition.name, definition.value_type,
                ))
                .at(field.loc));
            },
            None => {},
        }
    }

    Ok(bound)
}

/// Converts an argument literal, preferring a scalar's literal parser
/// when the declared type provides one.
fn literal_to_value(
    schema: &Schema,
    expected: &TypeRef,
    literal: &ast::Value<'_>,
    variables: &IndexMap<String, Value>,
) -> Option<Value> {
    if let Some(scalar) = schema.scalar_type(expected.nullable().innermost_name())
        && !matches!(literal, ast::Value::Variable { .. })
        && let Some(Ok(parsed)) = scalar.parse_literal(literal)
    {
        return Some(parsed);
    }
    value_from_ast(literal, variables)
}
