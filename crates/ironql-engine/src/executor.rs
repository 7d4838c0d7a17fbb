//! The execution engine: operation selection, concurrent field
//! resolution, type-directed completion, and non-null propagation.

use crate::collect::collect_fields;
use crate::input::bind_arguments;
use crate::input::coerce_variable_values;
use crate::schema::ObjectType;
use crate::schema::Resolved;
use crate::schema::ResolverContext;
use crate::schema::Schema;
use crate::schema::TypeDefinition;
use crate::schema::TypeRef;
use crate::schema::TypeResolver;
use crate::ExecutionError;
use crate::ExecutionResult;
use crate::PathSegment;
use crate::RequestError;
use crate::Value;
use futures::future::join_all;
use futures::future::BoxFuture;
use futures::FutureExt;
use indexmap::IndexMap;
use ironql_parser::ast;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::Instrument;

/// Executes parsed documents against one schema.
///
/// Stateless apart from the shared schema; one executor serves any number
/// of concurrent requests.
pub struct Executor {
    schema: Arc<Schema>,
}

impl Executor {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Executes one operation of `document`.
    ///
    /// Only pre-execution cancellation aborts the request; every other
    /// failure mode is reported inside the returned [`ExecutionResult`].
    pub async fn execute(
        &self,
        document: &ast::Document<'_>,
        operation_name: Option<&str>,
        variables: IndexMap<String, Value>,
        cancellation: CancellationToken,
    ) -> Result<ExecutionResult, RequestError> {
        if cancellation.is_cancelled() {
            return Err(RequestError::Cancelled);
        }

        let operation = match select_operation(document, operation_name) {
            Ok(operation) => operation,
            Err(error) => return Ok(ExecutionResult::from_errors(vec![error])),
        };
        let span = tracing::debug_span!(
            "execute",
            kind = %operation.kind,
            name = operation.name_str().unwrap_or(""),
        );
        Ok(self
            .execute_operation(document, operation, variables, cancellation)
            .instrument(span)
            .await)
    }

    async fn execute_operation(
        &self,
        document: &ast::Document<'_>,
        operation: &ast::OperationDefinition<'_>,
        variables: IndexMap<String, Value>,
        cancellation: CancellationToken,
    ) -> ExecutionResult {
        let variables =
            match coerce_variable_values(&self.schema, operation, &variables) {
                Ok(variables) => variables,
                Err(errors) => {
                    debug!(count = errors.len(), "variable coercion failed");
                    return ExecutionResult::from_errors(errors);
                },
            };

        let Some(root_type) = self.schema.root_type(operation.kind) else {
            return ExecutionResult::from_errors(vec![ExecutionError::new(
                format!(
                    "Schema is not configured for {}s.",
                    operation.kind.as_str(),
                ),
            )
            .at(operation.loc)]);
        };

        let fragments = document
            .fragments()
            .map(|fragment| (fragment.name.as_str(), fragment))
            .collect();

        let ctx = ExecutionContext {
            schema: &self.schema,
            fragments,
            variables,
            errors: Mutex::new(Vec::new()),
            cancellation,
        };

        // Mutation and subscription root fields run strictly serially;
        // everything below the root parallelizes regardless.
        let serial = operation.kind != ast::OperationKind::Query;
        let selection_sets = [&operation.selection_set];
        let data = match ctx
            .execute_selection_set(root_type, &selection_sets, &Value::Null, &[], serial)
            .await
        {
            Ok(data) => data,
            // A non-null root field failed; the whole tree nulls out but
            // the data key stays present.
            Err(Propagated) => Value::Null,
        };

        let errors = ctx
            .errors
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        ExecutionResult::new(data, errors)
    }
}

/// Picks the operation to execute: the named one, or the document's only
/// operation when no name is given.
fn select_operation<'a, 'src>(
    document: &'a ast::Document<'src>,
    name: Option<&str>,
) -> Result<&'a ast::OperationDefinition<'src>, ExecutionError> {
    let mut operations = document.operations();
    match name {
        Some(wanted) => operations
            .find(|operation| operation.name_str() == Some(wanted))
            .ok_or_else(|| {
                ExecutionError::new(format!(
                    "Unknown operation named \"{wanted}\".",
                ))
            }),
        None => {
            let first = operations
                .next()
                .ok_or_else(|| ExecutionError::new("Must provide an operation."))?;
            if operations.next().is_some() {
                return Err(ExecutionError::new(
                    "Must provide operation name if query contains multiple \
                     operations.",
                ));
            }
            Ok(first)
        },
    }
}

/// Marker for a field error that already nulled out the position where it
/// happened; ancestors only decide whether the null stops or keeps
/// climbing. Carries no payload because the error was recorded when it
/// arose.
pub(crate) struct Propagated;

/// Per-request execution state shared by all field futures.
struct ExecutionContext<'a, 'src> {
    schema: &'a Schema,
    fragments: IndexMap<&'a str, &'a ast::FragmentDefinition<'src>>,
    variables: IndexMap<String, Value>,
    /// Field errors, appended in completion order. Append-only.
    errors: Mutex<Vec<ExecutionError>>,
    cancellation: CancellationToken,
}

impl<'a, 'src> ExecutionContext<'a, 'src> {
    fn record(&self, error: ExecutionError) {
        debug!(message = %error.message, "field error recorded");
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(error);
    }

    /// The field-failure outcome for a declared type: non-null positions
    /// propagate, nullable positions absorb into null.
    fn failed(&self, field_type: &TypeRef) -> Result<Value, Propagated> {
        if field_type.is_non_null() {
            Err(Propagated)
        } else {
            Ok(Value::Null)
        }
    }

    /// Executes grouped fields against one object type and assembles the
    /// response object in declared selection order.
    fn execute_selection_set<'b>(
        &'b self,
        object_type: &'b ObjectType,
        selection_sets: &'b [&'a ast::SelectionSet<'src>],
        parent: &'b Value,
        path: &'b [PathSegment],
        serial: bool,
    ) -> BoxFuture<'b, Result<Value, Propagated>> {
        async move {
            let grouped = collect_fields(
                self.schema,
                object_type,
                selection_sets,
                &self.fragments,
                &self.variables,
            );

            let mut entries = Vec::with_capacity(grouped.len());
            if serial {
                for (response_key, fields) in grouped {
                    let value = self
                        .execute_field(object_type, response_key, &fields, parent, path)
                        .await;
                    entries.push((response_key, value));
                }
            } else {
                // Sibling fields resolve concurrently; `join_all` returns
                // results in future order, so assembly order is declared
                // selection order no matter which resolver finishes first.
                entries = join_all(grouped.into_iter().map(
                    |(response_key, fields)| async move {
                        let value = self
                            .execute_field(
                                object_type,
                                response_key,
                                &fields,
                                parent,
                                path,
                            )
                            .await;
                        (response_key, value)
                    },
                ))
                .await;
            }

            let mut object = IndexMap::with_capacity(entries.len());
            let mut propagated = false;
            for (response_key, value) in entries {
                match value {
                    Ok(value) => {
                        object.insert(response_key.to_string(), value);
                    },
                    Err(Propagated) => propagated = true,
                }
            }
            if propagated {
                Err(Propagated)
            } else {
                Ok(Value::Object(object))
            }
        }
        .boxed()
    }

    /// Resolves and completes one response position (one response key,
    /// possibly merged from several field selections).
    fn execute_field<'b>(
        &'b self,
        object_type: &'b ObjectType,
        response_key: &'a str,
        fields: &'b [&'a ast::Field<'src>],
        parent: &'b Value,
        path: &'b [PathSegment],
    ) -> BoxFuture<'b, Result<Value, Propagated>> {
        async move {
            let field = fields[0];
            let field_name = field.name.as_str();

            // The meta-field is available in any selection set and never
            // errors.
            if field_name == "__typename" {
                return Ok(Value::String(object_type.name.clone()));
            }

            let mut field_path = path.to_vec();
            field_path.push(PathSegment::Field(response_key.to_string()));

            let Some(field_def) = object_type.fields.get(field_name) else {
                self.record(
                    ExecutionError::new(format!(
                        "Cannot query field \"{field_name}\" on type \
                         \"{}\".",
                        object_type.name,
                    ))
                    .at(field.loc)
                    .with_path(field_path),
                );
                return Ok(Value::Null);
            };

            if self.cancellation.is_cancelled() {
                self.record(
                    ExecutionError::new("Request was cancelled.")
                        .at(field.loc)
                        .with_path(field_path),
                );
                return self.failed(&field_def.field_type);
            }

            let args = match bind_arguments(
                self.schema,
                field,
                &field_def.arguments,
                &self.variables,
            ) {
                Ok(args) => args,
                Err(error) => {
                    self.record(error.with_path(field_path));
                    return self.failed(&field_def.field_type);
                },
            };

            let resolved = match &field_def.resolver {
                Some(resolver) => {
                    resolver(ResolverContext {
                        parent: parent.clone(),
                        args,
                        field_name: field_name.to_string(),
                        path: field_path.clone(),
                        cancellation: self.cancellation.clone(),
                    })
                    .await
                },
                // Default property resolver: key lookup in the parent
                // object value.
                None => Ok(Resolved::value(
                    parent.get(field_name).cloned().unwrap_or(Value::Null),
                )),
            };

            match resolved {
                Ok(resolved) => {
                    self.complete_value(
                        &field_def.field_type,
                        resolved.value,
                        resolved.type_name,
                        &object_type.name,
                        fields,
                        &field_path,
                    )
                    .await
                },
                Err(error) => {
                    self.record(
                        ExecutionError::new(error.message)
                            .at(field.loc)
                            .with_path(field_path),
                    );
                    self.failed(&field_def.field_type)
                },
            }
        }
        .boxed()
    }

    /// Completes a resolved value against its declared type, deciding at
    /// each wrapper whether nulls stop here or keep climbing.
    fn complete_value<'b>(
        &'b self,
        field_type: &'b TypeRef,
        value: Value,
        type_hint: Option<String>,
        parent_type_name: &'b str,
        fields: &'b [&'a ast::Field<'src>],
        path: &'b [PathSegment],
    ) -> BoxFuture<'b, Result<Value, Propagated>> {
        async move {
            match field_type {
                TypeRef::NonNull(inner) => {
                    match self
                        .complete_inner(
                            inner,
                            value,
                            type_hint,
                            parent_type_name,
                            fields,
                            path,
                        )
                        .await
                    {
                        Ok(Value::Null) => {
                            let field = fields[0];
                            debug!(
                                field = field.name.as_str(),
                                "null reached a non-null position",
                            );
                            self.record(
                                ExecutionError::new(format!(
                                    "Cannot return null for non-nullable \
                                     field {parent_type_name}.{}.",
                                    field.name.as_str(),
                                ))
                                .at(field.loc)
                                .with_path(path.to_vec()),
                            );
                            Err(Propagated)
                        },
                        // A deeper error was already recorded; pass the
                        // propagation through without a second error.
                        other => other,
                    }
                },
                nullable => {
                    match self
                        .complete_inner(
                            nullable,
                            value,
                            type_hint,
                            parent_type_name,
                            fields,
                            path,
                        )
                        .await
                    {
                        // Nullable positions absorb propagation: the null
                        // stops climbing here.
                        Err(Propagated) => Ok(Value::Null),
                        ok => ok,
                    }
                },
            }
        }
        .boxed()
    }

    /// Completes the unwrapped (list or named) shape of a type. Returns
    /// `Err(Propagated)` only for failures already recorded.
    fn complete_inner<'b>(
        &'b self,
        field_type: &'b TypeRef,
        value: Value,
        type_hint: Option<String>,
        parent_type_name: &'b str,
        fields: &'b [&'a ast::Field<'src>],
        path: &'b [PathSegment],
    ) -> BoxFuture<'b, Result<Value, Propagated>> {
        async move {
            if value.is_null() {
                return Ok(Value::Null);
            }
            let field = fields[0];

            match field_type {
                TypeRef::NonNull(inner) => {
                    self.complete_inner(
                        inner,
                        value,
                        type_hint,
                        parent_type_name,
                        fields,
                        path,
                    )
                    .await
                },
                TypeRef::List(inner) => {
                    let Value::List(items) = value else {
                        self.record(
                            ExecutionError::new(format!(
                                "Expected a list value for field \
                                 {parent_type_name}.{}.",
                                field.name.as_str(),
                            ))
                            .at(field.loc)
                            .with_path(path.to_vec()),
                        );
                        return Err(Propagated);
                    };

                    // Elements complete concurrently; results come back
                    // in element order.
                    let results =
                        join_all(items.into_iter().enumerate().map(
                            |(index, item)| {
                                let type_hint = type_hint.clone();
                                let mut item_path = path.to_vec();
                                item_path.push(PathSegment::Index(index));
                                async move {
                                    self.complete_value(
                                        inner,
                                        item,
                                        type_hint,
                                        parent_type_name,
                                        fields,
                                        &item_path,
                                    )
                                    .await
                                }
                            },
                        ))
                        .await;

                    let mut completed = Vec::with_capacity(results.len());
                    let mut propagated = false;
                    for result in results {
                        match result {
                            Ok(value) => completed.push(value),
                            Err(Propagated) => propagated = true,
                        }
                    }
                    if propagated {
                        Err(Propagated)
                    } else {
                        Ok(Value::List(completed))
                    }
                },
                TypeRef::Named(name) => {
                    self.complete_named(
                        name,
                        value,
                        type_hint,
                        parent_type_name,
                        fields,
                        path,
                    )
                    .await
                },
            }
        }
        .boxed()
    }

    async fn complete_named<'b>(
        &'b self,
        type_name: &'b str,
        value: Value,
        type_hint: Option<String>,
        parent_type_name: &'b str,
        fields: &'b [&'a ast::Field<'src>],
        path: &'b [PathSegment],
    ) -> Result<Value, Propagated> {
        let field = fields[0];
        match self.schema.type_named(type_name) {
            Some(TypeDefinition::Scalar(scalar)) => {
                match scalar.serialize(&value) {
                    Ok(value) => Ok(value),
                    Err(reason) => {
                        self.record(
                            ExecutionError::new(reason)
                                .at(field.loc)
                                .with_path(path.to_vec()),
                        );
                        Err(Propagated)
                    },
                }
            },
            Some(TypeDefinition::Enum(enum_type)) => {
                match value.as_str() {
                    Some(name) if enum_type.contains(name) => {
                        Ok(Value::Enum(name.to_string()))
                    },
                    _ => {
                        self.record(
                            ExecutionError::new(format!(
                                "Enum \"{type_name}\" cannot represent value: \
                                 {value:?}",
                            ))
                            .at(field.loc)
                            .with_path(path.to_vec()),
                        );
                        Err(Propagated)
                    },
                }
            },
            Some(TypeDefinition::Object(object)) => {
                self.complete_object(object, value, fields, path).await
            },
            Some(TypeDefinition::Interface(interface)) => {
                let narrowed = self.narrow_abstract(
                    &type_hint,
                    &value,
                    interface.resolve_type.as_ref(),
                );
                let object = narrowed.as_deref().and_then(|concrete| {
                    self.schema.object_type(concrete).filter(|object| {
                        object
                            .interfaces
                            .iter()
                            .any(|name| name == type_name)
                    })
                });
                match object {
                    Some(object) => {
                        self.complete_object(object, value, fields, path).await
                    },
                    None => {
                        self.record_narrowing_failure(
                            type_name,
                            parent_type_name,
                            fields,
                            path,
                        );
                        Err(Propagated)
                    },
                }
            },
            Some(TypeDefinition::Union(union)) => {
                let narrowed = self.narrow_abstract(
                    &type_hint,
                    &value,
                    union.resolve_type.as_ref(),
                );
                let object = narrowed
                    .as_deref()
                    .filter(|concrete| union.contains(concrete))
                    .and_then(|concrete| self.schema.object_type(concrete));
                match object {
                    Some(object) => {
                        self.complete_object(object, value, fields, path).await
                    },
                    None => {
                        self.record_narrowing_failure(
                            type_name,
                            parent_type_name,
                            fields,
                            path,
                        );
                        Err(Propagated)
                    },
                }
            },
            Some(TypeDefinition::InputObject(_)) | None => {
                self.record(
                    ExecutionError::new(format!(
                        "Type \"{type_name}\" is not a valid output type.",
                    ))
                    .at(field.loc)
                    .with_path(path.to_vec()),
                );
                Err(Propagated)
            },
        }
    }

    async fn complete_object<'b>(
        &'b self,
        object_type: &'b ObjectType,
        value: Value,
        fields: &'b [&'a ast::Field<'src>],
        path: &'b [PathSegment],
    ) -> Result<Value, Propagated> {
        // Merge the sub-selections of every field selected under this
        // response key.
        let sub_selections: Vec<&'a ast::SelectionSet<'src>> = fields
            .iter()
            .filter_map(|field| field.selection_set.as_ref())
            .collect();

        if sub_selections.is_empty() {
            let field = fields[0];
            self.record(
                ExecutionError::new(format!(
                    "Field \"{}\" of type \"{}\" must have a selection of \
                     subfields.",
                    field.name.as_str(),
                    object_type.name,
                ))
                .at(field.loc)
                .with_path(path.to_vec()),
            );
            return Err(Propagated);
        }

        self.execute_selection_set(object_type, &sub_selections, &value, path, false)
            .await
    }

    /// Determines the concrete object type of an abstract-typed value:
    /// the resolver's tag, then a `__typename` entry, then the type's
    /// `resolve_type` delegate.
    fn narrow_abstract(
        &self,
        type_hint: &Option<String>,
        value: &Value,
        resolve_type: Option<&TypeResolver>,
    ) -> Option<String> {
        type_hint
            .clone()
            .or_else(|| {
                value
                    .get("__typename")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .or_else(|| resolve_type.and_then(|resolve| resolve(value)))
    }

    fn record_narrowing_failure(
        &self,
        type_name: &str,
        parent_type_name: &str,
        fields: &[&ast::Field<'_>],
        path: &[PathSegment],
    ) {
        let field = fields[0];
        self.record(
            ExecutionError::new(format!(
                "Abstract type \"{type_name}\" must resolve to an object \
                 type at runtime for field {parent_type_name}.{}.",
                field.name.as_str(),
            ))
            .at(field.loc)
            .with_path(path.to_vec()),
        );
    }
}
