//! End-to-end GraphQL query processing: parse, validate, execute.
//!
//! The parser lives in `ironql-parser`, the execution engine in
//! `ironql-engine`; this crate ties them together behind one
//! [`execute`] entry point and re-exports the surface most embedders
//! need.
//!
//! ```no_run
//! # use ironql::{execute, Request, schema::{FieldDefinition, ObjectType, Schema, TypeRef}};
//! # use std::sync::Arc;
//! # async fn demo() {
//! let schema = Arc::new(Schema::new(
//!     ObjectType::new("Query")
//!         .field(FieldDefinition::new("greeting", TypeRef::named("String"))),
//! ));
//! let result = execute(&schema, Request::new("{ greeting }")).await.unwrap();
//! # }
//! ```

mod request;

pub use request::Request;

pub use ironql_engine::convert_list;
pub use ironql_engine::schema;
pub use ironql_engine::CoerceElement;
pub use ironql_engine::ConverterRegistry;
pub use ironql_engine::ConverterRegistryBuilder;
pub use ironql_engine::DefaultValidator;
pub use ironql_engine::DocumentValidator;
pub use ironql_engine::ErrorLocation;
pub use ironql_engine::ExecutionError;
pub use ironql_engine::ExecutionResult;
pub use ironql_engine::Executor;
pub use ironql_engine::FromValue;
pub use ironql_engine::PathSegment;
pub use ironql_engine::RequestError;
pub use ironql_engine::SubscriptionPipeline;
pub use ironql_engine::ValidationError;
pub use ironql_engine::Value;
pub use ironql_parser::ast;
pub use ironql_parser::parse;
pub use ironql_parser::parse_with_options;
pub use ironql_parser::ParserOptions;
pub use ironql_parser::SourceLocation;
pub use ironql_parser::SyntaxError;
pub use ironql_parser::SyntaxErrorKind;

use ironql_engine::schema::Schema;
use std::sync::Arc;
use tracing::debug;

/// Runs a request through parse, validation, and execution with the
/// stock validator.
///
/// Syntax and validation failures come back as an [`ExecutionResult`]
/// carrying only errors; `Err` is reserved for cancellation ahead of
/// execution.
pub async fn execute(
    schema: &Arc<Schema>,
    request: Request<'_>,
) -> Result<ExecutionResult, RequestError> {
    execute_validated(schema, request, &DefaultValidator).await
}

/// [`execute`] with a caller-chosen validator.
pub async fn execute_validated(
    schema: &Arc<Schema>,
    request: Request<'_>,
    validator: &dyn DocumentValidator,
) -> Result<ExecutionResult, RequestError> {
    let document = match parse(request.source()) {
        Ok(document) => document,
        Err(error) => {
            debug!(%error, "request failed to parse");
            return Ok(ExecutionResult::from_errors(vec![error.into()]));
        },
    };

    let findings = validator.validate(schema, &document);
    if !findings.is_empty() {
        debug!(count = findings.len(), "request failed validation");
        return Ok(ExecutionResult::from_errors(
            findings.into_iter().map(Into::into).collect(),
        ));
    }

    let (operation_name, variables, cancellation) = request.into_parts();
    Executor::new(Arc::clone(schema))
        .execute(&document, operation_name, variables, cancellation)
        .await
}

#[cfg(test)]
mod tests;
