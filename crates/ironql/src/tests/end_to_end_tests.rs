//! End-to-end tests of the parse → validate → execute entry point.

use crate::execute;
use crate::schema::resolve_fn;
use crate::schema::FieldDefinition;
use crate::schema::InputValueDefinition;
use crate::schema::ObjectType;
use crate::schema::Resolved;
use crate::schema::Schema;
use crate::schema::TypeRef;
use crate::Request;
use crate::RequestError;
use crate::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn greeting_schema() -> Arc<Schema> {
    let query = ObjectType::new("Query").field(
        FieldDefinition::new("greeting", TypeRef::named("String"))
            .argument(
                InputValueDefinition::new("name", TypeRef::named("String"))
                    .default("world"),
            )
            .resolve(resolve_fn(|ctx| async move {
                let name = ctx
                    .arg("name")
                    .and_then(Value::as_str)
                    .unwrap_or("world")
                    .to_string();
                Ok(Resolved::value(format!("Hello, {name}!")))
            })),
    );
    Arc::new(Schema::new(query))
}

#[tokio::test]
async fn executes_a_simple_request() {
    init_tracing();
    let result = execute(&greeting_schema(), Request::new("{ greeting }"))
        .await
        .unwrap();
    assert_eq!(
        serde_json::to_string(&result).unwrap(),
        r#"{"data":{"greeting":"Hello, world!"}}"#,
    );
}

#[tokio::test]
async fn variables_and_operation_name_flow_through() {
    let request = Request::new(
        "query Ignored { greeting } \
         query Greet($name: String) { greeting(name: $name) }",
    )
    .operation_name("Greet")
    .variable("name", "Leia");

    let result = execute(&greeting_schema(), request).await.unwrap();
    assert_eq!(
        serde_json::to_string(&result).unwrap(),
        r#"{"data":{"greeting":"Hello, Leia!"}}"#,
    );
}

/// Syntax errors surface as a result with the full rendered message,
/// source excerpt included, and no data key.
#[tokio::test]
async fn syntax_errors_become_result_errors() {
    let result = execute(&greeting_schema(), Request::new("{ greeting"))
        .await
        .unwrap();
    assert_eq!(result.data, None);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(
        result.errors[0].message,
        "Syntax Error GraphQL (1:11) Expected Name, found EOF.\n\
         1: { greeting\n             \
         ^",
    );
    assert_eq!(result.errors[0].locations[0].line, 1);
    assert_eq!(result.errors[0].locations[0].column, 11);
}

#[tokio::test]
async fn validation_failures_short_circuit_execution() {
    let result = execute(
        &greeting_schema(),
        Request::new("{ greeting ...missing }"),
    )
    .await
    .unwrap();
    assert_eq!(result.data, None);
    assert_eq!(result.errors[0].message, "Unknown fragment \"missing\".");
}

#[tokio::test]
async fn cancelled_requests_abort() {
    let token = CancellationToken::new();
    token.cancel();
    let outcome = execute(
        &greeting_schema(),
        Request::new("{ greeting }").cancellation(token),
    )
    .await;
    assert_eq!(outcome.unwrap_err(), RequestError::Cancelled);
}
