//! Shared helpers for the engine tests: a small Star Wars flavored schema
//! and execution shorthands.

use crate::schema::resolve_fn;
use crate::schema::EnumType;
use crate::schema::FieldDefinition;
use crate::schema::InputValueDefinition;
use crate::schema::InterfaceType;
use crate::schema::ObjectType;
use crate::schema::Resolved;
use crate::schema::Schema;
use crate::schema::TypeDefinition;
use crate::schema::TypeRef;
use crate::schema::UnionType;
use crate::ExecutionResult;
use crate::Executor;
use crate::Value;
use indexmap::IndexMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Executes `source` against `schema` with no name or variables.
pub(crate) async fn run(schema: Schema, source: &str) -> ExecutionResult {
    run_with(schema, source, None, IndexMap::new()).await
}

pub(crate) async fn run_with(
    schema: Schema,
    source: &str,
    operation_name: Option<&str>,
    variables: IndexMap<String, Value>,
) -> ExecutionResult {
    let document = ironql_parser::parse(source).expect("document should parse");
    Executor::new(Arc::new(schema))
        .execute(&document, operation_name, variables, CancellationToken::new())
        .await
        .expect("request should not be cancelled")
}

/// Serializes a result for bit-exact response shape assertions.
pub(crate) fn json(result: &ExecutionResult) -> String {
    serde_json::to_string(result).expect("result should serialize")
}

pub(crate) fn r2d2() -> Value {
    Value::object([
        ("name", Value::from("R2-D2")),
        ("primaryFunction", Value::from("Astromech")),
    ])
}

pub(crate) fn luke() -> Value {
    Value::object([
        ("name", Value::from("Luke Skywalker")),
        ("homePlanet", Value::from("Tatooine")),
    ])
}

/// A schema with an interface (`Character`), two implementing objects,
/// a union (`SearchResult`), an enum (`Episode`), and a query root whose
/// object fields rely on the default property resolver.
pub(crate) fn hero_schema() -> Schema {
    let human = ObjectType::new("Human")
        .implements("Character")
        .field(FieldDefinition::new(
            "name",
            TypeRef::non_null(TypeRef::named("String")),
        ))
        .field(FieldDefinition::new("homePlanet", TypeRef::named("String")));

    let droid = ObjectType::new("Droid")
        .implements("Character")
        .field(FieldDefinition::new(
            "name",
            TypeRef::non_null(TypeRef::named("String")),
        ))
        .field(FieldDefinition::new(
            "primaryFunction",
            TypeRef::named("String"),
        ));

    let query = ObjectType::new("Query")
        .field(
            FieldDefinition::new("hero", TypeRef::named("Character"))
                .argument(InputValueDefinition::new(
                    "episode",
                    TypeRef::named("Episode"),
                ))
                .resolve(resolve_fn(|ctx| async move {
                    match ctx.arg("episode").and_then(Value::as_str) {
                        Some("EMPIRE") => Ok(Resolved::with_type(luke(), "Human")),
                        _ => Ok(Resolved::with_type(r2d2(), "Droid")),
                    }
                })),
        )
        .field(
            FieldDefinition::new("droid", TypeRef::named("Droid"))
                .argument(InputValueDefinition::new(
                    "id",
                    TypeRef::non_null(TypeRef::named("ID")),
                ))
                .resolve(resolve_fn(|ctx| async move {
                    match ctx.arg("id").and_then(Value::as_str) {
                        Some("2001") => Ok(Resolved::value(r2d2())),
                        _ => Ok(Resolved::null()),
                    }
                })),
        )
        .field(
            FieldDefinition::new(
                "search",
                TypeRef::list(TypeRef::named("SearchResult")),
            )
            .resolve(resolve_fn(|_| async move {
                let mut tagged_luke = luke();
                let mut tagged_r2 = r2d2();
                if let Value::Object(fields) = &mut tagged_luke {
                    fields.insert(
                        "__typename".to_string(),
                        Value::from("Human"),
                    );
                }
                if let Value::Object(fields) = &mut tagged_r2 {
                    fields.insert(
                        "__typename".to_string(),
                        Value::from("Droid"),
                    );
                }
                Ok(Resolved::value(Value::List(vec![tagged_luke, tagged_r2])))
            })),
        );

    Schema::new(query)
        .with_type(TypeDefinition::Object(human))
        .with_type(TypeDefinition::Object(droid))
        .with_type(TypeDefinition::Interface(InterfaceType::new("Character")))
        .with_type(TypeDefinition::Union(UnionType::new(
            "SearchResult",
            ["Human", "Droid"],
        )))
        .with_type(TypeDefinition::Enum(EnumType::new(
            "Episode",
            ["NEWHOPE", "EMPIRE", "JEDI"],
        )))
}
