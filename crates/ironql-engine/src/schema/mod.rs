//! The schema registry interface the engine executes against.
//!
//! A [`Schema`] maps type names to definitions and names its root
//! operation types. The engine only consumes it; construction is up to
//! the embedding application (typically at startup, then shared behind an
//! `Arc`).

mod abstract_type;
mod enum_type;
mod input_object;
mod object;
mod resolver;
mod scalar;
#[allow(clippy::module_inception)]
mod schema;
mod type_ref;

pub use abstract_type::InterfaceType;
pub use abstract_type::TypeResolver;
pub use abstract_type::UnionType;
pub use enum_type::EnumType;
pub use input_object::InputObjectType;
pub use object::FieldDefinition;
pub use object::InputValueDefinition;
pub use object::ObjectType;
pub use resolver::resolve_fn;
pub use resolver::Resolved;
pub use resolver::Resolver;
pub use resolver::ResolverContext;
pub use resolver::ResolverError;
pub use resolver::ResolverFuture;
pub use scalar::ScalarType;
pub use schema::Schema;
pub use schema::TypeDefinition;
pub use type_ref::TypeRef;
