//! Execution engine for parsed GraphQL documents: schema-directed field
//! resolution with concurrent siblings, input and result coercion,
//! non-null propagation, field-scoped error capture, and an ordered
//! subscription event pipeline.

mod collect;
mod convert;
mod error;
mod executor;
mod input;
mod response;
mod subscription;
mod validate;
mod value;

pub mod schema;

pub use convert::convert_list;
pub use convert::CoerceElement;
pub use convert::ConverterRegistry;
pub use convert::ConverterRegistryBuilder;
pub use convert::FromValue;
pub use error::ErrorLocation;
pub use error::ExecutionError;
pub use error::PathSegment;
pub use error::RequestError;
pub use executor::Executor;
pub use input::coerce_variable_values;
pub use response::ExecutionResult;
pub use subscription::SubscriptionPipeline;
pub use validate::DefaultValidator;
pub use validate::DocumentValidator;
pub use validate::ValidationError;
pub use value::Value;

#[cfg(test)]
mod tests;
