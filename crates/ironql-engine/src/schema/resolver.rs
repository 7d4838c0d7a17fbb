use crate::PathSegment;
use crate::Value;
use indexmap::IndexMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// The boxed future a resolver returns.
pub type ResolverFuture =
    Pin<Box<dyn Future<Output = Result<Resolved, ResolverError>> + Send>>;

/// A field resolver delegate.
///
/// Resolvers receive a fully owned [`ResolverContext`] so their futures
/// are `'static` and can make independent progress while sibling fields
/// resolve.
pub type Resolver = Arc<dyn Fn(ResolverContext) -> ResolverFuture + Send + Sync>;

/// What a resolver produced: a value, optionally tagged with the concrete
/// object type name when the field's declared type is an interface or
/// union.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolved {
    pub value: Value,
    pub type_name: Option<String>,
}

impl Resolved {
    pub fn value(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            type_name: None,
        }
    }

    pub fn null() -> Self {
        Self::value(Value::Null)
    }

    /// Tags the value with its concrete object type, for abstract-typed
    /// fields.
    pub fn with_type(value: impl Into<Value>, type_name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            type_name: Some(type_name.into()),
        }
    }
}

/// Everything a resolver can see about the field it resolves.
#[derive(Clone, Debug)]
pub struct ResolverContext {
    /// The parent object's resolved value.
    pub parent: Value,
    /// Arguments bound and coerced against the field's declared arguments.
    pub args: IndexMap<String, Value>,
    /// The field name from the document (not the alias).
    pub field_name: String,
    /// The response path to this field.
    pub path: Vec<PathSegment>,
    /// Fires when the request is cancelled; long resolvers should observe
    /// it.
    pub cancellation: CancellationToken,
}

impl ResolverContext {
    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }

    /// Looks up a key in the parent object value.
    pub fn parent_field(&self, key: &str) -> Option<&Value> {
        self.parent.get(key)
    }
}

/// A resolver-reported failure; becomes a field-scoped execution error.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ResolverError {
    pub message: String,
}

impl From<String> for ResolverError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for ResolverError {
    fn from(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Wraps an async closure as a [`Resolver`].
pub fn resolve_fn<F, Fut>(f: F) -> Resolver
where
    F: Fn(ResolverContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Resolved, ResolverError>> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(f(ctx)))
}
