use ironql_engine::Value;
use indexmap::IndexMap;
use tokio_util::sync::CancellationToken;

/// One query to execute: source text plus the per-request knobs.
///
/// ```
/// # use ironql::{Request, Value};
/// let request = Request::new("query Hero($ep: Episode) { hero(episode: $ep) { name } }")
///     .operation_name("Hero")
///     .variable("ep", Value::Enum("EMPIRE".to_string()));
/// ```
#[derive(Clone, Debug)]
pub struct Request<'a> {
    source: &'a str,
    operation_name: Option<&'a str>,
    variables: IndexMap<String, Value>,
    cancellation: CancellationToken,
}

impl<'a> Request<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            operation_name: None,
            variables: IndexMap::new(),
            cancellation: CancellationToken::new(),
        }
    }

    /// Selects which operation of a multi-operation document to run.
    pub fn operation_name(mut self, name: &'a str) -> Self {
        self.operation_name = Some(name);
        self
    }

    pub fn variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn variables(mut self, variables: IndexMap<String, Value>) -> Self {
        self.variables = variables;
        self
    }

    /// Threads an externally owned cancellation token through the
    /// request; firing it aborts in-flight resolution.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub(crate) fn into_parts(
        self,
    ) -> (Option<&'a str>, IndexMap<String, Value>, CancellationToken) {
        (self.operation_name, self.variables, self.cancellation)
    }
}
