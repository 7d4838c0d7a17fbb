//! The execution result: the `data`/`errors`/`extensions` response triple.

use crate::ExecutionError;
use crate::Value;
use indexmap::IndexMap;
use serde::Serialize;

/// The outcome of executing one operation.
///
/// Serialization contract:
/// - `data` is omitted entirely when `None` (pre-execution failure) and
///   serialized as JSON `null` when `Some(Value::Null)` (a non-null root
///   field violation nulled the whole tree).
/// - `errors` and `extensions` are omitted when empty.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExecutionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ExecutionError>,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extensions: IndexMap<String, Value>,
}

impl ExecutionResult {
    /// A result carrying data, possibly alongside field errors.
    pub fn new(data: Value, errors: Vec<ExecutionError>) -> Self {
        Self {
            data: Some(data),
            errors,
            extensions: IndexMap::new(),
        }
    }

    /// A pre-execution failure: no data key at all.
    pub fn from_errors(errors: Vec<ExecutionError>) -> Self {
        Self {
            data: None,
            errors,
            extensions: IndexMap::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}
