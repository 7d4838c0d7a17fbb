//! Error types for the execution phase and their wire representations.

use ironql_parser::SourceLocation;
use ironql_parser::SyntaxError;
use serde::Serialize;
use serde::Serializer;

/// A 1-based source location carried on an execution error.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct ErrorLocation {
    pub line: usize,
    pub column: usize,
}

impl From<SourceLocation> for ErrorLocation {
    fn from(loc: SourceLocation) -> Self {
        Self {
            line: loc.line,
            column: loc.column,
        }
    }
}

/// One step of a response path: an object field key or a list index.
///
/// Serializes as a bare string or integer, matching the response format's
/// `"path": ["hero", "friends", 1, "name"]` shape.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl Serialize for PathSegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PathSegment::Field(name) => serializer.serialize_str(name),
            PathSegment::Index(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// A field-scoped (or request-scoped) error in an execution result.
///
/// `locations` and `path` are omitted from the serialized form when empty;
/// request-scoped errors (bad variables, unknown operation) carry no path.
#[derive(Clone, Debug, PartialEq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ExecutionError {
    pub message: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<ErrorLocation>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,
}

impl ExecutionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: Vec::new(),
            path: Vec::new(),
        }
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.locations.push(location.into());
        self
    }

    pub fn with_path(mut self, path: Vec<PathSegment>) -> Self {
        self.path = path;
        self
    }
}

impl From<SyntaxError> for ExecutionError {
    /// Carries the full rendered message (including the source excerpt)
    /// plus the error's location.
    fn from(error: SyntaxError) -> Self {
        ExecutionError::new(error.message()).at(error.location())
    }
}

/// A failure that prevents producing any `ExecutionResult` at all.
///
/// Syntax, validation, and field errors all surface inside an
/// `ExecutionResult`; only cancellation ahead of execution aborts the
/// request outright.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum RequestError {
    #[error("request was cancelled before execution started")]
    Cancelled,
}
