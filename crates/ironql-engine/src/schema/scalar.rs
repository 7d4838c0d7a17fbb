use crate::Value;
use ironql_parser::ast;
use std::sync::Arc;

type CoerceFn = Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>;
type ParseLiteralFn =
    Arc<dyn for<'a> Fn(&ast::Value<'a>) -> Result<Value, String> + Send + Sync>;

/// A scalar type: a leaf with result coercion (`serialize`) and input
/// coercion (`parse_value`, optionally `parse_literal`).
///
/// When `parse_literal` is absent, literals are first converted to runtime
/// values and then routed through `parse_value`.
#[derive(Clone)]
pub struct ScalarType {
    pub name: String,
    serialize: CoerceFn,
    parse_value: CoerceFn,
    parse_literal: Option<ParseLiteralFn>,
}

impl ScalarType {
    pub fn new(
        name: impl Into<String>,
        serialize: impl Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
        parse_value: impl Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            serialize: Arc::new(serialize),
            parse_value: Arc::new(parse_value),
            parse_literal: None,
        }
    }

    pub fn with_parse_literal(
        mut self,
        parse_literal: impl for<'a> Fn(&ast::Value<'a>) -> Result<Value, String>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.parse_literal = Some(Arc::new(parse_literal));
        self
    }

    /// Coerces an internal value to its response form.
    pub fn serialize(&self, value: &Value) -> Result<Value, String> {
        (self.serialize)(value)
    }

    /// Coerces an externally provided value (a variable) to internal form.
    pub fn parse_value(&self, value: &Value) -> Result<Value, String> {
        (self.parse_value)(value)
    }

    /// Coerces a literal from the document, when a literal-specific parser
    /// was provided.
    pub fn parse_literal(
        &self,
        literal: &ast::Value<'_>,
    ) -> Option<Result<Value, String>> {
        self.parse_literal.as_ref().map(|f| f(literal))
    }

    // =========================================================================
    // Built-in scalars
    // =========================================================================

    /// `Int`: 32-bit signed integers only.
    pub fn int() -> Self {
        fn coerce(value: &Value) -> Result<Value, String> {
            match value {
                Value::Int(n)
                    if i32::try_from(*n).is_ok() =>
                {
                    Ok(Value::Int(*n))
                },
                Value::Int(n) => Err(format!(
                    "Int cannot represent non 32-bit signed integer value: {n}",
                )),
                other => Err(format!(
                    "Int cannot represent non-integer value: {other:?}",
                )),
            }
        }
        Self::new("Int", coerce, coerce)
    }

    /// `Float`: accepts integer and float values.
    pub fn float() -> Self {
        fn coerce(value: &Value) -> Result<Value, String> {
            match value {
                Value::Float(f) if f.is_finite() => Ok(Value::Float(*f)),
                Value::Int(n) => Ok(Value::Float(*n as f64)),
                other => Err(format!(
                    "Float cannot represent non numeric value: {other:?}",
                )),
            }
        }
        Self::new("Float", coerce, coerce)
    }

    /// `String`: string values only.
    pub fn string() -> Self {
        fn coerce(value: &Value) -> Result<Value, String> {
            match value {
                Value::String(s) => Ok(Value::String(s.clone())),
                other => Err(format!(
                    "String cannot represent a non string value: {other:?}",
                )),
            }
        }
        Self::new("String", coerce, coerce)
    }

    /// `Boolean`: boolean values only.
    pub fn boolean() -> Self {
        fn coerce(value: &Value) -> Result<Value, String> {
            match value {
                Value::Boolean(b) => Ok(Value::Boolean(*b)),
                other => Err(format!(
                    "Boolean cannot represent a non boolean value: {other:?}",
                )),
            }
        }
        Self::new("Boolean", coerce, coerce)
    }

    /// `ID`: accepts strings and integers, always serialized as a string.
    pub fn id() -> Self {
        fn coerce(value: &Value) -> Result<Value, String> {
            match value {
                Value::String(s) => Ok(Value::String(s.clone())),
                Value::Int(n) => Ok(Value::String(n.to_string())),
                other => {
                    Err(format!("ID cannot represent value: {other:?}"))
                },
            }
        }
        Self::new("ID", coerce, coerce)
    }
}

impl std::fmt::Debug for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarType")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
