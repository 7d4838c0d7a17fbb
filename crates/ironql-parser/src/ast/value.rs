use crate::ast::Name;
use crate::SourceLocation;
use std::borrow::Cow;

/// A literal input value as written in the document.
///
/// One closed enum covers every literal kind; each variant carries its own
/// source location so error paths can point at the exact literal. Values
/// are input-only: response values are a separate runtime representation.
#[derive(Clone, Debug, PartialEq)]
pub enum Value<'src> {
    Variable {
        name: Cow<'src, str>,
        loc: SourceLocation,
    },
    Int {
        value: i64,
        loc: SourceLocation,
    },
    Float {
        value: f64,
        loc: SourceLocation,
    },
    String {
        value: Cow<'src, str>,
        block: bool,
        loc: SourceLocation,
    },
    Boolean {
        value: bool,
        loc: SourceLocation,
    },
    Null {
        loc: SourceLocation,
    },
    Enum {
        value: Cow<'src, str>,
        loc: SourceLocation,
    },
    List {
        items: Vec<Value<'src>>,
        loc: SourceLocation,
    },
    Object {
        fields: Vec<ObjectField<'src>>,
        loc: SourceLocation,
    },
}

impl Value<'_> {
    pub fn loc(&self) -> SourceLocation {
        match self {
            Value::Variable { loc, .. }
            | Value::Int { loc, .. }
            | Value::Float { loc, .. }
            | Value::String { loc, .. }
            | Value::Boolean { loc, .. }
            | Value::Null { loc }
            | Value::Enum { loc, .. }
            | Value::List { loc, .. }
            | Value::Object { loc, .. } => *loc,
        }
    }
}

impl std::fmt::Display for Value<'_> {
    /// Renders the value back as GraphQL literal syntax.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Variable { name, .. } => write!(f, "${name}"),
            Value::Int { value, .. } => write!(f, "{value}"),
            Value::Float { value, .. } => write!(f, "{value}"),
            Value::String { value, .. } => write!(f, "{value:?}"),
            Value::Boolean { value, .. } => write!(f, "{value}"),
            Value::Null { .. } => f.write_str("null"),
            Value::Enum { value, .. } => f.write_str(value),
            Value::List { items, .. } => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            },
            Value::Object { fields, .. } => {
                f.write_str("{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.value)?;
                }
                f.write_str("}")
            },
        }
    }
}

/// A `name: value` entry inside an input object literal.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectField<'src> {
    pub name: Name<'src>,
    pub value: Value<'src>,
    pub loc: SourceLocation,
}
