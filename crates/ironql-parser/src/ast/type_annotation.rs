use crate::ast::Name;
use crate::SourceLocation;

/// A type reference in a variable definition: named, list, or non-null.
///
/// Non-null wrappers never nest directly (`Foo!!` is not grammatical), but
/// lists and non-nulls otherwise compose freely (`[[Foo!]]!`).
#[derive(Clone, Debug, PartialEq)]
pub enum TypeAnnotation<'src> {
    Named(Name<'src>),
    List(Box<TypeAnnotation<'src>>, SourceLocation),
    NonNull(Box<TypeAnnotation<'src>>, SourceLocation),
}

impl TypeAnnotation<'_> {
    pub fn loc(&self) -> SourceLocation {
        match self {
            TypeAnnotation::Named(name) => name.loc,
            TypeAnnotation::List(_, loc) => *loc,
            TypeAnnotation::NonNull(_, loc) => *loc,
        }
    }

    /// The innermost named type, unwrapping all list and non-null layers.
    pub fn innermost_name(&self) -> &str {
        match self {
            TypeAnnotation::Named(name) => name.as_str(),
            TypeAnnotation::List(inner, _) => inner.innermost_name(),
            TypeAnnotation::NonNull(inner, _) => inner.innermost_name(),
        }
    }

    /// Returns `true` if the outermost wrapper is non-null.
    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeAnnotation::NonNull(..))
    }
}

impl std::fmt::Display for TypeAnnotation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeAnnotation::Named(name) => f.write_str(name.as_str()),
            TypeAnnotation::List(inner, _) => write!(f, "[{inner}]"),
            TypeAnnotation::NonNull(inner, _) => write!(f, "{inner}!"),
        }
    }
}
