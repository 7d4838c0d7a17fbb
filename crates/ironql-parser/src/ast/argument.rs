use crate::ast::Name;
use crate::ast::Value;
use crate::SourceLocation;

/// A `name: value` argument to a field or directive.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument<'src> {
    pub name: Name<'src>,
    pub value: Value<'src>,
    pub loc: SourceLocation,
}
