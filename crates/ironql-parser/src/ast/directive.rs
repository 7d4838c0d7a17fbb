use crate::ast::Argument;
use crate::ast::Name;
use crate::SourceLocation;

/// A directive annotation: `@name(args)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Directive<'src> {
    pub name: Name<'src>,
    pub arguments: Vec<Argument<'src>>,
    pub loc: SourceLocation,
}
