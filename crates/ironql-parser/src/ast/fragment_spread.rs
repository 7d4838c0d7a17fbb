use crate::ast::Directive;
use crate::ast::Name;
use crate::SourceLocation;

/// A named fragment spread: `...FragmentName @dir`.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread<'src> {
    pub fragment_name: Name<'src>,
    pub directives: Vec<Directive<'src>>,
    pub loc: SourceLocation,
}
