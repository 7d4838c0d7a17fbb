use crate::ast::Directive;
use crate::ast::Name;
use crate::ast::SelectionSet;
use crate::SourceLocation;

/// An inline fragment: `... on Type @dir { ... }`. The type condition is
/// optional.
#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment<'src> {
    pub type_condition: Option<Name<'src>>,
    pub directives: Vec<Directive<'src>>,
    pub selection_set: SelectionSet<'src>,
    pub loc: SourceLocation,
}
