use crate::ast::Directive;
use crate::ast::Name;
use crate::ast::SelectionSet;
use crate::SourceLocation;

/// A named fragment definition: `fragment Name on Type @dir { ... }`.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentDefinition<'src> {
    pub name: Name<'src>,
    pub type_condition: Name<'src>,
    pub directives: Vec<Directive<'src>>,
    pub selection_set: SelectionSet<'src>,
    /// Leading `#` comment lines, retained only when the parser was
    /// configured to keep them.
    pub comment: Option<String>,
    pub loc: SourceLocation,
}
