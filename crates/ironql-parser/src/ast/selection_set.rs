use crate::ast::Selection;
use crate::SourceLocation;

/// A `{ ... }` block of selections.
///
/// Selections sharing a response key across fragments are merged at
/// execution time, not at parse time; the parser preserves source order.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionSet<'src> {
    pub selections: Vec<Selection<'src>>,
    pub loc: SourceLocation,
}
