use crate::ast::Field;
use crate::ast::FragmentSpread;
use crate::ast::InlineFragment;
use crate::SourceLocation;

/// A single selection within a selection set.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection<'src> {
    Field(Field<'src>),
    FragmentSpread(FragmentSpread<'src>),
    InlineFragment(InlineFragment<'src>),
}

impl Selection<'_> {
    pub fn loc(&self) -> SourceLocation {
        match self {
            Selection::Field(field) => field.loc,
            Selection::FragmentSpread(spread) => spread.loc,
            Selection::InlineFragment(frag) => frag.loc,
        }
    }
}
