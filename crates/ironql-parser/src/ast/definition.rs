use crate::ast::FragmentDefinition;
use crate::ast::OperationDefinition;
use crate::SourceLocation;

/// A top-level definition in an executable document.
#[derive(Clone, Debug, PartialEq)]
pub enum Definition<'src> {
    Operation(OperationDefinition<'src>),
    Fragment(FragmentDefinition<'src>),
}

impl Definition<'_> {
    pub fn loc(&self) -> SourceLocation {
        match self {
            Definition::Operation(op) => op.loc,
            Definition::Fragment(frag) => frag.loc,
        }
    }
}
