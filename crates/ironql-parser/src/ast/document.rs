use crate::ast::Definition;
use crate::ast::FragmentDefinition;
use crate::ast::OperationDefinition;
use crate::SourceLocation;

/// A parsed executable document: an ordered list of operation and fragment
/// definitions.
///
/// Immutable once parsed; owned solely by the request that parsed it.
#[derive(Clone, Debug, PartialEq)]
pub struct Document<'src> {
    pub definitions: Vec<Definition<'src>>,
    pub loc: SourceLocation,
}

impl<'src> Document<'src> {
    /// Iterates the operation definitions in document order.
    pub fn operations(&self) -> impl Iterator<Item = &OperationDefinition<'src>> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Operation(op) => Some(op),
            Definition::Fragment(_) => None,
        })
    }

    /// Iterates the fragment definitions in document order.
    pub fn fragments(&self) -> impl Iterator<Item = &FragmentDefinition<'src>> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Fragment(frag) => Some(frag),
            Definition::Operation(_) => None,
        })
    }
}
