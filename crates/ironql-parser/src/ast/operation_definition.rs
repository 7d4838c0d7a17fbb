use crate::ast::Directive;
use crate::ast::Name;
use crate::ast::SelectionSet;
use crate::ast::VariableDefinition;
use crate::SourceLocation;

/// The kind of an operation: `query`, `mutation`, or `subscription`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operation definition, either in full form
/// (`query Name($x: Int) @dir { ... }`) or shorthand (`{ ... }`, always a
/// query).
#[derive(Clone, Debug, PartialEq)]
pub struct OperationDefinition<'src> {
    pub kind: OperationKind,
    pub name: Option<Name<'src>>,
    pub variable_definitions: Vec<VariableDefinition<'src>>,
    pub directives: Vec<Directive<'src>>,
    pub selection_set: SelectionSet<'src>,
    /// Leading `#` comment lines, retained only when the parser was
    /// configured to keep them. Never semantically meaningful.
    pub comment: Option<String>,
    pub loc: SourceLocation,
}

impl OperationDefinition<'_> {
    /// The operation's name, if it has one.
    pub fn name_str(&self) -> Option<&str> {
        self.name.as_ref().map(|n| n.as_str())
    }
}
