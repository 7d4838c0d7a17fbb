use crate::ast::Argument;
use crate::ast::Directive;
use crate::ast::Name;
use crate::ast::SelectionSet;
use crate::SourceLocation;

/// A field selection, optionally aliased, with arguments, directives, and
/// a nested selection set.
#[derive(Clone, Debug, PartialEq)]
pub struct Field<'src> {
    pub alias: Option<Name<'src>>,
    pub name: Name<'src>,
    pub arguments: Vec<Argument<'src>>,
    pub directives: Vec<Directive<'src>>,
    pub selection_set: Option<SelectionSet<'src>>,
    /// Leading `#` comment lines, retained only when the parser was
    /// configured to keep them.
    pub comment: Option<String>,
    pub loc: SourceLocation,
}

impl Field<'_> {
    /// The key this field's value is assembled under in the response:
    /// the alias when present, otherwise the field name.
    pub fn response_key(&self) -> &str {
        self.alias
            .as_ref()
            .map(|alias| alias.as_str())
            .unwrap_or_else(|| self.name.as_str())
    }
}
