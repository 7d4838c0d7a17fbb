use crate::ast::Directive;
use crate::ast::Name;
use crate::ast::TypeAnnotation;
use crate::ast::Value;
use crate::SourceLocation;

/// A variable definition: `$name: Type = default @dir`.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition<'src> {
    pub name: Name<'src>,
    pub var_type: TypeAnnotation<'src>,
    pub default_value: Option<Value<'src>>,
    pub directives: Vec<Directive<'src>>,
    pub loc: SourceLocation,
}
