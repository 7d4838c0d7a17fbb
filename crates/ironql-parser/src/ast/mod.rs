//! The immutable, positioned AST for executable GraphQL documents.
//!
//! All node types are parameterized over a `'src` lifetime that borrows
//! strings from the source text via [`Cow<'src, str>`] where the lexer did
//! not need to transform them. Every node carries the [`SourceLocation`]
//! of its first token, captured once during parsing and never recomputed.
//!
//! Nodes are plain data: no in-place rewriting happens during validation
//! or execution.
//!
//! [`Cow<'src, str>`]: std::borrow::Cow
//! [`SourceLocation`]: crate::SourceLocation

mod argument;
mod definition;
mod directive;
mod document;
mod field;
mod fragment_definition;
mod fragment_spread;
mod inline_fragment;
mod name;
mod operation_definition;
mod selection;
mod selection_set;
mod type_annotation;
mod value;
mod variable_definition;

pub use argument::Argument;
pub use definition::Definition;
pub use directive::Directive;
pub use document::Document;
pub use field::Field;
pub use fragment_definition::FragmentDefinition;
pub use fragment_spread::FragmentSpread;
pub use inline_fragment::InlineFragment;
pub use name::Name;
pub use operation_definition::OperationDefinition;
pub use operation_definition::OperationKind;
pub use selection::Selection;
pub use selection_set::SelectionSet;
pub use type_annotation::TypeAnnotation;
pub use value::ObjectField;
pub use value::Value;
pub use variable_definition::VariableDefinition;
