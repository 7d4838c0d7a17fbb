//! Pre-execution document validation.
//!
//! A non-empty finding list short-circuits execution; findings convert
//! into response errors with their document positions attached.

use crate::schema::Schema;
use crate::ExecutionError;
use indexmap::IndexMap;
use indexmap::IndexSet;
use ironql_parser::ast;
use ironql_parser::SourceLocation;
use thiserror::Error;

/// A single validation finding.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub location: Option<SourceLocation>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

impl From<ValidationError> for ExecutionError {
    fn from(error: ValidationError) -> Self {
        let converted = ExecutionError::new(error.message);
        match error.location {
            Some(location) => converted.at(location),
            None => converted,
        }
    }
}

/// Document validation run between parse and execute. Implementations
/// report every finding rather than stopping at the first.
pub trait DocumentValidator: Send + Sync {
    fn validate(
        &self,
        schema: &Schema,
        document: &ast::Document<'_>,
    ) -> Vec<ValidationError>;
}

/// The stock validator: operation names are unique, fragment spreads
/// resolve, and fragments do not spread in cycles.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultValidator;

impl DocumentValidator for DefaultValidator {
    fn validate(
        &self,
        _schema: &Schema,
        document: &ast::Document<'_>,
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let mut seen_names = IndexSet::new();
        for operation in document.operations() {
            if let Some(name) = operation.name_str()
                && !seen_names.insert(name)
            {
                errors.push(
                    ValidationError::new(format!(
                        "There can be only one operation named \"{name}\".",
                    ))
                    .at(operation.loc),
                );
            }
        }

        let fragments: IndexMap<&str, &ast::FragmentDefinition<'_>> = document
            .fragments()
            .map(|fragment| (fragment.name.as_str(), fragment))
            .collect();

        for operation in document.operations() {
            check_spreads(
                &operation.selection_set,
                &fragments,
                &mut IndexSet::new(),
                &mut errors,
            );
        }
        for fragment in fragments.values() {
            let mut visited = IndexSet::new();
            visited.insert(fragment.name.as_str());
            check_spreads(
                &fragment.selection_set,
                &fragments,
                &mut visited,
                &mut errors,
            );
        }

        errors
    }
}

/// Walks a selection set checking every spread resolves and that the
/// chain of spreads currently being expanded never revisits a fragment.
fn check_spreads<'a>(
    selection_set: &'a ast::SelectionSet<'_>,
    fragments: &IndexMap<&'a str, &'a ast::FragmentDefinition<'_>>,
    visiting: &mut IndexSet<&'a str>,
    errors: &mut Vec<ValidationError>,
) {
    for selection in &selection_set.selections {
        match selection {
            ast::Selection::Field(field) => {
                if let Some(nested) = &field.selection_set {
                    check_spreads(nested, fragments, visiting, errors);
                }
            },
            ast::Selection::InlineFragment(inline) => {
                check_spreads(&inline.selection_set, fragments, visiting, errors);
            },
            ast::Selection::FragmentSpread(spread) => {
                let name = spread.fragment_name.as_str();
                let Some(fragment) = fragments.get(name) else {
                    errors.push(
                        ValidationError::new(format!(
                            "Unknown fragment \"{name}\".",
                        ))
                        .at(spread.loc),
                    );
                    continue;
                };
                if !visiting.insert(name) {
                    errors.push(
                        ValidationError::new(format!(
                            "Cannot spread fragment \"{name}\" within itself.",
                        ))
                        .at(spread.loc),
                    );
                    continue;
                }
                check_spreads(
                    &fragment.selection_set,
                    fragments,
                    visiting,
                    errors,
                );
                visiting.shift_remove(name);
            },
        }
    }
}
