//! Shared helpers for parser and lexer tests.

use crate::ast;
use crate::Lexer;
use crate::SyntaxError;
use crate::TokenKind;

/// Lexes the full source and returns the token kinds, excluding `Eof`.
/// Panics on lexical errors.
pub(super) fn lex_kinds(source: &str) -> Vec<TokenKind<'_>> {
    let mut lexer = Lexer::new(source);
    let mut kinds = Vec::new();
    loop {
        let token = lexer.next_token().expect("lexical error in test input");
        if matches!(token.kind, TokenKind::Eof) {
            return kinds;
        }
        kinds.push(token.kind);
    }
}

/// Lexes until the first error and returns it. Panics if the source lexes
/// cleanly.
pub(super) fn lex_error(source: &str) -> SyntaxError {
    let mut lexer = Lexer::new(source);
    loop {
        match lexer.next_token() {
            Ok(token) if matches!(token.kind, TokenKind::Eof) => {
                panic!("expected a lexical error, got clean EOF");
            },
            Ok(_) => {},
            Err(error) => return error,
        }
    }
}

/// Parses a document that is expected to be valid.
pub(super) fn parse_document(source: &str) -> ast::Document<'_> {
    crate::parse(source)
        .unwrap_or_else(|e| panic!("parse failed: {}", e.message()))
}

/// Parses a document that is expected to fail, returning the error.
pub(super) fn parse_error(source: &str) -> SyntaxError {
    match crate::parse(source) {
        Ok(_) => panic!("expected a parse error for: {source}"),
        Err(error) => error,
    }
}

/// Returns the sole operation definition of a document.
pub(super) fn only_operation<'a, 'src>(
    document: &'a ast::Document<'src>,
) -> &'a ast::OperationDefinition<'src> {
    let mut operations = document.operations();
    let operation = operations.next().expect("document has no operations");
    assert!(operations.next().is_none(), "more than one operation");
    operation
}

/// Returns the first selection of a selection set as a field.
pub(super) fn first_field<'a, 'src>(
    selection_set: &'a ast::SelectionSet<'src>,
) -> &'a ast::Field<'src> {
    match selection_set.selections.first() {
        Some(ast::Selection::Field(field)) => field,
        other => panic!("expected a field selection, got: {other:?}"),
    }
}

/// Returns the value of the first argument of a field.
pub(super) fn first_arg_value<'a, 'src>(
    field: &'a ast::Field<'src>,
) -> &'a ast::Value<'src> {
    &field
        .arguments
        .first()
        .expect("field has no arguments")
        .value
}
