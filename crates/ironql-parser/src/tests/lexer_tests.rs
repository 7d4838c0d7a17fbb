//! Tests for token production: kinds, values, zero-copy behavior, and
//! comment trivia.

use crate::tests::utils::lex_kinds;
use crate::Lexer;
use crate::TokenKind;
use std::borrow::Cow;

// =============================================================================
// Punctuators and names
// =============================================================================

#[test]
fn punctuators() {
    let kinds = lex_kinds("! $ & ( ) ... : = @ [ ] { } |");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Bang,
            TokenKind::Dollar,
            TokenKind::Ampersand,
            TokenKind::ParenOpen,
            TokenKind::ParenClose,
            TokenKind::Ellipsis,
            TokenKind::Colon,
            TokenKind::Equals,
            TokenKind::At,
            TokenKind::SquareBracketOpen,
            TokenKind::SquareBracketClose,
            TokenKind::CurlyBraceOpen,
            TokenKind::CurlyBraceClose,
            TokenKind::Pipe,
        ],
    );
}

#[test]
fn names_including_keywords() {
    // Keywords are ordinary names at the lexical level.
    let kinds = lex_kinds("query _foo on true __typename a1");
    let names: Vec<&str> = kinds
        .iter()
        .map(|k| k.as_name().expect("expected a name"))
        .collect();
    assert_eq!(names, vec!["query", "_foo", "on", "true", "__typename", "a1"]);
}

/// Commas and the BOM are insignificant separators.
#[test]
fn commas_and_bom_are_skipped() {
    let kinds = lex_kinds("\u{FEFF}a, b,,, c");
    assert_eq!(kinds.len(), 3);
}

// =============================================================================
// Numbers
// =============================================================================

#[test]
fn int_and_float_literals() {
    let kinds = lex_kinds("0 -123 4.5 -0.5 1e10 6.02e-23 2E+3");
    assert_eq!(
        kinds,
        vec![
            TokenKind::IntValue(Cow::Borrowed("0")),
            TokenKind::IntValue(Cow::Borrowed("-123")),
            TokenKind::FloatValue(Cow::Borrowed("4.5")),
            TokenKind::FloatValue(Cow::Borrowed("-0.5")),
            TokenKind::FloatValue(Cow::Borrowed("1e10")),
            TokenKind::FloatValue(Cow::Borrowed("6.02e-23")),
            TokenKind::FloatValue(Cow::Borrowed("2E+3")),
        ],
    );
}

// =============================================================================
// Strings
// =============================================================================

/// Strings without escape sequences borrow directly from the source.
#[test]
fn escape_free_string_is_zero_copy() {
    let kinds = lex_kinds(r#""hello world""#);
    match &kinds[0] {
        TokenKind::StringValue { value, block } => {
            assert!(!block);
            assert!(matches!(value, Cow::Borrowed(_)));
            assert_eq!(value.as_ref(), "hello world");
        },
        other => panic!("expected a string, got: {other:?}"),
    }
}

#[test]
fn string_escape_sequences_are_decoded() {
    let kinds = lex_kinds(r#""a\n\t\"\\\/\b\f\r z""#);
    match &kinds[0] {
        TokenKind::StringValue { value, .. } => {
            assert!(matches!(value, Cow::Owned(_)));
            assert_eq!(
                value.as_ref(),
                "a\n\t\"\\/\u{0008}\u{000C}\r z",
            );
        },
        other => panic!("expected a string, got: {other:?}"),
    }
}

#[test]
fn unicode_escapes() {
    let kinds = lex_kinds(r#""\u00E9A""#);
    match &kinds[0] {
        TokenKind::StringValue { value, .. } => {
            assert_eq!(value.as_ref(), "\u{00E9}A");
        },
        other => panic!("expected a string, got: {other:?}"),
    }
}

#[test]
fn empty_string() {
    let kinds = lex_kinds(r#""""#);
    match &kinds[0] {
        TokenKind::StringValue { value, .. } => assert_eq!(value.as_ref(), ""),
        other => panic!("expected a string, got: {other:?}"),
    }
}

// =============================================================================
// Block strings
// =============================================================================

#[test]
fn block_string_dedents_common_indentation() {
    let source = "\"\"\"\n    Hello,\n      World!\n\n    Yours,\n      GraphQL.\n\"\"\"";
    let kinds = lex_kinds(source);
    match &kinds[0] {
        TokenKind::StringValue { value, block } => {
            assert!(block);
            assert_eq!(
                value.as_ref(),
                "Hello,\n  World!\n\nYours,\n  GraphQL.",
            );
        },
        other => panic!("expected a block string, got: {other:?}"),
    }
}

#[test]
fn block_string_escaped_triple_quote() {
    let kinds = lex_kinds("\"\"\"contains \\\"\"\" quote\"\"\"");
    match &kinds[0] {
        TokenKind::StringValue { value, .. } => {
            assert_eq!(value.as_ref(), "contains \"\"\" quote");
        },
        other => panic!("expected a block string, got: {other:?}"),
    }
}

#[test]
fn block_string_normalizes_line_terminators() {
    let kinds = lex_kinds("\"\"\"a\r\nb\rc\"\"\"");
    match &kinds[0] {
        TokenKind::StringValue { value, .. } => {
            assert_eq!(value.as_ref(), "a\nb\nc");
        },
        other => panic!("expected a block string, got: {other:?}"),
    }
}

// =============================================================================
// Comments
// =============================================================================

/// Comments attach as trivia to the token that follows them.
#[test]
fn comments_attach_to_following_token() {
    let mut lexer = Lexer::new("# first\n# second\nfield");
    let token = lexer.next_token().unwrap();
    assert_eq!(token.kind.as_name(), Some("field"));
    let texts: Vec<&str> = token
        .preceding_comments
        .iter()
        .map(|c| c.text.as_ref())
        .collect();
    assert_eq!(texts, vec![" first", " second"]);
}

#[test]
fn trailing_comment_attaches_to_eof() {
    let mut lexer = Lexer::new("field # trailing");
    let token = lexer.next_token().unwrap();
    assert!(token.preceding_comments.is_empty());
    let eof = lexer.next_token().unwrap();
    assert!(matches!(eof.kind, TokenKind::Eof));
    assert_eq!(eof.preceding_comments[0].text.as_ref(), " trailing");
}

// =============================================================================
// Positions
// =============================================================================

#[test]
fn spans_track_lines_and_columns() {
    let mut lexer = Lexer::new("a\n  bb");
    let a = lexer.next_token().unwrap();
    assert_eq!(a.span.start.line(), 0);
    assert_eq!(a.span.start.col_utf8(), 0);

    let bb = lexer.next_token().unwrap();
    assert_eq!(bb.span.start.line(), 1);
    assert_eq!(bb.span.start.col_utf8(), 2);
    assert_eq!(bb.span.end.col_utf8(), 4);
}

/// Characters outside the Basic Multilingual Plane advance the UTF-16
/// column by two code units but the UTF-8 column by one character.
#[test]
fn dual_column_tracking_for_supplementary_plane() {
    let mut lexer = Lexer::new("\"\u{1F600}\" x");
    let string = lexer.next_token().unwrap();
    assert!(matches!(string.kind, TokenKind::StringValue { .. }));

    let x = lexer.next_token().unwrap();
    // After `"<emoji>" ` the char column is 4 but the UTF-16 column is 5.
    assert_eq!(x.span.start.col_utf8(), 4);
    assert_eq!(x.span.start.col_utf16(), 5);
}

#[test]
fn crlf_counts_as_one_line_break() {
    let mut lexer = Lexer::new("a\r\nb\rc\nd");
    let names: Vec<usize> = (0..4)
        .map(|_| lexer.next_token().unwrap().span.start.line())
        .collect();
    assert_eq!(names, vec![0, 1, 2, 3]);
}

#[test]
fn eof_repeats() {
    let mut lexer = Lexer::new("");
    assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Eof));
    assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Eof));
}
