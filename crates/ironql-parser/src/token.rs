use crate::Span;
use smallvec::SmallVec;
use std::borrow::Cow;

/// Comments collected ahead of a token.
///
/// Most tokens carry none, so two inline slots avoid heap allocation for
/// the common case of a single leading comment block.
pub type CommentVec<'src> = SmallVec<[Comment<'src>; 2]>;

/// A `#`-comment captured as trivia.
///
/// Comments are insignificant to the grammar but are preserved on the
/// following token so the parser can optionally retain them on AST nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Comment<'src> {
    /// Comment text after the `#`, without the line terminator.
    pub text: Cow<'src, str>,
    pub span: Span,
}

/// The kind of a GraphQL token.
///
/// Literal values use `Cow<'src, str>` so the lexer can borrow directly
/// from the source text when no transformation is needed (zero-copy), and
/// allocate only when it is (e.g. strings containing escape sequences).
///
/// Negative numeric literals like `-123` are lexed as single tokens, per
/// the GraphQL grammar for `IntValue`/`FloatValue`.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind<'src> {
    // Punctuators
    /// `&`
    Ampersand,
    /// `@`
    At,
    /// `!`
    Bang,
    /// `:`
    Colon,
    /// `}`
    CurlyBraceClose,
    /// `{`
    CurlyBraceOpen,
    /// `$`
    Dollar,
    /// `...`
    Ellipsis,
    /// `=`
    Equals,
    /// `)`
    ParenClose,
    /// `(`
    ParenOpen,
    /// `|`
    Pipe,
    /// `]`
    SquareBracketClose,
    /// `[`
    SquareBracketOpen,

    /// A GraphQL name: `[_A-Za-z][_0-9A-Za-z]*`. Keywords (`query`, `on`,
    /// `true`, ...) are ordinary names; the parser decides what they mean
    /// in context.
    Name(Cow<'src, str>),

    /// Raw source text of an integer literal, including an optional
    /// negative sign (e.g. `"-123"`, `"0"`).
    IntValue(Cow<'src, str>),

    /// Raw source text of a float literal, including an optional negative
    /// sign (e.g. `"-1.23e-4"`, `"0.5"`).
    FloatValue(Cow<'src, str>),

    /// The decoded content of a string literal. Escape sequences have
    /// already been processed by the lexer; `block` is `true` for
    /// triple-quoted strings, whose content has been dedented.
    StringValue { value: Cow<'src, str>, block: bool },

    /// End of input.
    Eof,
}

impl TokenKind<'_> {
    /// A human-readable description of this token for error messages.
    ///
    /// Punctuators render quoted (`"{"`), literals render with their kind
    /// and raw value (`Name "foo"`, `Int "12"`), end of input renders as
    /// `EOF`. This wording is part of the parser's error contract.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Ampersand => "\"&\"".to_string(),
            TokenKind::At => "\"@\"".to_string(),
            TokenKind::Bang => "\"!\"".to_string(),
            TokenKind::Colon => "\":\"".to_string(),
            TokenKind::CurlyBraceClose => "\"}\"".to_string(),
            TokenKind::CurlyBraceOpen => "\"{\"".to_string(),
            TokenKind::Dollar => "\"$\"".to_string(),
            TokenKind::Ellipsis => "\"...\"".to_string(),
            TokenKind::Equals => "\"=\"".to_string(),
            TokenKind::ParenClose => "\")\"".to_string(),
            TokenKind::ParenOpen => "\"(\"".to_string(),
            TokenKind::Pipe => "\"|\"".to_string(),
            TokenKind::SquareBracketClose => "\"]\"".to_string(),
            TokenKind::SquareBracketOpen => "\"[\"".to_string(),
            TokenKind::Name(value) => format!("Name \"{value}\""),
            TokenKind::IntValue(value) => format!("Int \"{value}\""),
            TokenKind::FloatValue(value) => format!("Float \"{value}\""),
            TokenKind::StringValue { value, .. } => {
                format!("String \"{value}\"")
            },
            TokenKind::Eof => "EOF".to_string(),
        }
    }

    /// Returns the name text when this is a `Name` token.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            TokenKind::Name(value) => Some(value.as_ref()),
            _ => None,
        }
    }
}

/// A lexed token: kind, source span, and any comments that preceded it.
#[derive(Clone, Debug, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind<'src>,
    pub span: Span,
    pub preceding_comments: CommentVec<'src>,
}

impl Token<'_> {
    /// Returns `true` if this token is a name with the given text.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind.as_name() == Some(keyword)
    }
}
