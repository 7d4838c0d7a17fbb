//! A GraphQL parsing library for executable documents.
//!
//! Turns query text into an immutable, positioned AST in two stages: a
//! zero-copy [`Lexer`] that borrows token text from the source wherever
//! possible, and a recursive-descent parser ([`parse`]) that builds the
//! node types in [`ast`]. The first lexical or syntactic error aborts the
//! parse with a [`SyntaxError`] whose rendered message includes the
//! offending source line and a caret marking the column.

pub mod ast;
mod lexer;
mod parser;
mod source_location;
mod source_position;
mod syntax_error;
mod token;
mod token_stream;

pub use lexer::Lexer;
pub use parser::parse;
pub use parser::parse_with_options;
pub use parser::ParserOptions;
pub use source_location::SourceLocation;
pub use source_position::SourcePosition;
pub use source_position::Span;
pub use syntax_error::SyntaxError;
pub use syntax_error::SyntaxErrorKind;
pub use token::Comment;
pub use token::CommentVec;
pub use token::Token;
pub use token::TokenKind;
pub use token_stream::TokenStream;

#[cfg(test)]
mod tests;
