use crate::SourceLocation;
use crate::SourcePosition;
use memchr::memchr2;

/// Categorized syntax error kind for programmatic handling.
///
/// Enables tools to pattern-match on error types without parsing messages.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SyntaxErrorKind {
    /// A string literal was not closed before end of line or end of input.
    UnterminatedString,
    /// A control character appeared inside a string literal.
    InvalidStringCharacter,
    /// A `\x`-style or `\uXXXX` escape sequence was malformed.
    InvalidEscapeSequence,
    /// A numeric literal was malformed (leading zero, missing digit, ...).
    InvalidNumber,
    /// A character that cannot begin any token.
    UnexpectedCharacter,
    /// The parser encountered a token it cannot use at this point.
    UnexpectedToken,
    /// The parser required a specific token and found another.
    ExpectedToken,
}

/// A fatal lexical or syntactic error.
///
/// The rendered message format is part of the observable contract of this
/// crate and is asserted bit-exactly in tests:
///
/// ```text
/// Syntax Error GraphQL (<line>:<column>) <description>
/// <n>: <line text>
/// <spaces>^
/// <n+1>: <following line text>
/// ```
///
/// - The header carries the 1-based line and column of the error.
/// - The numbered source line is the line containing the error; the caret
///   line is padded so `^` sits under the offending column (the `"<n>: "`
///   prefix counts toward the padding).
/// - The final numbered line is only present for strings left unterminated
///   by a line terminator, in which case the line *following* the opening
///   line is rendered after the caret.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxError {
    /// The fully rendered message, including the source excerpt.
    message: String,

    /// The description portion of the message, without location or excerpt.
    description: String,

    /// Where the error was detected (1-based line/column).
    location: SourceLocation,

    kind: SyntaxErrorKind,
}

impl SyntaxError {
    /// Creates a syntax error at `position`, rendering the excerpt from
    /// `source` immediately. Positions are never recomputed afterwards.
    pub(crate) fn new(
        kind: SyntaxErrorKind,
        description: impl Into<String>,
        position: SourcePosition,
        source: &str,
    ) -> Self {
        Self::render(kind, description.into(), position, source, false)
    }

    /// Creates a syntax error that additionally renders the line following
    /// the error line. Used for strings left unterminated by a newline.
    pub(crate) fn with_following_line(
        kind: SyntaxErrorKind,
        description: impl Into<String>,
        position: SourcePosition,
        source: &str,
    ) -> Self {
        Self::render(kind, description.into(), position, source, true)
    }

    fn render(
        kind: SyntaxErrorKind,
        description: String,
        position: SourcePosition,
        source: &str,
        include_following_line: bool,
    ) -> Self {
        let location = position.to_location();
        let mut message = format!(
            "Syntax Error GraphQL ({}:{}) {}",
            location.line, location.column, description,
        );

        if let Some(line_text) = source_line(source, position.line()) {
            let prefix = format!("{}: ", location.line);
            message.push('\n');
            message.push_str(&prefix);
            message.push_str(line_text);
            message.push('\n');
            // The caret is aligned under the offending column, counting the
            // number prefix toward the padding. Columns count characters,
            // so padding is in characters as well.
            let padding = prefix.chars().count() + location.column - 1;
            for _ in 0..padding {
                message.push(' ');
            }
            message.push('^');

            if include_following_line
                && let Some(next_text) = source_line(source, position.line() + 1)
            {
                message.push('\n');
                message.push_str(&format!("{}: ", location.line + 1));
                message.push_str(next_text);
            }
        }

        Self {
            message,
            description,
            location,
            kind,
        }
    }

    /// Returns the fully rendered message (header + source excerpt).
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the description without location or excerpt.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the 1-based location where the error was detected.
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    pub fn kind(&self) -> SyntaxErrorKind {
        self.kind
    }
}

/// Returns the text of the 0-based `line` in `source`, without its
/// terminator. Lines are terminated by `\n`, `\r\n`, or a lone `\r`.
fn source_line(source: &str, line: usize) -> Option<&str> {
    let bytes = source.as_bytes();
    let mut start = 0usize;
    let mut current = 0usize;

    loop {
        let rest = &bytes[start..];
        let end = match memchr2(b'\n', b'\r', rest) {
            Some(i) => start + i,
            None => bytes.len(),
        };
        if current == line {
            return Some(&source[start..end]);
        }
        if end == bytes.len() {
            return None;
        }
        // Step over the terminator, treating `\r\n` as a single break.
        start = if bytes[end] == b'\r' && bytes.get(end + 1) == Some(&b'\n') {
            end + 2
        } else {
            end + 1
        };
        current += 1;
    }
}
