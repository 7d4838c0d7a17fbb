//! The lexer: scans `&str` source text into positioned [`Token`]s.
//!
//! Lexing is zero-copy where possible: names, numbers, and escape-free
//! strings borrow directly from the source via `Cow::Borrowed`. Dual
//! UTF-8/UTF-16 column positions are tracked for every token.
//!
//! Lexical errors are fatal. The first malformed construct aborts the scan
//! with a [`SyntaxError`] whose rendered message carries the documented
//! `Syntax Error GraphQL (<line>:<column>)` header and source excerpt.

use crate::token::Comment;
use crate::token::CommentVec;
use crate::token::Token;
use crate::token::TokenKind;
use crate::Span;
use crate::SourcePosition;
use crate::SyntaxError;
use crate::SyntaxErrorKind;
use smallvec::smallvec;
use std::borrow::Cow;

/// Scans GraphQL source text into a stream of tokens.
///
/// Produces one token per [`next_token`](Lexer::next_token) call;
/// whitespace, commas, and the BOM are skipped, and `#` comments are
/// accumulated as trivia on the following token.
pub struct Lexer<'src> {
    /// The full source text being lexed.
    source: &'src str,

    /// Current byte offset; the text left to lex is
    /// `&source[curr_byte_offset..]`.
    curr_byte_offset: usize,

    /// Current 0-based line number.
    curr_line: usize,

    /// Current UTF-8 character column (0-based).
    curr_col_utf8: usize,

    /// Current UTF-16 code unit column (0-based). Characters outside the
    /// Basic Multilingual Plane advance this by 2.
    curr_col_utf16: usize,

    /// Whether the previous character was `\r`, so a following `\n` is
    /// treated as part of the same `\r\n` line break.
    last_char_was_cr: bool,

    /// Comments accumulated before the next token.
    pending_comments: CommentVec<'src>,

    /// Whether the EOF token has been emitted.
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            curr_byte_offset: 0,
            curr_line: 0,
            curr_col_utf8: 0,
            curr_col_utf16: 0,
            last_char_was_cr: false,
            pending_comments: smallvec![],
            finished: false,
        }
    }

    /// Returns the full source text this lexer scans.
    pub fn source(&self) -> &'src str {
        self.source
    }

    // =========================================================================
    // Position and scanning helpers
    // =========================================================================

    fn remaining(&self) -> &'src str {
        &self.source[self.curr_byte_offset..]
    }

    fn curr_position(&self) -> SourcePosition {
        SourcePosition::new(
            self.curr_line,
            self.curr_col_utf8,
            self.curr_col_utf16,
            self.curr_byte_offset,
        )
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn peek_char_nth(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// Consumes the next character, updating line and both column counters.
    /// `\n`, `\r`, and `\r\n` each count as a single line break.
    fn consume(&mut self) -> Option<char> {
        let ch = self.peek_char()?;

        if ch == '\n' {
            if self.last_char_was_cr {
                // The \n of a \r\n pair; the line was already advanced.
                self.last_char_was_cr = false;
            } else {
                self.curr_line += 1;
                self.curr_col_utf8 = 0;
                self.curr_col_utf16 = 0;
            }
        } else if ch == '\r' {
            self.curr_line += 1;
            self.curr_col_utf8 = 0;
            self.curr_col_utf16 = 0;
            self.last_char_was_cr = true;
        } else {
            self.curr_col_utf8 += 1;
            self.curr_col_utf16 += ch.len_utf16();
            self.last_char_was_cr = false;
        }

        self.curr_byte_offset += ch.len_utf8();
        Some(ch)
    }

    fn make_span(&self, start: SourcePosition) -> Span {
        Span::new(start, self.curr_position())
    }

    fn make_token(&mut self, kind: TokenKind<'src>, span: Span) -> Token<'src> {
        Token {
            kind,
            span,
            preceding_comments: std::mem::take(&mut self.pending_comments),
        }
    }

    fn error(
        &self,
        kind: SyntaxErrorKind,
        description: impl Into<String>,
        position: SourcePosition,
    ) -> SyntaxError {
        SyntaxError::new(kind, description, position, self.source)
    }

    // =========================================================================
    // Main loop
    // =========================================================================

    /// Scans and returns the next token.
    ///
    /// Returns `Ok(Token { kind: Eof, .. })` at end of input (repeatedly,
    /// if called again). Fails with a [`SyntaxError`] on malformed input;
    /// lexing cannot be resumed after an error.
    pub fn next_token(&mut self) -> Result<Token<'src>, SyntaxError> {
        loop {
            self.skip_insignificant();

            let start = self.curr_position();

            let Some(ch) = self.peek_char() else {
                self.finished = true;
                let span = self.make_span(start);
                return Ok(self.make_token(TokenKind::Eof, span));
            };

            let kind = match ch {
                '#' => {
                    self.lex_comment(start);
                    continue;
                },
                '!' => self.consume_punctuator(TokenKind::Bang),
                '$' => self.consume_punctuator(TokenKind::Dollar),
                '&' => self.consume_punctuator(TokenKind::Ampersand),
                '(' => self.consume_punctuator(TokenKind::ParenOpen),
                ')' => self.consume_punctuator(TokenKind::ParenClose),
                ':' => self.consume_punctuator(TokenKind::Colon),
                '=' => self.consume_punctuator(TokenKind::Equals),
                '@' => self.consume_punctuator(TokenKind::At),
                '[' => self.consume_punctuator(TokenKind::SquareBracketOpen),
                ']' => self.consume_punctuator(TokenKind::SquareBracketClose),
                '{' => self.consume_punctuator(TokenKind::CurlyBraceOpen),
                '}' => self.consume_punctuator(TokenKind::CurlyBraceClose),
                '|' => self.consume_punctuator(TokenKind::Pipe),
                '.' => self.lex_ellipsis(start)?,
                '"' => self.lex_string()?,
                c if is_name_start(c) => self.lex_name(),
                c if c == '-' || c.is_ascii_digit() => self.lex_number()?,
                c => {
                    return Err(self.error(
                        SyntaxErrorKind::UnexpectedCharacter,
                        format!(
                            "Cannot parse the unexpected character {}.",
                            quoted_char(c),
                        ),
                        start,
                    ));
                },
            };

            let span = self.make_span(start);
            return Ok(self.make_token(kind, span));
        }
    }

    fn consume_punctuator(&mut self, kind: TokenKind<'src>) -> TokenKind<'src> {
        self.consume();
        kind
    }

    /// Skips whitespace, line terminators, the BOM, and commas. Commas are
    /// insignificant separators per the GraphQL grammar.
    fn skip_insignificant(&mut self) {
        while let Some(ch) = self.peek_char() {
            match ch {
                ' ' | '\t' | '\n' | '\r' | ',' | '\u{FEFF}' => {
                    self.consume();
                },
                _ => break,
            }
        }
    }

    // =========================================================================
    // Comments
    // =========================================================================

    /// Lexes a `#` comment to end of line and stores it as trivia for the
    /// next token.
    fn lex_comment(&mut self, start: SourcePosition) {
        self.consume(); // '#'
        let content_start = self.curr_byte_offset;

        while let Some(ch) = self.peek_char() {
            if ch == '\n' || ch == '\r' {
                break;
            }
            self.consume();
        }

        let text = &self.source[content_start..self.curr_byte_offset];
        let span = self.make_span(start);
        self.pending_comments.push(Comment {
            text: Cow::Borrowed(text),
            span,
        });
    }

    // =========================================================================
    // Ellipsis
    // =========================================================================

    /// Lexes `...`. One or two dots cannot begin any token.
    fn lex_ellipsis(
        &mut self,
        start: SourcePosition,
    ) -> Result<TokenKind<'src>, SyntaxError> {
        if self.peek_char_nth(1) == Some('.') && self.peek_char_nth(2) == Some('.') {
            self.consume();
            self.consume();
            self.consume();
            return Ok(TokenKind::Ellipsis);
        }
        Err(self.error(
            SyntaxErrorKind::UnexpectedCharacter,
            "Cannot parse the unexpected character \".\".",
            start,
        ))
    }

    // =========================================================================
    // Names
    // =========================================================================

    fn lex_name(&mut self) -> TokenKind<'src> {
        let name_start = self.curr_byte_offset;
        self.consume();
        while let Some(ch) = self.peek_char() {
            if is_name_continue(ch) {
                self.consume();
            } else {
                break;
            }
        }
        let name = &self.source[name_start..self.curr_byte_offset];
        TokenKind::Name(Cow::Borrowed(name))
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    /// Lexes an integer or float literal: optional `-`, integer part with
    /// no leading zero (unless exactly `0`), optional fraction, optional
    /// exponent, each digit run requiring at least one digit.
    fn lex_number(&mut self) -> Result<TokenKind<'src>, SyntaxError> {
        let num_start = self.curr_byte_offset;
        let mut is_float = false;

        if self.peek_char() == Some('-') {
            self.consume();
        }

        // Integer part.
        match self.peek_char() {
            Some('0') => {
                self.consume();
                if let Some(ch) = self.peek_char()
                    && ch.is_ascii_digit()
                {
                    return Err(self.error(
                        SyntaxErrorKind::InvalidNumber,
                        format!(
                            "Invalid number, unexpected digit after 0: {}.",
                            quoted_char(ch),
                        ),
                        self.curr_position(),
                    ));
                }
            },
            Some(ch) if ch.is_ascii_digit() => {
                self.consume_digits();
            },
            other => {
                return Err(self.expected_digit_error(other));
            },
        }

        // Fraction.
        if self.peek_char() == Some('.') {
            is_float = true;
            self.consume();
            match self.peek_char() {
                Some(ch) if ch.is_ascii_digit() => self.consume_digits(),
                other => return Err(self.expected_digit_error(other)),
            }
        }

        // Exponent.
        if let Some(ch) = self.peek_char()
            && (ch == 'e' || ch == 'E')
        {
            is_float = true;
            self.consume();
            if let Some(sign) = self.peek_char()
                && (sign == '+' || sign == '-')
            {
                self.consume();
            }
            match self.peek_char() {
                Some(ch) if ch.is_ascii_digit() => self.consume_digits(),
                other => return Err(self.expected_digit_error(other)),
            }
        }

        // A number may not run directly into a name or another number;
        // `123abc` is one malformed token, not two tokens.
        if let Some(ch) = self.peek_char()
            && (is_name_start(ch) || ch == '.')
        {
            return Err(self.expected_digit_error(Some(ch)));
        }

        let text = &self.source[num_start..self.curr_byte_offset];
        Ok(if is_float {
            TokenKind::FloatValue(Cow::Borrowed(text))
        } else {
            TokenKind::IntValue(Cow::Borrowed(text))
        })
    }

    fn consume_digits(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit() {
                self.consume();
            } else {
                break;
            }
        }
    }

    fn expected_digit_error(&self, found: Option<char>) -> SyntaxError {
        let found = match found {
            Some(ch) => quoted_char(ch),
            None => "<EOF>".to_string(),
        };
        self.error(
            SyntaxErrorKind::InvalidNumber,
            format!("Invalid number, expected digit but got: {found}."),
            self.curr_position(),
        )
    }

    // =========================================================================
    // Strings
    // =========================================================================

    /// Lexes a string literal, dispatching to block strings for `"""`.
    fn lex_string(&mut self) -> Result<TokenKind<'src>, SyntaxError> {
        if self.remaining().starts_with("\"\"\"") {
            return self.lex_block_string();
        }

        self.consume(); // opening "
        let content_start = self.curr_byte_offset;

        // Owned buffer, allocated lazily on the first escape sequence.
        // Escape-free strings borrow from the source.
        let mut owned: Option<String> = None;
        let mut chunk_start = content_start;

        loop {
            let position = self.curr_position();
            match self.peek_char() {
                None => {
                    return Err(self.error(
                        SyntaxErrorKind::UnterminatedString,
                        "Unterminated string.",
                        position,
                    ));
                },
                Some('\n') | Some('\r') => {
                    // The excerpt renders the opening line and the line
                    // that follows it, since the reader's eye needs both
                    // to see the missing quote.
                    return Err(SyntaxError::with_following_line(
                        SyntaxErrorKind::UnterminatedString,
                        "Unterminated string.",
                        position,
                        self.source,
                    ));
                },
                Some('"') => {
                    let content_end = self.curr_byte_offset;
                    self.consume();
                    let value = match owned {
                        None => Cow::Borrowed(
                            &self.source[content_start..content_end],
                        ),
                        Some(mut buf) => {
                            buf.push_str(&self.source[chunk_start..content_end]);
                            Cow::Owned(buf)
                        },
                    };
                    return Ok(TokenKind::StringValue {
                        value,
                        block: false,
                    });
                },
                Some('\\') => {
                    let buf = owned.get_or_insert_with(String::new);
                    buf.push_str(&self.source[chunk_start..self.curr_byte_offset]);
                    let decoded = self.lex_escape_sequence(position)?;
                    buf.push(decoded);
                    chunk_start = self.curr_byte_offset;
                },
                Some(ch) if ch < '\u{0020}' && ch != '\t' => {
                    return Err(self.error(
                        SyntaxErrorKind::InvalidStringCharacter,
                        format!(
                            "Invalid character within String: {}.",
                            quoted_char(ch),
                        ),
                        position,
                    ));
                },
                Some(_) => {
                    self.consume();
                },
            }
        }
    }

    /// Lexes one escape sequence, positioned at the backslash. Returns the
    /// decoded character.
    fn lex_escape_sequence(
        &mut self,
        backslash: SourcePosition,
    ) -> Result<char, SyntaxError> {
        self.consume(); // '\'

        let Some(ch) = self.peek_char() else {
            return Err(self.error(
                SyntaxErrorKind::UnterminatedString,
                "Unterminated string.",
                self.curr_position(),
            ));
        };

        if ch == '\n' || ch == '\r' {
            return Err(SyntaxError::with_following_line(
                SyntaxErrorKind::UnterminatedString,
                "Unterminated string.",
                self.curr_position(),
                self.source,
            ));
        }

        let decoded = match ch {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => {
                self.consume(); // 'u'
                return self.lex_unicode_escape(backslash);
            },
            other => {
                return Err(self.error(
                    SyntaxErrorKind::InvalidEscapeSequence,
                    format!("Invalid character escape sequence: \\{other}."),
                    backslash,
                ));
            },
        };
        self.consume();
        Ok(decoded)
    }

    /// Lexes the `XXXX` of a `\uXXXX` escape, positioned after the `u`.
    ///
    /// The error message reports the four characters following `\u`
    /// exactly as found (fewer if the line or input ends first).
    fn lex_unicode_escape(
        &mut self,
        backslash: SourcePosition,
    ) -> Result<char, SyntaxError> {
        let mut hex = String::with_capacity(4);
        for _ in 0..4 {
            match self.peek_char() {
                Some(ch) if ch != '\n' && ch != '\r' => {
                    self.consume();
                    hex.push(ch);
                },
                _ => break,
            }
        }

        let invalid = || {
            self.error(
                SyntaxErrorKind::InvalidEscapeSequence,
                format!("Invalid character escape sequence: \\u{hex}."),
                backslash,
            )
        };

        if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let code = u32::from_str_radix(&hex, 16).expect("validated hex");
        char::from_u32(code).ok_or_else(invalid)
    }

    /// Lexes a `"""` block string, producing its dedented value.
    fn lex_block_string(&mut self) -> Result<TokenKind<'src>, SyntaxError> {
        self.consume();
        self.consume();
        self.consume();

        let mut raw = String::new();
        loop {
            match self.peek_char() {
                None => {
                    return Err(self.error(
                        SyntaxErrorKind::UnterminatedString,
                        "Unterminated string.",
                        self.curr_position(),
                    ));
                },
                Some('"') if self.remaining().starts_with("\"\"\"") => {
                    self.consume();
                    self.consume();
                    self.consume();
                    return Ok(TokenKind::StringValue {
                        value: Cow::Owned(dedent_block_string(&raw)),
                        block: true,
                    });
                },
                Some('\\') if self.remaining().starts_with("\\\"\"\"") => {
                    self.consume();
                    self.consume();
                    self.consume();
                    self.consume();
                    raw.push_str("\"\"\"");
                },
                Some('\r') => {
                    // Line terminators inside block strings normalize to \n.
                    self.consume();
                    if self.peek_char() == Some('\n') {
                        self.consume();
                    }
                    raw.push('\n');
                },
                Some(ch) => {
                    self.consume();
                    raw.push(ch);
                },
            }
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        Some(self.next_token())
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Returns `true` if `ch` can start a GraphQL name.
fn is_name_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

/// Returns `true` if `ch` can continue a GraphQL name.
fn is_name_continue(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}

/// Renders a character for error messages: printable ASCII appears as
/// itself in double quotes, anything else as a quoted `\uXXXX` escape so
/// invisible characters (zero-width spaces, control codes) stay visible.
fn quoted_char(ch: char) -> String {
    let code = ch as u32;
    if (0x20..0x7F).contains(&code) {
        format!("\"{ch}\"")
    } else if code <= 0xFFFF {
        format!("\"\\u{code:04X}\"")
    } else {
        format!("\"\\u{{{code:X}}}\"")
    }
}

/// Computes the value of a block string: strips the common indentation of
/// all lines after the first, then removes leading and trailing blank
/// lines, per the BlockStringValue algorithm.
fn dedent_block_string(raw: &str) -> String {
    let lines: Vec<&str> = raw.split('\n').collect();

    let common_indent = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min();

    let mut dedented: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                *line
            } else {
                let indent = common_indent.unwrap_or(0).min(line.len());
                // Only strip whitespace, never content, when a line is
                // shorter than the common indent.
                let prefix_len = line
                    .char_indices()
                    .take_while(|&(i, c)| i < indent && (c == ' ' || c == '\t'))
                    .count();
                &line[prefix_len..]
            }
        })
        .collect();

    while dedented.first().is_some_and(|l| l.trim().is_empty()) {
        dedented.remove(0);
    }
    while dedented.last().is_some_and(|l| l.trim().is_empty()) {
        dedented.pop();
    }

    dedented.join("\n")
}
