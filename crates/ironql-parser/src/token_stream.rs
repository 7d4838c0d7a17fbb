//! Buffered, peekable view over the [`Lexer`] with bounded lookahead.

use crate::Lexer;
use crate::SyntaxError;
use crate::Token;
use crate::TokenKind;
use std::collections::VecDeque;

/// A lookahead buffer over the lexer.
///
/// Tokens are stored in a [`VecDeque`] ring buffer: unconsumed tokens are
/// buffered at the back, `consume()` pops from the front. Because lexical
/// errors are fatal, the first error is latched and returned for every
/// subsequent call.
pub struct TokenStream<'src> {
    lexer: Lexer<'src>,
    buffer: VecDeque<Token<'src>>,
    /// First lexical error encountered, if any. Latched: once set, no
    /// further tokens are produced.
    error: Option<SyntaxError>,
}

impl<'src> TokenStream<'src> {
    pub fn new(lexer: Lexer<'src>) -> Self {
        Self {
            lexer,
            buffer: VecDeque::new(),
            error: None,
        }
    }

    /// Returns the source text backing this stream.
    pub fn source(&self) -> &'src str {
        self.lexer.source()
    }

    /// Advances to the next token and returns it as an owned value.
    pub fn consume(&mut self) -> Result<Token<'src>, SyntaxError> {
        self.ensure_buffer_has(1)?;
        self.buffer
            .pop_front()
            .ok_or_else(|| self.error.clone().expect("buffer empty without error"))
    }

    /// Peeks at the next token without consuming it.
    #[inline]
    pub fn peek(&mut self) -> Result<&Token<'src>, SyntaxError> {
        self.peek_nth(0)
    }

    /// Peeks at the nth token ahead (0-indexed from the next unconsumed
    /// token), filling the buffer as needed.
    pub fn peek_nth(&mut self, n: usize) -> Result<&Token<'src>, SyntaxError> {
        self.ensure_buffer_has(n + 1)?;
        match self.buffer.get(n) {
            Some(token) => Ok(token),
            None => Err(self.error.clone().expect("buffer short without error")),
        }
    }

    /// Returns `true` if the next token is `Eof`.
    pub fn is_at_end(&mut self) -> Result<bool, SyntaxError> {
        Ok(matches!(self.peek()?.kind, TokenKind::Eof))
    }

    /// Fills the buffer to at least `count` unconsumed tokens. The lexer
    /// repeats its `Eof` token indefinitely, so the buffer can always be
    /// filled unless an error is latched.
    fn ensure_buffer_has(&mut self, count: usize) -> Result<(), SyntaxError> {
        while self.buffer.len() < count {
            if let Some(error) = &self.error {
                return Err(error.clone());
            }
            match self.lexer.next_token() {
                Ok(token) => self.buffer.push_back(token),
                Err(error) => {
                    self.error = Some(error.clone());
                    return Err(error);
                },
            }
        }
        Ok(())
    }
}
