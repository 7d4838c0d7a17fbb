use crate::SourceLocation;

/// Lexer-internal source position with dual column tracking.
///
/// This is a pure data struct with no mutation methods; the lexer is
/// responsible for computing position values as it scans input.
///
/// # Indexing Convention
///
/// **All values are 0-based:**
/// - `line`: 0 = first line of the document
/// - `col_utf8`: UTF-8 character count within the current line
/// - `col_utf16`: UTF-16 code unit offset within the current line
/// - `byte_offset`: byte offset within the whole document
///
/// # Dual Column Tracking
///
/// Two column representations are maintained:
/// - **`col_utf8`**: number of characters from the start of the current
///   line, incrementing by 1 per character regardless of its byte width.
///   This matches what most text editors display as "column" and is what
///   error rendering uses.
/// - **`col_utf16`**: UTF-16 code unit offset within the line, for callers
///   that index into UTF-16 source buffers (LSP-style positions).
///   Characters outside the Basic Multilingual Plane advance this by 2.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SourcePosition {
    line: usize,
    col_utf8: usize,
    col_utf16: usize,
    byte_offset: usize,
}

impl SourcePosition {
    pub fn new(
        line: usize,
        col_utf8: usize,
        col_utf16: usize,
        byte_offset: usize,
    ) -> Self {
        Self {
            line,
            col_utf8,
            col_utf16,
            byte_offset,
        }
    }

    /// Returns the 0-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the 0-based UTF-8 character count within the current line.
    pub fn col_utf8(&self) -> usize {
        self.col_utf8
    }

    /// Returns the 0-based UTF-16 code unit offset within the current line.
    pub fn col_utf16(&self) -> usize {
        self.col_utf16
    }

    /// Returns the 0-based byte offset from document start.
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Converts to the public, 1-based [`SourceLocation`] attached to AST
    /// nodes and errors.
    pub fn to_location(self) -> SourceLocation {
        SourceLocation {
            line: self.line + 1,
            column: self.col_utf8 + 1,
            offset: self.byte_offset,
        }
    }
}

/// A half-open span of source text: `[start, end)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Span {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl Span {
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        Self { start, end }
    }
}
