/// A position in the original source text, attached to every AST node.
///
/// Unlike the lexer-internal [`SourcePosition`](crate::SourcePosition),
/// `line` and `column` here are **1-based** because this is the
/// representation surfaced to users (error locations, tooling). `offset`
/// remains the 0-based byte offset into the source text.
///
/// Locations are captured once during parsing and never recomputed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize)]
pub struct SourceLocation {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in UTF-8 characters.
    pub column: usize,
    /// 0-based byte offset from the start of the source text.
    #[serde(skip)]
    pub offset: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
