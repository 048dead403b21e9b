//! Source locations.
//!
//! A [`Span`] marks where a token (or a diagnostic about a token) came from
//! in the original source text: a 1-based line and column. The compiler is
//! single-pass over one file at a time (spec §5), so a line/column pair is
//! sufficient context; there is no cross-file source map to thread through.

use std::fmt;

/// A position in source text, used to anchor diagnostics to the offending
/// token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Span {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number (counted in bytes; source is 7-bit ASCII).
    pub column: u32,
}

impl Span {
    /// A span with no meaningful location, used where position tracking
    /// genuinely doesn't apply (e.g. synthetic tokens in tests).
    pub const DUMMY: Span = Span { line: 0, column: 0 };

    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
