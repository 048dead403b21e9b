//! Diagnostic rendering.
//!
//! Scaled-down relative to `faxc-util::diagnostic`'s builder API: this
//! compiler has no error recovery (spec §4.3: "the first unexpected token
//! aborts the compilation"), so there is never more than one diagnostic for
//! a given file. `Diagnostic` exists to give that one error a consistent,
//! located rendering wherever it's produced.

use crate::Span;
use std::fmt;

/// Diagnostic severity. Only `Error` is ever produced by this compiler
/// today, but the level is kept explicit (rather than hard-coding "error:"
/// into every message) the way `faxc-util::diagnostic::Level` does, so a
/// future warning pass has somewhere to plug in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
        }
    }
}

/// A single, located diagnostic message.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.span, self.level, self.message)
    }
}
