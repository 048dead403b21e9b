//! Error taxonomy for the compiler core (spec §7).
//!
//! One `thiserror` enum per the error categories spec.md enumerates. This
//! mirrors `faxc-util::error`'s per-concern enum split and `faxt::error`'s
//! single crate-wide `Result` alias.

use crate::Span;
use std::fmt;
use thiserror::Error;

/// A single token kind, for use in `UnexpectedToken`/`WrongTokenKind`
/// messages. Kept separate from `jackvm_lex::Token` so this crate doesn't
/// depend on the lexer crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExpectedKind {
    Keyword(&'static str),
    Symbol(char),
    Identifier,
    IntLiteral,
    StringLiteral,
    Type,
    /// A human-readable description for cases that don't map to one token
    /// kind (e.g. "a statement").
    Described(&'static str),
}

impl fmt::Display for ExpectedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedKind::Keyword(k) => write!(f, "keyword '{k}'"),
            ExpectedKind::Symbol(c) => write!(f, "'{c}'"),
            ExpectedKind::Identifier => write!(f, "an identifier"),
            ExpectedKind::IntLiteral => write!(f, "an integer literal"),
            ExpectedKind::StringLiteral => write!(f, "a string literal"),
            ExpectedKind::Type => write!(f, "a type"),
            ExpectedKind::Described(s) => write!(f, "{s}"),
        }
    }
}

/// Errors produced while compiling a single source file (spec §7).
#[derive(Debug, Error)]
pub enum CompileError {
    /// I/O failure reading the source (spec §7: `UnreadableInput`).
    #[error("could not read source: {0}")]
    UnreadableInput(String),

    /// I/O failure writing VM text (spec §7: `UnwritableOutput`).
    #[error("could not write output: {0}")]
    UnwritableOutput(String),

    /// The parser expected a specific token and saw something else.
    #[error("{span}: expected {expected}, got {actual}")]
    UnexpectedToken {
        span: Span,
        expected: ExpectedKind,
        actual: String,
    },

    /// A token-value accessor was called on a token of another kind.
    #[error("{span}: expected token to be {requested}, but it is {actual}")]
    WrongTokenKind {
        span: Span,
        requested: &'static str,
        actual: String,
    },

    /// Parsing completed but the tokenizer still has tokens left.
    #[error("{span}: unexpected trailing input starting at {actual}")]
    StrayInput { span: Span, actual: String },
}

pub type CompileResult<T> = std::result::Result<T, CompileError>;
