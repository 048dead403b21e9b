//! The token stream: a randomly-indexable, cursor-driven view over a
//! pre-materialized token list, with one-step backtrack (spec §2–§3).
//!
//! `advance`/`step_back` are the source's own lookahead primitive; `peek`
//! is the non-mutating alternative spec §9 suggests as preferable. Both
//! are provided — `peek` never moves the cursor, `step_back` undoes the
//! last `advance` by exactly one position, so either style composes
//! correctly with the other.

use crate::token::{Keyword, Token, TokenWithSpan, OPERATOR_CHARS};
use jackvm_util::{CompileError, CompileResult, Diagnostic, Span};

/// The token kind classification spec §3 groups tokens into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Symbol,
    IntLiteral,
    StringLiteral,
    Identifier,
}

pub struct TokenStream {
    tokens: Vec<TokenWithSpan>,
    /// Invariant: `cursor` ∈ `[0, tokens.len()]`.
    cursor: usize,
    /// Set when `advance` is called with no token left to consume. While
    /// set, `current` reports "no current token" rather than re-reporting
    /// the last real token the cursor still technically sits after — an
    /// `advance` that ran off the end must not look like a successful one.
    exhausted: bool,
}

impl TokenStream {
    pub fn new(tokens: Vec<TokenWithSpan>) -> Self {
        Self {
            tokens,
            cursor: 0,
            exhausted: false,
        }
    }

    /// True iff there is a token beyond the cursor left to `advance` into.
    pub fn has_more(&self) -> bool {
        self.cursor < self.tokens.len()
    }

    /// Reads the next token into "current", consuming one position.
    ///
    /// Does nothing to the cursor if already at the end, but marks the
    /// stream exhausted so `current` stops returning the previous token —
    /// callers that advance unconditionally and then check `current` still
    /// see a proper "no token here" result instead of silently matching
    /// whatever was last consumed.
    pub fn advance(&mut self) {
        if self.has_more() {
            self.cursor += 1;
        } else {
            self.exhausted = true;
        }
    }

    /// Undoes exactly one `advance` call: the previously-current token
    /// becomes current again. If the last `advance` ran off the end (it
    /// never moved the cursor, only marked the stream exhausted), this
    /// just clears that mark rather than decrementing past it.
    pub fn step_back(&mut self) {
        if self.exhausted {
            self.exhausted = false;
            return;
        }
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Returns the next token without consuming it.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor).map(|t| &t.token)
    }

    fn current(&self) -> Option<&TokenWithSpan> {
        if self.exhausted {
            return None;
        }
        self.cursor.checked_sub(1).and_then(|i| self.tokens.get(i))
    }

    /// The span of the current token, or a dummy span if nothing has been
    /// advanced into yet.
    pub fn current_span(&self) -> Span {
        self.current().map(|t| t.span).unwrap_or(Span::DUMMY)
    }

    fn current_or_eof_description(&self) -> String {
        self.current()
            .map(|t| t.token.describe())
            .unwrap_or_else(|| "end of input".to_string())
    }

    /// Public form of [`Self::current_or_eof_description`], for callers
    /// (the compilation engine) building their own `UnexpectedToken`
    /// errors around `advance`/`symbol_of_current`-style checks.
    pub fn describe_current(&self) -> String {
        self.current_or_eof_description()
    }

    pub fn kind_of_current(&self) -> Option<TokenKind> {
        self.current().map(|t| match t.token {
            Token::Keyword(_) => TokenKind::Keyword,
            Token::Symbol(_) => TokenKind::Symbol,
            Token::IntLiteral(_) => TokenKind::IntLiteral,
            Token::StringLiteral(_) => TokenKind::StringLiteral,
            Token::Identifier(_) => TokenKind::Identifier,
        })
    }

    /// Builds the located [`Diagnostic`] for a token-kind mismatch first,
    /// logging it at `debug` level, then downgrades it to the structured
    /// [`CompileError::WrongTokenKind`] the caller actually propagates.
    fn wrong_kind(&self, requested: &'static str) -> CompileError {
        let span = self.current_span();
        let actual = self.current_or_eof_description();
        let diagnostic = Diagnostic::error(
            format!("expected token to be {requested}, but it is {actual}"),
            span,
        );
        tracing::debug!(%diagnostic, "wrong token kind");
        CompileError::WrongTokenKind {
            span,
            requested,
            actual,
        }
    }

    pub fn keyword_of_current(&self) -> CompileResult<Keyword> {
        match self.current().map(|t| &t.token) {
            Some(Token::Keyword(k)) => Ok(*k),
            _ => Err(self.wrong_kind("a keyword")),
        }
    }

    pub fn symbol_of_current(&self) -> CompileResult<char> {
        match self.current().map(|t| &t.token) {
            Some(Token::Symbol(c)) => Ok(*c),
            _ => Err(self.wrong_kind("a symbol")),
        }
    }

    pub fn identifier_of_current(&self) -> CompileResult<&str> {
        match self.current().map(|t| &t.token) {
            Some(Token::Identifier(name)) => Ok(name.as_str()),
            _ => Err(self.wrong_kind("an identifier")),
        }
    }

    pub fn int_value_of_current(&self) -> CompileResult<u16> {
        match self.current().map(|t| &t.token) {
            Some(Token::IntLiteral(n)) => Ok(*n),
            _ => Err(self.wrong_kind("an integer literal")),
        }
    }

    /// The string literal's content, with exactly one leading and one
    /// trailing quote stripped. Tokens already store the unquoted content
    /// (an internal representation choice — the quotes never round-trip
    /// through this accessor either way), so this simply returns it.
    pub fn string_value_of_current(&self) -> CompileResult<&str> {
        match self.current().map(|t| &t.token) {
            Some(Token::StringLiteral(s)) => Ok(s.as_str()),
            _ => Err(self.wrong_kind("a string literal")),
        }
    }

    /// True iff current is one of `+ - * / & | < > =` (spec §4.1).
    pub fn is_operator_current(&self) -> bool {
        matches!(self.current().map(|t| &t.token), Some(Token::Symbol(c)) if OPERATOR_CHARS.contains(c))
    }
}
