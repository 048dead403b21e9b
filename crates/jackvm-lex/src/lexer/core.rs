//! Core lexer: dispatch and token materialization.

use crate::cursor::Cursor;
use crate::token::{Token, TokenWithSpan};
use jackvm_util::Span;

/// Scans a whole source file into a flat list of tokens up front.
///
/// The full list is materialized before any parsing begins (spec §5: the
/// input reader is closed "before any code generation begins, since the
/// full token list is materialized up front"), giving the engine the
/// "ordered, randomly-indexable sequence" spec §2 describes.
pub struct Lexer<'a> {
    pub(super) cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Tokenizes the entire source, dropping comments and unterminated
    /// string literals (spec §4.1), and returns the token list.
    pub fn tokenize(mut self) -> Vec<TokenWithSpan> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia();
            if self.cursor.is_at_end() {
                return tokens;
            }

            let start_line = self.cursor.line();
            let start_col = self.cursor.column();
            let span = Span::new(start_line, start_col);

            let token = match self.cursor.current() {
                b'"' => self.lex_string(),
                c if crate::token::SYMBOL_CHARS.contains(&(c as char)) => {
                    self.cursor.advance();
                    Some(Token::Symbol(c as char))
                }
                _ => Some(self.lex_word()),
            };

            if let Some(token) = token {
                tokens.push(TokenWithSpan { token, span });
            }
            // `None` means an unterminated string literal was silently
            // dropped (spec §9 item 4); just continue scanning.
        }
    }
}
