//! Word lexing: keywords, integer literals, identifiers (spec §4.1).
//!
//! The grammar doesn't dispatch on the first character the way a
//! letter-vs-digit lexer would; instead a whole maximal run of
//! non-whitespace, non-symbol, non-quote bytes is scanned first and then
//! classified in one step: keyword, else all-digits, else identifier.

use super::core::Lexer;
use crate::token::{Keyword, Token, SYMBOL_CHARS};

fn is_word_byte(b: u8) -> bool {
    let c = b as char;
    !c.is_ascii_whitespace() && c != '"' && !SYMBOL_CHARS.contains(&c)
}

/// Folds a run of ASCII digits into a `u16`, wrapping on overflow rather
/// than rejecting the literal (spec §9, known limitation 3: values above
/// 32767 are not validated and silently overflow downstream).
fn wrapping_parse_u16(digits: &str) -> u16 {
    let mut acc: u32 = 0;
    for b in digits.bytes() {
        acc = acc.wrapping_mul(10).wrapping_add((b - b'0') as u32);
    }
    acc as u16
}

impl<'a> Lexer<'a> {
    /// Called with the cursor positioned on the first byte of the word.
    pub(super) fn lex_word(&mut self) -> Token {
        let text = self.cursor.take_while(is_word_byte);
        if let Some(keyword) = Keyword::from_str(text) {
            Token::Keyword(keyword)
        } else if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            Token::IntLiteral(wrapping_parse_u16(text))
        } else {
            Token::Identifier(text.to_string())
        }
    }
}
