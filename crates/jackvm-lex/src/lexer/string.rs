//! String literal lexing (spec §4.1).
//!
//! A string starts at `"` and extends to the next `"` on the *same* line.
//! If the line ends (or input ends) first, the literal is unterminated and
//! is silently dropped (spec §9, known limitation 4) — no token is
//! produced and no diagnostic is raised; scanning resumes after the
//! consumed text.

use super::core::Lexer;
use crate::token::Token;

impl<'a> Lexer<'a> {
    /// Called with the cursor positioned on the opening `"`.
    ///
    /// Returns `Some(Token::StringLiteral(content))` on a properly closed
    /// literal, or `None` if it runs off the end of the line unterminated.
    pub(super) fn lex_string(&mut self) -> Option<Token> {
        self.cursor.advance(); // opening '"'
        let content = self.cursor.take_while(|b| b != b'"' && b != b'\n');
        if self.cursor.current() == b'"' {
            self.cursor.advance(); // closing '"'
            Some(Token::StringLiteral(content.to_string()))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::tokenize;
    use crate::token::Token;

    #[test]
    fn string_preserves_embedded_symbols_and_spaces() {
        let tokens = tokenize("\"a b; c[0]\"");
        assert_eq!(
            tokens[0].token,
            Token::StringLiteral("a b; c[0]".to_string())
        );
    }

    #[test]
    fn unterminated_string_is_silently_dropped() {
        let tokens = tokenize("\"unterminated\nfoo");
        // No StringLiteral token is produced; lexing resumes on the next
        // line and picks up `foo` as an identifier.
        assert!(!tokens
            .iter()
            .any(|t| matches!(t.token, Token::StringLiteral(_))));
        assert!(matches!(tokens.last().unwrap().token, Token::Identifier(ref s) if s == "foo"));
    }
}
