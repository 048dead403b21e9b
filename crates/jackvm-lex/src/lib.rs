//! jackvm-lex — the Tokenizer (spec §4.1).
//!
//! Turns raw Jack source text into an ordered, randomly-indexable token
//! stream, stripping comments as it goes. Mirrors the teacher's
//! `faxc-lex` crate split (`cursor.rs` + a `lexer/` module broken out by
//! concern), scaled to this grammar's simpler, uniform word-scanning rule.

mod cursor;
mod lexer;
mod stream;
mod token;

pub use stream::{TokenKind, TokenStream};
pub use token::{Keyword, Token, TokenWithSpan, OPERATOR_CHARS, SYMBOL_CHARS};

/// Tokenizes `source` into a flat token list. Convenience wrapper over
/// [`lexer::Lexer`] for callers (and tests) that don't need the lexer
/// type itself.
pub fn tokenize(source: &str) -> Vec<TokenWithSpan> {
    lexer::Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jackvm_util::Span;

    #[test]
    fn has_more_and_cursor_invariant() {
        let mut stream = TokenStream::new(tokenize("class A { }"));
        let mut count = 0;
        while stream.has_more() {
            stream.advance();
            count += 1;
        }
        assert_eq!(count, 4);
        assert!(!stream.has_more());
    }

    #[test]
    fn step_back_returns_same_current_token() {
        let mut stream = TokenStream::new(tokenize("foo bar"));
        stream.advance();
        let first = stream.identifier_of_current().unwrap().to_string();
        stream.advance();
        stream.step_back();
        assert_eq!(stream.identifier_of_current().unwrap(), "bar");
        stream.step_back();
        assert_eq!(stream.identifier_of_current().unwrap(), first);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut stream = TokenStream::new(tokenize("foo bar"));
        assert_eq!(stream.peek(), Some(&Token::Identifier("foo".into())));
        assert_eq!(stream.peek(), Some(&Token::Identifier("foo".into())));
        stream.advance();
        assert_eq!(stream.identifier_of_current().unwrap(), "foo");
    }

    #[test]
    fn line_comment_stripped_to_end_of_line() {
        let tokens = tokenize("let x = 1; // comment\nlet y = 2;");
        assert_eq!(tokens.len(), 10);
    }

    #[test]
    fn block_comment_spanning_lines_stripped() {
        let tokens = tokenize("let x /* this\nis a\ncomment */ = 1;");
        assert_eq!(
            tokens.iter().map(|t| &t.token).collect::<Vec<_>>(),
            vec![
                &Token::Keyword(Keyword::Let),
                &Token::Identifier("x".into()),
                &Token::Symbol('='),
                &Token::IntLiteral(1),
                &Token::Symbol(';'),
            ]
        );
    }

    #[test]
    fn block_comment_does_not_nest() {
        // The first `*/` closes the comment; "nested */" ends it early,
        // leaving "still outer */" as real source (spec §4.1: "nesting is
        // not supported").
        let tokens = tokenize("/* outer /* inner */ still outer */ x");
        // After the comment ends at the first `*/`, "still", "outer", "*",
        // "/", and "x" are all real tokens.
        assert!(tokens
            .iter()
            .any(|t| matches!(&t.token, Token::Identifier(s) if s == "still")));
    }

    #[test]
    fn comment_stripping_equals_removing_inside_text() {
        // spec §8: tokenizing pre + "/*" + inside + "*/" + post equals
        // tokenizing pre + " " + post, for inside containing no "*/".
        let pre = "let x = 1;";
        let inside = " this is dropped entirely ";
        let post = "let y = 2;";
        let with_comment = tokenize(&format!("{pre}/*{inside}*/{post}"));
        let without_comment = tokenize(&format!("{pre} {post}"));
        let tokens_only = |v: &[_]| -> Vec<Token> {
            // discard spans for comparison
            v.iter()
                .map(|t: &crate::TokenWithSpan| t.token.clone())
                .collect()
        };
        assert_eq!(tokens_only(&with_comment), tokens_only(&without_comment));
    }

    #[test]
    fn symbol_tokens_are_single_characters_regardless_of_adjacency() {
        let tokens = tokenize("(){}[].,;+-*/&|<>=~");
        assert_eq!(tokens.len(), SYMBOL_CHARS.len());
        for (t, &c) in tokens.iter().zip(SYMBOL_CHARS) {
            assert_eq!(t.token, Token::Symbol(c));
        }
    }

    #[test]
    fn span_tracks_line_and_column() {
        let tokens = tokenize("class\n  Foo");
        assert_eq!(tokens[0].span, Span::new(1, 1));
        assert_eq!(tokens[1].span, Span::new(2, 3));
    }
}
