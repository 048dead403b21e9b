//! Property-based round-trip test for the tokenizer (spec §8), mirroring
//! `faxc-lex`'s use of `proptest` for lexer invariants.

use jackvm_lex::{tokenize, Token};
use proptest::prelude::*;

/// One lexeme that renders back to exactly the token it started from.
fn lexeme_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("class".to_string()),
        Just("let".to_string()),
        Just("while".to_string()),
        Just("return".to_string()),
        Just("true".to_string()),
        "[a-zA-Z_][a-zA-Z_0-9]{0,8}".prop_filter("not a keyword", |s| {
            jackvm_lex::Keyword::from_str(s).is_none()
        }),
        (0u16..30000).prop_map(|n| n.to_string()),
        Just("+".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just(";".to_string()),
    ]
}

proptest! {
    #[test]
    fn round_trip_is_stable(lexemes in prop::collection::vec(lexeme_strategy(), 1..20)) {
        let source = lexemes.join(" ");
        let first_pass = tokenize(&source);

        // Re-render the recovered token texts with a single separator and
        // retokenize: the token sequence must be unchanged.
        let rendered: Vec<String> = first_pass
            .iter()
            .map(|t| match &t.token {
                Token::Keyword(k) => k.as_str().to_string(),
                Token::Symbol(c) => c.to_string(),
                Token::IntLiteral(n) => n.to_string(),
                Token::StringLiteral(s) => format!("\"{s}\""),
                Token::Identifier(name) => name.clone(),
            })
            .collect();
        let second_pass = tokenize(&rendered.join(" "));

        let strip_spans = |v: &[jackvm_lex::TokenWithSpan]| -> Vec<Token> {
            v.iter().map(|t| t.token.clone()).collect()
        };
        prop_assert_eq!(strip_spans(&first_pass), strip_spans(&second_pass));
    }
}
