//! Property-based tests for the GAUSS lexer
//!
//! Whatever the input, the token stream must cover it exactly once, in order, and the same
//! input must always produce the same tokens.

use gaussdoc::gauss::lexing::tokenize;
use gaussdoc::gauss::{Token, TokenKind};
use proptest::prelude::*;

/// Fragments that exercise every lexer state, glued together in random order.
fn gauss_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("x = 1;\n".to_string()),
        Just("proc (2) = f(a, b);\n".to_string()),
        Just("endp;\n".to_string()),
        Just("#if 0\n".to_string()),
        Just("#endif\n".to_string()),
        Just("#include pgraph.dec\n".to_string()),
        Just("#define A \\\n 1\n".to_string()),
        Just("\"str\\n\\x41\"".to_string()),
        Just("/* block".to_string()),
        Just("*/".to_string()),
        Just("@ note @".to_string()),
        Just("// line\n".to_string()),
        Just("s.a.b->c".to_string()),
        Just("fn g(x) = x^2;".to_string()),
        Just("label:\n".to_string()),
        Just("\t\r\n".to_string()),
        "[a-z_]{1,8}",
        "[0-9.eE+-]{1,6}",
        "[ -~]{0,12}",
        "\\PC{0,4}",
    ]
}

fn gauss_source() -> impl Strategy<Value = String> {
    prop::collection::vec(gauss_fragment(), 0..16).prop_map(|parts| parts.concat())
}

fn assert_covers(source: &str, tokens: &[Token<'_>]) {
    let mut cursor = 0;
    for token in tokens {
        assert!(!token.text.is_empty(), "empty token at {}", cursor);
        assert_eq!(token.span.start, cursor, "gap or overlap before {:?}", token);
        assert_eq!(&source[token.span.clone()], token.text);
        cursor = token.span.end;
    }
    assert_eq!(cursor, source.len());
}

proptest! {
    #[test]
    fn test_tokens_cover_input(source in gauss_source()) {
        let tokens: Vec<_> = tokenize(&source).collect();
        assert_covers(&source, &tokens);
        let rebuilt: String = tokens.iter().map(|token| token.text).collect();
        prop_assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_arbitrary_text_is_covered(source in any::<String>()) {
        let tokens: Vec<_> = tokenize(&source).collect();
        assert_covers(&source, &tokens);
    }

    #[test]
    fn test_tokenize_is_deterministic(source in gauss_source()) {
        let first: Vec<_> = tokenize(&source).collect();
        let second: Vec<_> = tokenize(&source).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_keywords_are_case_insensitive(word in prop::sample::select(vec!["print", "endp", "retp", "while", "local"])) {
        let upper = word.to_uppercase();
        let lower: Vec<TokenKind> = tokenize(word).map(|token| token.kind).collect();
        let shouted: Vec<TokenKind> = tokenize(&upper).map(|token| token.kind).collect();
        prop_assert_eq!(lower, shouted);
    }
}
