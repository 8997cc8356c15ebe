//! Rule-level tests for the GAUSS lexer: which token kinds each construct produces.

use gaussdoc::gauss::lexing::{tokenize, State};
use gaussdoc::gauss::TokenKind::{self, *};
use rstest::rstest;

fn pairs(source: &str) -> Vec<(TokenKind, &str)> {
    tokenize(source).map(|token| token.pair()).collect()
}

#[rstest]
#[case::hex("0x1F", NumberHex)]
#[case::exponent("1.5e3", NumberFloat)]
#[case::bare_exponent("1e5", NumberFloat)]
#[case::decimal("3.14", NumberFloat)]
#[case::leading_dot(".5", NumberFloat)]
#[case::negative("-2.5", NumberFloat)]
#[case::integer_literal("42", NumberFloat)]
fn test_number_literals(#[case] source: &str, #[case] kind: TokenKind) {
    assert_eq!(pairs(source), vec![(kind, source)]);
}

#[rstest]
#[case::keyword("print", Keyword)]
#[case::keyword_upper("PRINT", Keyword)]
#[case::declaration("local", KeywordDeclaration)]
#[case::declaration_mixed("Matrix", KeywordDeclaration)]
#[case::literal("__STDOUT", Literal)]
#[case::operator_word("and", OperatorWord)]
#[case::dotted_operator_word(".ne", OperatorWord)]
#[case::comparison("ge", OperatorWord)]
#[case::identifier("printx", Name)]
#[case::builtin_is_plain_name("cdfn", Name)]
fn test_single_words(#[case] source: &str, #[case] kind: TokenKind) {
    assert_eq!(pairs(source), vec![(kind, source)]);
}

#[rstest]
#[case::not_equal("!=", Operator)]
#[case::element_multiply(".*", Operator)]
#[case::transpose("'", Operator)]
#[case::modulo("%", Operator)]
#[case::stray_comment_close("*/", Error)]
#[case::semicolon(";", Punctuation)]
fn test_operators_and_punctuation(#[case] source: &str, #[case] kind: TokenKind) {
    assert_eq!(pairs(source), vec![(kind, source)]);
}

#[test]
fn test_assignment_statement() {
    assert_eq!(
        pairs("x = 1;\n"),
        vec![
            (Name, "x"),
            (Text, " "),
            (Punctuation, "="),
            (Text, " "),
            (NumberFloat, "1"),
            (Punctuation, ";"),
            (Text, "\n"),
        ]
    );
}

#[test]
fn test_keyword_before_call_heuristic() {
    assert_eq!(
        pairs("print(x)"),
        vec![(Keyword, "print"), (Punctuation, "("), (Name, "x"), (Punctuation, ")")]
    );
    assert_eq!(
        pairs("myfunc (a)"),
        vec![
            (NameFunction, "myfunc"),
            (Whitespace, " "),
            (Punctuation, "("),
            (Name, "a"),
            (Punctuation, ")"),
        ]
    );
}

#[test]
fn test_label_at_line_start() {
    assert_eq!(
        pairs("done:\n"),
        vec![(NameLabel, "done"), (Punctuation, ":"), (Text, "\n")]
    );
    // a double colon is not a label
    assert_eq!(
        pairs("a::b"),
        vec![(Name, "a"), (Punctuation, ":"), (Punctuation, ":"), (Name, "b")]
    );
}

#[test]
fn test_struct_declaration() {
    assert_eq!(
        pairs("struct point p;"),
        vec![
            (Keyword, "struct"),
            (Whitespace, " "),
            (NameClass, "point"),
            (Text, " "),
            (Name, "p"),
            (Punctuation, ";"),
        ]
    );
}

#[test]
fn test_arrow_member_chain() {
    assert_eq!(
        pairs("s->f.g"),
        vec![
            (Name, "s"),
            (Punctuation, "->"),
            (NameAttribute, "f"),
            (Punctuation, "."),
            (NameAttribute, "g"),
        ]
    );
}

#[test]
fn test_fn_header_relexes_parameters() {
    let tokens: Vec<_> = tokenize("fn area(r) = pi * r^2;").collect();
    let kinds: Vec<_> = tokens.iter().map(|token| token.pair()).collect();
    assert_eq!(
        kinds,
        vec![
            (Keyword, "fn"),
            (Whitespace, " "),
            (NameFunction, "area"),
            (Punctuation, "("),
            (Name, "r"),
            (Punctuation, ")"),
            (Text, " "),
            (Punctuation, "="),
            (Text, " "),
            (Name, "pi"),
            (Text, " "),
            (Operator, "*"),
            (Text, " "),
            (Name, "r"),
            (Operator, "^"),
            (NumberFloat, "2"),
            (Punctuation, ";"),
        ]
    );
    // spans of the re-lexed group point into the outer buffer
    assert_eq!(tokens[4].span, 8..9);
}

#[test]
fn test_include_directive() {
    assert_eq!(
        pairs("#include pgraph.dec\nx"),
        vec![
            (CommentPreproc, "#"),
            (CommentPreproc, "include"),
            (Text, " "),
            (CommentPreprocFile, "pgraph.dec"),
            (CommentPreproc, "\n"),
            (Name, "x"),
        ]
    );
}

#[test]
fn test_indented_directive_with_continuation() {
    assert_eq!(
        pairs("  #define A \\\n1\n"),
        vec![
            (Text, "  "),
            (CommentPreproc, "#"),
            (CommentPreproc, "define A \\"),
            (CommentPreproc, "\n"),
            (CommentPreproc, "1"),
            (CommentPreproc, "\n"),
        ]
    );
}

#[test]
fn test_nested_if0_blocks() {
    let mut tokens = tokenize("#if 0\n#if 1\nx\n#endif\ny\n#endif\nz");
    let collected: Vec<_> = tokens.by_ref().map(|token| token.pair()).collect();
    assert_eq!(
        collected,
        vec![
            (CommentPreproc, "#if 0"),
            (Comment, "\n"),
            (CommentPreproc, "#if 1\n"),
            (Comment, "x\n"),
            (CommentPreproc, "#endif\n"),
            (Comment, "y\n"),
            (CommentPreproc, "#endif\n"),
            (Name, "z"),
        ]
    );
    assert_eq!(tokens.stack(), &[State::Root]);
}

#[rstest]
#[case::line("// note\nx", vec![(CommentSingle, "// note\n"), (Name, "x")])]
#[case::block("/* a\nb */x", vec![(CommentMultiline, "/* a\nb */"), (Name, "x")])]
#[case::at_sign("@ doc @x", vec![(CommentMultiline, "@ doc @"), (Name, "x")])]
fn test_comments(#[case] source: &str, #[case] expected: Vec<(TokenKind, &str)>) {
    assert_eq!(pairs(source), expected);
}

#[test]
fn test_escaped_quote_in_string() {
    assert_eq!(
        pairs(r#""a\"b""#),
        vec![
            (String, "\""),
            (String, "a"),
            (StringEscape, "\\\""),
            (String, "b"),
            (String, "\""),
        ]
    );
}

#[test]
fn test_if0_else_returns_to_code() {
    let mut tokens = tokenize("#if 0\nfoo\n#else\nbar\n#endif\n");
    let collected: Vec<_> = tokens.by_ref().map(|token| token.pair()).collect();
    assert_eq!(
        collected,
        vec![
            (CommentPreproc, "#if 0"),
            (Comment, "\n"),
            (Comment, "foo\n"),
            (CommentPreproc, "#else\n"),
            (Name, "bar"),
            (Text, "\n"),
            (CommentPreproc, "#"),
            (CommentPreproc, "endif"),
            (CommentPreproc, "\n"),
        ]
    );
    assert_eq!(tokens.stack(), &[State::Root]);
}

#[test]
fn test_string_escape_forms() {
    assert_eq!(
        pairs(r#""\x41\u00e9\101""#),
        vec![
            (String, "\""),
            (StringEscape, r"\x41"),
            (StringEscape, r"\u00e9"),
            (StringEscape, r"\101"),
            (String, "\""),
        ]
    );
    // matching ignores case, so the four-digit form claims `\U` first
    assert_eq!(
        pairs(r#""\U0001F600""#),
        vec![
            (String, "\""),
            (StringEscape, r"\U0001"),
            (String, "F600"),
            (String, "\""),
        ]
    );
}

#[test]
fn test_string_continuation_and_stray_backslash() {
    assert_eq!(
        pairs("\"a\\\nb\""),
        vec![
            (String, "\""),
            (String, "a"),
            (String, "\\\n"),
            (String, "b"),
            (String, "\""),
        ]
    );
    assert_eq!(
        pairs(r#""a\q""#),
        vec![
            (String, "\""),
            (String, "a"),
            (String, "\\"),
            (String, "q"),
            (String, "\""),
        ]
    );
}

#[test]
fn test_unterminated_string_runs_to_end() {
    let mut tokens = tokenize("\"abc\nx");
    let collected: Vec<_> = tokens.by_ref().map(|token| token.pair()).collect();
    assert_eq!(collected, vec![(String, "\""), (String, "abc\nx")]);
    assert_eq!(tokens.stack(), &[State::Root, State::String]);
}

#[rstest]
#[case::for_loop("for i", "for")]
#[case::thread_loop("threadfor j", "threadfor")]
fn test_loop_index_names(#[case] source: &str, #[case] keyword: &str) {
    let index = &source[keyword.len() + 1..];
    assert_eq!(
        pairs(source),
        vec![(Keyword, keyword), (Whitespace, " "), (Name, index)]
    );
}

#[test]
fn test_sign_binds_to_number() {
    assert_eq!(pairs("x-1"), vec![(Name, "x"), (NumberFloat, "-1")]);
}
