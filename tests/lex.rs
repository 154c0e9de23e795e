use csui::lexer::{self, Token, TokenKind};
use csui::span::SourceMap;

fn lex_src(src: &str) -> Vec<Token> {
    let sm = SourceMap::new(src.to_string());
    lexer::lex(&sm).unwrap()
}

fn kinds(src: &str) -> Vec<TokenKind> {
    lex_src(src).into_iter().map(|t| t.kind).collect()
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(
        kinds("block atom if then else fi g_check"),
        vec![
            TokenKind::Block,
            TokenKind::Atom,
            TokenKind::If,
            TokenKind::Then,
            TokenKind::Else,
            TokenKind::Fi,
            TokenKind::Ident("g_check".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn keywords_are_case_insensitive() {
    assert_eq!(
        kinds("IF g_check THEN"),
        vec![
            TokenKind::If,
            TokenKind::Ident("g_check".to_string()),
            TokenKind::Then,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn block_with_flag_and_string() {
    assert_eq!(
        kinds("block --info \"echo hi\""),
        vec![
            TokenKind::Block,
            TokenKind::Flag("--info".to_string()),
            TokenKind::Str("echo hi".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn escapes_are_preserved_verbatim() {
    // `\n` stays two characters; the shell decides what it means later.
    assert_eq!(
        kinds(r#"info "a\nb""#),
        vec![
            TokenKind::Ident("info".to_string()),
            TokenKind::Str("a\\nb".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn escaped_quote_does_not_terminate_the_literal() {
    assert_eq!(
        kinds(r#"info "say \"hi\"""#),
        vec![
            TokenKind::Ident("info".to_string()),
            TokenKind::Str("say \"hi\"".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn newlines_and_semicolons_are_separators() {
    assert_eq!(
        kinds("g_status\ng_add;g_branch"),
        vec![
            TokenKind::Ident("g_status".to_string()),
            TokenKind::Newline,
            TokenKind::Ident("g_add".to_string()),
            TokenKind::Semi,
            TokenKind::Ident("g_branch".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comments_run_to_end_of_line() {
    assert_eq!(
        kinds("# a whole comment line\ng_status # trailing comment\n"),
        vec![
            TokenKind::Newline,
            TokenKind::Ident("g_status".to_string()),
            TokenKind::Newline,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn identifiers_may_contain_dashes_and_digits() {
    assert_eq!(
        kinds("my-helper_2"),
        vec![TokenKind::Ident("my-helper_2".to_string()), TokenKind::Eof]
    );
}

#[test]
fn unterminated_string_reports_line_and_column() {
    let sm = SourceMap::new("info \"oops".to_string());
    let err = lexer::lex(&sm).unwrap_err();
    assert!(err.message.contains("unterminated string literal"));
    assert_eq!(err.line, 1);
    assert_eq!(err.col, 6);
}

#[test]
fn unterminated_string_on_later_line() {
    let sm = SourceMap::new("g_status\ninfo \"no end".to_string());
    let err = lexer::lex(&sm).unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.col, 6);
}

#[test]
fn unexpected_character_is_a_lex_error() {
    let sm = SourceMap::new("info @".to_string());
    let err = lexer::lex(&sm).unwrap_err();
    assert!(err.message.contains('@'), "unexpected message: {}", err.message);
}

#[test]
fn single_dash_is_a_lex_error() {
    let sm = SourceMap::new("info -x".to_string());
    let err = lexer::lex(&sm).unwrap_err();
    assert!(err.message.contains('-'));
}

#[test]
fn bare_double_dash_is_a_lex_error() {
    let sm = SourceMap::new("block -- \"x\"".to_string());
    let err = lexer::lex(&sm).unwrap_err();
    assert!(err.message.contains("option name"));
}

#[test]
fn lexing_restarts_from_the_top_identically() {
    let src = "if g_check then\nblock --gitop \"git add -A\"\nfi\n";
    assert_eq!(lex_src(src), lex_src(src));
}

#[test]
fn stream_always_ends_in_eof() {
    let tokens = lex_src("");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

#[test]
fn token_spans_map_back_to_source_positions() {
    let src = "g_status\nblock --info \"x\"";
    let sm = SourceMap::new(src.to_string());
    let tokens = lexer::lex(&sm).unwrap();

    let block = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Block)
        .unwrap();
    assert_eq!(sm.line_col(block.span.start), (2, 1));
    assert_eq!(&src[block.span.start..block.span.end], "block");
}
