use std::fs;

use csui::ast::{BlockMode, Program, Stmt, StmtKind};
use csui::span::{SourceMap, Span};
use csui::{codegen, lexer, parser};

fn compile(src: &str) -> String {
    let sm = SourceMap::new(src.to_string());
    let tokens = lexer::lex(&sm).unwrap();
    let program = parser::parse(&tokens, &sm).unwrap();
    codegen::emit(&program).unwrap()
}

#[test]
fn header_sources_the_operation_library() {
    let out = compile("info \"hello\"");
    assert!(out.starts_with("#!/usr/bin/env bash\n"));
    assert!(out.contains(". \"${CSUI_LIB:-$HOME/.csui/lib}/struct\""));
}

#[test]
fn info_block_delegates_to_the_shell_side_block() {
    let out = compile("block --info \"echo hi\"");
    assert!(out.contains("block --info \"echo hi\"\n"));
    assert!(!out.contains("|| exit"));
}

#[test]
fn die_block_gets_an_abort_guard() {
    let out = compile("block --die \"git push\"");
    assert!(out.contains("block --die \"git push\" || exit $?\n"));
}

#[test]
fn atom_emits_description_then_command() {
    let out = compile("atom \"stage\" \"git add -A\"");
    assert!(out.contains("atom \"stage\" \"git add -A\"\n"));
}

#[test]
fn call_arguments_are_quoted_words() {
    let out = compile("r_upgrade sudo \"git pull\"");
    assert!(out.contains("r_upgrade \"sudo\" \"git pull\"\n"));
}

#[test]
fn embedded_quotes_are_escaped_again_on_emit() {
    let out = compile("info \"say \\\"hi\\\"\"");
    assert!(out.contains("info \"say \\\"hi\\\"\"\n"));
}

#[test]
fn if_else_codegen() {
    let out = compile("if g_check then\nblock --gitop \"git add -A\"\nelse\nwarn \"no repo\"\nfi");
    let expected = r#"
if g_check; then
  block --gitop "git add -A"
else
  warn "no repo"
fi
"#;
    assert!(out.contains(expected.trim_start()), "emitted:\n{}", out);
}

#[test]
fn nested_if_indents_further() {
    let out = compile(
        "if g_check then\nif u_confirm \"push?\" then\nblock --die \"git push\"\nfi\nfi",
    );
    assert!(out.contains("  if u_confirm \"push?\"; then\n"));
    assert!(out.contains("    block --die \"git push\" || exit $?\n"));
}

#[test]
fn command_with_raw_newline_is_refused() {
    let err = codegen::emit(&parse("block --info \"a\nb\"")).unwrap_err();
    assert!(err.construct.contains("block --info"));
    assert!(err.reason.contains("control character"));
}

#[test]
fn trailing_unpaired_backslash_is_refused() {
    // Cannot be produced by the lexer; guard the AST surface directly.
    let program = Program {
        statements: vec![Stmt {
            kind: StmtKind::Block {
                mode: BlockMode::Info,
                command: "broken\\".to_string(),
            },
            span: Span::new(0, 0),
        }],
    };
    let err = codegen::emit(&program).unwrap_err();
    assert!(err.reason.contains("unpaired backslash"));
}

#[test]
fn deploy_codegen_matches_snapshot() {
    let src = fs::read_to_string("tests/fixtures/deploy.csui").unwrap();
    let expected = fs::read_to_string("tests/fixtures/deploy.sh.expected").unwrap();
    assert_eq!(compile(&src).trim(), expected.trim());
}

#[test]
fn statement_order_is_preserved() {
    let out = compile("info \"one\"\ninfo \"two\"\ninfo \"three\"");
    let one = out.find("info \"one\"").unwrap();
    let two = out.find("info \"two\"").unwrap();
    let three = out.find("info \"three\"").unwrap();
    assert!(one < two && two < three);
}

fn parse(src: &str) -> Program {
    let sm = SourceMap::new(src.to_string());
    let tokens = lexer::lex(&sm).unwrap();
    parser::parse(&tokens, &sm).unwrap()
}
