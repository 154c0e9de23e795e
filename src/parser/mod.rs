mod common;
mod stmt;

use self::common::Parser;
use crate::ast::Program;
use crate::error::ParseError;
use crate::lexer::Token;
use crate::span::SourceMap;

/// Recursive descent over the token stream, one token of lookahead.
/// Fail-fast: the first structural error aborts the whole parse, so a
/// returned `Program` is always a valid tree.
pub fn parse(tokens: &[Token], sm: &SourceMap) -> Result<Program, ParseError> {
    let mut parser = Parser::new(tokens, sm);
    let mut statements = Vec::new();

    parser.skip_separators();
    while !parser.at_eof() {
        statements.push(parser.parse_stmt()?);
        parser.skip_separators();
    }

    Ok(Program { statements })
}
