use super::common::Parser;
use crate::ast::{BlockMode, Call, Expr, Stmt, StmtKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl<'a> Parser<'a> {
    pub fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        match self.peek_kind() {
            Some(TokenKind::Block) => self.parse_block_stmt(),
            Some(TokenKind::Atom) => self.parse_atom_stmt(),
            Some(TokenKind::If) => self.parse_if_stmt(),
            Some(TokenKind::Ident(_)) => {
                let call = self.parse_call()?;
                let span = call.span;
                Ok(Stmt {
                    kind: StmtKind::Call(call),
                    span,
                })
            }
            Some(kind) => Err(self.error(format!("expected statement, got {:?}", kind), start)),
            None => Err(self.error("expected statement, got EOF", start)),
        }
    }

    fn parse_block_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        self.advance(); // block

        let mode = match self.peek_kind() {
            Some(TokenKind::Flag(flag)) => match BlockMode::from_flag(flag) {
                Some(mode) => {
                    self.advance();
                    mode
                }
                None => {
                    return Err(
                        self.error(format!("unknown block mode '{}'", flag), self.current_span())
                    );
                }
            },
            _ => {
                return Err(self.error("expected block mode flag after 'block'", self.current_span()));
            }
        };

        let command = self.expect_string("expected command string after block mode")?;
        let span = start.merge(self.previous_span());
        Ok(Stmt {
            kind: StmtKind::Block { mode, command },
            span,
        })
    }

    fn parse_atom_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        self.advance(); // atom

        let description = self.expect_string("expected description string after 'atom'")?;
        let command = self.expect_string("expected command string after atom description")?;
        let span = start.merge(self.previous_span());
        Ok(Stmt {
            kind: StmtKind::Atom {
                description,
                command,
            },
            span,
        })
    }

    fn parse_if_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        self.advance(); // if

        let cond = match self.peek_kind() {
            Some(TokenKind::Ident(_)) => self.parse_call()?,
            _ => {
                return Err(self.error("expected condition after 'if'", self.current_span()));
            }
        };

        // `if cond; then` is accepted alongside `if cond then`.
        self.match_kind(TokenKind::Semi);
        while self.match_kind(TokenKind::Newline) {}
        self.expect(TokenKind::Then)?;
        self.skip_separators();

        let mut then_body = Vec::new();
        loop {
            if self.at_eof() {
                return Err(self.error("unterminated if", start));
            }
            if matches!(self.peek_kind(), Some(TokenKind::Else | TokenKind::Fi)) {
                break;
            }
            then_body.push(self.parse_stmt()?);
            self.skip_separators();
        }
        if then_body.is_empty() {
            return Err(self.error("if statement has an empty then body", start));
        }

        let else_body = if self.match_kind(TokenKind::Else) {
            self.skip_separators();
            let mut body = Vec::new();
            loop {
                if self.at_eof() {
                    return Err(self.error("unterminated if", start));
                }
                if matches!(self.peek_kind(), Some(TokenKind::Fi)) {
                    break;
                }
                body.push(self.parse_stmt()?);
                self.skip_separators();
            }
            Some(body)
        } else {
            None
        };

        self.expect(TokenKind::Fi)?;
        let span = start.merge(self.previous_span());
        Ok(Stmt {
            kind: StmtKind::If {
                cond,
                then_body,
                else_body,
            },
            span,
        })
    }

    /// bare_call := identifier (string_literal | identifier)*
    ///
    /// Keywords terminate the argument list on their own since they lex to
    /// distinct token kinds, so `if g_check then` never swallows `then`.
    pub(crate) fn parse_call(&mut self) -> Result<Call, ParseError> {
        let start = self.current_span();
        let name = match self.peek_kind() {
            Some(TokenKind::Ident(name)) => {
                let name = name.clone();
                self.advance();
                name
            }
            _ => {
                return Err(self.error("expected function name", self.current_span()));
            }
        };

        let mut args = Vec::new();
        loop {
            match self.peek_kind() {
                Some(TokenKind::Str(s)) => {
                    args.push(Expr::Str(s.clone()));
                    self.advance();
                }
                Some(TokenKind::Ident(s)) => {
                    args.push(Expr::Ident(s.clone()));
                    self.advance();
                }
                _ => break,
            }
        }

        let span = start.merge(self.previous_span());
        Ok(Call { name, args, span })
    }

    fn expect_string(&mut self, msg: &str) -> Result<String, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::Str(s)) => {
                let s = s.clone();
                self.advance();
                Ok(s)
            }
            _ => Err(self.error(msg, self.current_span())),
        }
    }
}
