use crate::error::LexError;
use crate::span::{SourceMap, Span};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Block,
    Atom,
    If,
    Then,
    Else,
    Fi,
    Ident(String),
    Str(String),
    Flag(String),
    Semi,
    Newline,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

struct Lexer<'a> {
    src: &'a str,
    sm: &'a SourceMap,
    pos: usize,
}

/// Tokenize a whole source file. The stream always ends in an `Eof` token.
/// The only failures are malformed tokens: an unterminated string literal,
/// a bare `-` where nothing in the language uses one, or a character the
/// language does not know.
pub fn lex(sm: &SourceMap) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer {
        src: sm.src(),
        sm,
        pos: 0,
    };
    let mut tokens = Vec::new();

    while let Some(c) = lexer.current() {
        let start = lexer.pos;
        match c {
            ' ' | '\t' | '\r' => {
                lexer.bump(c);
            }
            '\n' => {
                lexer.bump(c);
                tokens.push(Token {
                    kind: TokenKind::Newline,
                    span: Span::new(start, lexer.pos),
                });
            }
            '#' => {
                // Comment runs to end of line; the newline itself still
                // separates statements.
                while let Some(c) = lexer.current() {
                    if c == '\n' {
                        break;
                    }
                    lexer.bump(c);
                }
            }
            ';' => {
                lexer.bump(c);
                tokens.push(Token {
                    kind: TokenKind::Semi,
                    span: Span::new(start, lexer.pos),
                });
            }
            '"' => {
                let value = lexer.read_string(start)?;
                tokens.push(Token {
                    kind: TokenKind::Str(value),
                    span: Span::new(start, lexer.pos),
                });
            }
            '-' => {
                if lexer.peek(1) == Some('-') {
                    lexer.bump('-');
                    lexer.bump('-');
                    let name = lexer.read_ident();
                    if name.is_empty() {
                        return Err(lexer.fail("expected option name after '--'", start));
                    }
                    tokens.push(Token {
                        kind: TokenKind::Flag(format!("--{}", name)),
                        span: Span::new(start, lexer.pos),
                    });
                } else {
                    return Err(lexer.fail("unexpected character '-'", start));
                }
            }
            _ if c.is_ascii_alphabetic() || c == '_' => {
                let ident = lexer.read_ident();
                let kind = match ident.to_ascii_lowercase().as_str() {
                    "block" => TokenKind::Block,
                    "atom" => TokenKind::Atom,
                    "if" => TokenKind::If,
                    "then" => TokenKind::Then,
                    "else" => TokenKind::Else,
                    "fi" => TokenKind::Fi,
                    _ => TokenKind::Ident(ident),
                };
                tokens.push(Token {
                    kind,
                    span: Span::new(start, lexer.pos),
                });
            }
            _ => {
                return Err(lexer.fail(format!("unexpected character '{}'", c), start));
            }
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::new(lexer.pos, lexer.pos),
    });
    Ok(tokens)
}

impl<'a> Lexer<'a> {
    fn current(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    /// Read a double-quoted literal. Shell-style escapes are preserved
    /// verbatim so they reach the host shell untouched; only `\"` is
    /// collapsed, to keep an embedded quote from terminating the literal.
    fn read_string(&mut self, start: usize) -> Result<String, LexError> {
        self.bump('"');
        let mut value = String::new();

        loop {
            let Some(c) = self.current() else {
                return Err(self.fail("unterminated string literal", start));
            };
            match c {
                '"' => {
                    self.bump(c);
                    return Ok(value);
                }
                '\\' => {
                    self.bump(c);
                    let Some(next) = self.current() else {
                        return Err(self.fail("unterminated string literal", start));
                    };
                    if next != '"' {
                        value.push('\\');
                    }
                    value.push(next);
                    self.bump(next);
                }
                _ => {
                    value.push(c);
                    self.bump(c);
                }
            }
        }
    }

    fn read_ident(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.current() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                self.bump(c);
            } else {
                break;
            }
        }
        self.src[start..self.pos].to_string()
    }

    fn fail(&self, message: impl Into<String>, start: usize) -> LexError {
        let (line, col) = self.sm.line_col(start);
        LexError {
            message: message.into(),
            line,
            col,
            span: Span::new(start, self.pos.max(start + 1)),
        }
    }
}
