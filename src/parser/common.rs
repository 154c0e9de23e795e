use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};
use crate::span::{SourceMap, Span};

pub(crate) struct Parser<'a> {
    pub tokens: &'a [Token],
    pub pos: usize,
    pub sm: &'a SourceMap,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], sm: &'a SourceMap) -> Self {
        Parser { tokens, pos: 0, sm }
    }

    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    pub fn peek_kind(&self) -> Option<&'a TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    pub fn advance(&mut self) -> Option<&'a Token> {
        let t = self.tokens.get(self.pos);
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    pub fn at_eof(&self) -> bool {
        matches!(self.peek_kind(), None | Some(TokenKind::Eof))
    }

    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::new(0, 0)
        }
    }

    pub fn current_span(&self) -> Span {
        match self.peek() {
            Some(t) => t.span,
            None => match self.tokens.last() {
                Some(last) => Span::new(last.span.end, last.span.end + 1),
                None => Span::new(0, 0),
            },
        }
    }

    pub fn error(&self, msg: impl Into<String>, span: Span) -> ParseError {
        let (line, col) = self.sm.line_col(span.start);
        ParseError {
            message: msg.into(),
            line,
            col,
            span,
        }
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        match self.peek() {
            Some(t) if t.kind == kind => {
                self.advance();
                Ok(())
            }
            Some(t) => Err(self.error(format!("expected {:?}, got {:?}", kind, t.kind), t.span)),
            None => Err(self.error(format!("expected {:?}, got EOF", kind), self.current_span())),
        }
    }

    pub fn match_kind(&mut self, kind: TokenKind) -> bool {
        if let Some(t) = self.peek() {
            if t.kind == kind {
                self.advance();
                return true;
            }
        }
        false
    }

    /// Newlines and semicolons both end a statement; runs of them are noise
    /// between statements.
    pub fn skip_separators(&mut self) {
        while matches!(self.peek_kind(), Some(TokenKind::Newline | TokenKind::Semi)) {
            self.advance();
        }
    }
}
