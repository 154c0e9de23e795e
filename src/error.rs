use crate::span::Span;
use thiserror::Error;

/// Malformed token in the source text. Fatal for the run; nothing executes.
#[derive(Debug, Clone, Error)]
#[error("lex error: {message} at line {line}, column {col}")]
pub struct LexError {
    pub message: String,
    pub line: usize,
    pub col: usize,
    pub span: Span,
}

/// Structural grammar violation. Fatal for the run; nothing executes.
#[derive(Debug, Clone, Error)]
#[error("parse error: {message} at line {line}, column {col}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub col: usize,
    pub span: Span,
}

/// Failures surfaced while walking the tree. `UnknownFunction` and `Abort`
/// terminate the run cleanly; milder command failures are absorbed into the
/// execution context's last exit status and never reach this type.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("unknown function '{name}'")]
    UnknownFunction { name: String, span: Option<Span> },

    #[error("{detail}")]
    Abort {
        status: i32,
        detail: String,
        span: Option<Span>,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl EvalError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        EvalError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn abort(status: i32, detail: impl Into<String>) -> Self {
        EvalError::Abort {
            status,
            detail: detail.into(),
            span: None,
        }
    }

    /// Attach a source position if the error does not carry one yet.
    pub fn at(mut self, at: Span) -> Self {
        match &mut self {
            EvalError::UnknownFunction { span, .. } | EvalError::Abort { span, .. } => {
                if span.is_none() {
                    *span = Some(at);
                }
            }
            EvalError::Io { .. } => {}
        }
        self
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            EvalError::UnknownFunction { span, .. } | EvalError::Abort { span, .. } => *span,
            EvalError::Io { .. } => None,
        }
    }
}

/// A construct the shell backend cannot represent. The transpiler refuses
/// rather than emitting a script that drops or mangles the statement.
#[derive(Debug, Clone, Error)]
#[error("cannot transpile {construct}: {reason}")]
pub struct TranspileError {
    pub construct: String,
    pub reason: String,
}

impl TranspileError {
    pub fn new(construct: impl Into<String>, reason: impl Into<String>) -> Self {
        TranspileError {
            construct: construct.into(),
            reason: reason.into(),
        }
    }
}
