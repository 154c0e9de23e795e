use crate::span::Span;

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

/// Output styling and failure policy of a `block` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockMode {
    Info,
    Warn,
    Gitop,
    Die,
    Quiet,
}

impl BlockMode {
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "--info" => Some(BlockMode::Info),
            "--warn" => Some(BlockMode::Warn),
            "--gitop" => Some(BlockMode::Gitop),
            "--die" => Some(BlockMode::Die),
            "--quiet" => Some(BlockMode::Quiet),
            _ => None,
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            BlockMode::Info => "--info",
            BlockMode::Warn => "--warn",
            BlockMode::Gitop => "--gitop",
            BlockMode::Die => "--die",
            BlockMode::Quiet => "--quiet",
        }
    }
}

/// An argument position: a quoted literal or a bare word.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Str(String),
    Ident(String),
}

impl Expr {
    pub fn as_str(&self) -> &str {
        match self {
            Expr::Str(s) | Expr::Ident(s) => s,
        }
    }
}

/// A named operation with ordered arguments. The name is resolved against
/// the registry at evaluation time, never at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Block {
        mode: BlockMode,
        command: String,
    },
    Atom {
        description: String,
        command: String,
    },
    If {
        cond: Call,
        then_body: Vec<Stmt>,
        else_body: Option<Vec<Stmt>>,
    },
    Call(Call),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            StmtKind::Block { .. } => "block",
            StmtKind::Atom { .. } => "atom",
            StmtKind::If { .. } => "if",
            StmtKind::Call(_) => "call",
        }
    }
}
