use tracing::debug;

use crate::ast::{BlockMode, Call, Program, Stmt, StmtKind};
use crate::bridge::{self, Outcome};
use crate::error::EvalError;
use crate::registry::Registry;
use crate::style;

/// Per-run state threaded explicitly through evaluation. Created once per
/// run, discarded at exit; there is exactly one writer.
#[derive(Debug, Clone)]
pub struct ExecContext {
    pub debug: bool,
    pub last_status: i32,
}

impl ExecContext {
    pub fn new(debug: bool) -> Self {
        ExecContext {
            debug,
            last_status: 0,
        }
    }
}

/// Tree-walking backend: strictly sequential, depth-first, left-to-right.
/// Statement N's side effects are fully visible before N+1 starts.
pub struct Evaluator<'a> {
    registry: &'a dyn Registry,
}

impl<'a> Evaluator<'a> {
    pub fn new(registry: &'a dyn Registry) -> Self {
        Evaluator { registry }
    }

    pub fn run(&self, program: &Program, cx: &mut ExecContext) -> Result<(), EvalError> {
        for stmt in &program.statements {
            self.eval_stmt(stmt, cx)?;
        }
        Ok(())
    }

    fn eval_stmt(&self, stmt: &Stmt, cx: &mut ExecContext) -> Result<(), EvalError> {
        if cx.debug {
            debug!(kind = stmt.kind_name(), "evaluating statement");
        }
        let result = match &stmt.kind {
            StmtKind::Block { mode, command } => self.eval_block(*mode, command, cx),
            StmtKind::Atom {
                description,
                command,
            } => {
                // The description always goes out first, whatever happens
                // to the command afterwards.
                style::print_info(description);
                self.eval_block(BlockMode::Info, command, cx)
            }
            StmtKind::If {
                cond,
                then_body,
                else_body,
            } => self.eval_if(cond, then_body, else_body.as_deref(), cx),
            StmtKind::Call(call) => {
                let out = self.invoke(call, cx)?;
                flush_outcome(&out);
                Ok(())
            }
        };
        let result = result.map_err(|e| e.at(stmt.span));
        if cx.debug {
            debug!(
                kind = stmt.kind_name(),
                status = cx.last_status,
                "statement finished"
            );
        }
        result
    }

    fn eval_block(
        &self,
        mode: BlockMode,
        command: &str,
        cx: &mut ExecContext,
    ) -> Result<(), EvalError> {
        match mode {
            BlockMode::Info => style::print_info(command),
            BlockMode::Warn => style::print_warn(command),
            BlockMode::Gitop => style::print_gitop(command),
            BlockMode::Die => style::print_fail(command),
            BlockMode::Quiet => {}
        }
        if cx.debug {
            debug!(command, "running shell command");
        }
        let out = bridge::run_shell(command)
            .map_err(|e| EvalError::io(format!("failed to run '{}'", command), e))?;
        cx.last_status = out.status;
        if mode != BlockMode::Quiet {
            flush_outcome(&out);
        }
        if mode == BlockMode::Die && !out.success() {
            return Err(EvalError::abort(
                out.status,
                format!("command '{}' exited with status {}", command, out.status),
            ));
        }
        Ok(())
    }

    fn eval_if(
        &self,
        cond: &Call,
        then_body: &[Stmt],
        else_body: Option<&[Stmt]>,
        cx: &mut ExecContext,
    ) -> Result<(), EvalError> {
        // Condition calls are queries: truthy iff status zero, captured
        // output swallowed rather than forwarded.
        let out = self.invoke(cond, cx)?;
        let truthy = out.success();
        if cx.debug {
            debug!(cond = %cond.name, truthy, "if condition resolved");
        }
        if truthy {
            for stmt in then_body {
                self.eval_stmt(stmt, cx)?;
            }
        } else if let Some(body) = else_body {
            for stmt in body {
                self.eval_stmt(stmt, cx)?;
            }
        }
        Ok(())
    }

    fn invoke(&self, call: &Call, cx: &mut ExecContext) -> Result<Outcome, EvalError> {
        let args: Vec<String> = call.args.iter().map(|a| a.as_str().to_string()).collect();
        if cx.debug {
            debug!(name = %call.name, ?args, "resolving builtin");
        }
        let out = self
            .registry
            .call(&call.name, &args, cx)
            .map_err(|e| e.at(call.span))?;
        cx.last_status = out.status;
        Ok(out)
    }
}

/// Forward a child's captured output onto our own streams once it is done.
fn flush_outcome(out: &Outcome) {
    let stdout = out.stdout.trim();
    if !stdout.is_empty() {
        println!("{}", stdout);
    }
    let stderr = out.stderr.trim();
    if !stderr.is_empty() {
        eprintln!("{}", stderr);
    }
}
