use crate::ast::{BlockMode, Call, Program, Stmt, StmtKind};
use crate::error::TranspileError;

/// Where the emitted script finds the shell-side operation library. Same
/// layout the interactive bridge uses.
const LIB_PROLOGUE: &str = ". \"${CSUI_LIB:-$HOME/.csui/lib}/struct\"";

/// Lower a program into one bash script, behaviorally equivalent to
/// interpreting it: same ordering, same die-mode abort policy, same
/// branching, delegating to the shell-side operation library by name.
/// Refuses with `TranspileError` rather than ever dropping a statement.
pub fn emit(program: &Program) -> Result<String, TranspileError> {
    let mut out = String::new();
    out.push_str("#!/usr/bin/env bash\n");
    out.push_str("# generated by csui --emit-sh\n\n");
    out.push_str(LIB_PROLOGUE);
    out.push_str("\n\n");

    for stmt in &program.statements {
        emit_stmt(stmt, &mut out, 0)?;
    }
    Ok(out)
}

fn emit_stmt(stmt: &Stmt, out: &mut String, indent: usize) -> Result<(), TranspileError> {
    let pad = " ".repeat(indent);

    match &stmt.kind {
        StmtKind::Block { mode, command } => {
            let word = sh_word(command, &format!("block {} command", mode.flag()))?;
            out.push_str(&pad);
            out.push_str("block ");
            out.push_str(mode.flag());
            out.push(' ');
            out.push_str(&word);
            if *mode == BlockMode::Die {
                // Interpreting a die block stops the whole run on failure;
                // the script must do the same.
                out.push_str(" || exit $?");
            }
            out.push('\n');
        }
        StmtKind::Atom {
            description,
            command,
        } => {
            let desc = sh_word(description, "atom description")?;
            let cmd = sh_word(command, "atom command")?;
            out.push_str(&format!("{pad}atom {desc} {cmd}\n"));
        }
        StmtKind::Call(call) => {
            out.push_str(&pad);
            out.push_str(&emit_call(call)?);
            out.push('\n');
        }
        StmtKind::If {
            cond,
            then_body,
            else_body,
        } => {
            out.push_str(&format!("{pad}if {}; then\n", emit_call(cond)?));
            for stmt in then_body {
                emit_stmt(stmt, out, indent + 2)?;
            }
            if let Some(body) = else_body {
                out.push_str(&format!("{pad}else\n"));
                for stmt in body {
                    emit_stmt(stmt, out, indent + 2)?;
                }
            }
            out.push_str(&format!("{pad}fi\n"));
        }
    }
    Ok(())
}

fn emit_call(call: &Call) -> Result<String, TranspileError> {
    let mut line = call.name.clone();
    for arg in &call.args {
        line.push(' ');
        line.push_str(&sh_word(
            arg.as_str(),
            &format!("argument of '{}'", call.name),
        )?);
    }
    Ok(line)
}

/// Wrap a value as one double-quoted bash word. `$`, backtick and
/// backslash escapes stay live, exactly as they are when the evaluator
/// hands the same string to `bash -c`; only the quote character itself
/// needs protecting. Values that cannot live inside a quoted word on a
/// single line are refused.
fn sh_word(value: &str, construct: &str) -> Result<String, TranspileError> {
    if let Some(c) = value
        .chars()
        .find(|&c| c == '\n' || c == '\r' || (c.is_control() && c != '\t'))
    {
        return Err(TranspileError::new(
            construct,
            format!("contains a control character {:?}", c),
        ));
    }
    let trailing_backslashes = value.chars().rev().take_while(|&c| c == '\\').count();
    if trailing_backslashes % 2 == 1 {
        return Err(TranspileError::new(construct, "ends with an unpaired backslash"));
    }

    let mut word = String::with_capacity(value.len() + 2);
    word.push('"');
    for c in value.chars() {
        if c == '"' {
            word.push('\\');
        }
        word.push(c);
    }
    word.push('"');
    Ok(word)
}
