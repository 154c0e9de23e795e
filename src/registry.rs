use std::collections::BTreeMap;
use std::io::{self, BufRead};

use crate::bridge::{self, Outcome};
use crate::error::EvalError;
use crate::eval::ExecContext;
use crate::style;

/// Lookup surface the evaluator resolves call names against. Injected so a
/// run can be driven against a double without touching parser or AST.
pub trait Registry {
    /// Invoke `name` with ordered string arguments. Resolution is
    /// late-bound: an unknown name surfaces here as
    /// `EvalError::UnknownFunction`, never at parse time.
    fn call(
        &self,
        name: &str,
        args: &[String],
        cx: &mut ExecContext,
    ) -> Result<Outcome, EvalError>;

    /// All operation names with a one-line summary each, sorted by name.
    fn entries(&self) -> Vec<(String, String)>;
}

type Handler = fn(&[String], &mut ExecContext) -> Result<Outcome, EvalError>;

struct Builtin {
    summary: &'static str,
    run: Handler,
}

/// The fixed table of native operations. Built once at process start;
/// queried, never extended.
pub struct Builtins {
    table: BTreeMap<&'static str, Builtin>,
}

impl Builtins {
    pub fn standard() -> Self {
        let mut table = BTreeMap::new();
        let mut add = |name: &'static str, summary: &'static str, run: Handler| {
            table.insert(name, Builtin { summary, run });
        };

        add(
            "g_check",
            "true when the current directory is inside a git work tree",
            g_check,
        );
        add("g_status", "short-form git status", g_status);
        add("g_add", "stage the whole work tree", g_add);
        add("g_branch", "name of the current branch", g_branch);
        add("g_remote", "remote tracked by the current branch", g_remote);
        add("g_upstream", "upstream ref of the current branch", g_upstream);
        add("r_sudo", "require root privileges or abort", r_sudo);
        add("r_user", "refuse to run as root", r_user);
        add(
            "r_upgrade",
            "re-run a command under elevation (sudo or su)",
            r_upgrade,
        );
        add(
            "u_confirm",
            "ask a yes/no question, true only for y/yes",
            u_confirm,
        );
        add("info", "print an info-styled message", info);
        add("warn", "print a warn-styled message", warn);
        add("die", "print a failure message and abort the run", die);

        Builtins { table }
    }
}

impl Registry for Builtins {
    fn call(
        &self,
        name: &str,
        args: &[String],
        cx: &mut ExecContext,
    ) -> Result<Outcome, EvalError> {
        match self.table.get(name) {
            Some(builtin) => (builtin.run)(args, cx),
            None => Err(EvalError::UnknownFunction {
                name: name.to_string(),
                span: None,
            }),
        }
    }

    fn entries(&self) -> Vec<(String, String)> {
        self.table
            .iter()
            .map(|(name, builtin)| (name.to_string(), builtin.summary.to_string()))
            .collect()
    }
}

fn git_io(err: io::Error) -> EvalError {
    EvalError::io("failed to run git", err)
}

fn g_check(_args: &[String], _cx: &mut ExecContext) -> Result<Outcome, EvalError> {
    let out = bridge::run_git(&["rev-parse", "--is-inside-work-tree"]).map_err(git_io)?;
    // Boolean probe; callers only want the status.
    Ok(Outcome::from_status(out.status))
}

fn g_status(_args: &[String], _cx: &mut ExecContext) -> Result<Outcome, EvalError> {
    bridge::run_git(&["status", "--short"]).map_err(git_io)
}

fn g_add(_args: &[String], _cx: &mut ExecContext) -> Result<Outcome, EvalError> {
    bridge::run_git(&["add", "-A"]).map_err(git_io)
}

fn g_branch(_args: &[String], _cx: &mut ExecContext) -> Result<Outcome, EvalError> {
    bridge::run_git(&["rev-parse", "--abbrev-ref", "HEAD"]).map_err(git_io)
}

fn g_remote(_args: &[String], _cx: &mut ExecContext) -> Result<Outcome, EvalError> {
    let branch = bridge::run_git(&["rev-parse", "--abbrev-ref", "HEAD"]).map_err(git_io)?;
    if !branch.success() {
        return Ok(branch);
    }
    let key = format!("branch.{}.remote", branch.stdout.trim());
    bridge::run_git(&["config", "--get", &key]).map_err(git_io)
}

fn g_upstream(_args: &[String], _cx: &mut ExecContext) -> Result<Outcome, EvalError> {
    bridge::run_git(&["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{upstream}"])
        .map_err(git_io)
}

fn effective_uid() -> Result<String, EvalError> {
    let out = bridge::run_program("id", ["-u"])
        .map_err(|e| EvalError::io("failed to check caller privileges", e))?;
    Ok(out.stdout.trim().to_string())
}

fn r_sudo(_args: &[String], _cx: &mut ExecContext) -> Result<Outcome, EvalError> {
    if effective_uid()? == "0" {
        Ok(Outcome::from_status(0))
    } else {
        style::print_fail("root privileges required");
        Err(EvalError::abort(1, "r_sudo: root privileges required"))
    }
}

fn r_user(_args: &[String], _cx: &mut ExecContext) -> Result<Outcome, EvalError> {
    if effective_uid()? != "0" {
        Ok(Outcome::from_status(0))
    } else {
        style::print_fail("refusing to run as root");
        Err(EvalError::abort(1, "r_user: refusing to run as root"))
    }
}

fn r_upgrade(args: &[String], _cx: &mut ExecContext) -> Result<Outcome, EvalError> {
    let Some((mode, command)) = args.split_first() else {
        style::print_fail("r_upgrade: missing elevation mode");
        return Err(EvalError::abort(1, "r_upgrade: missing elevation mode"));
    };
    if command.is_empty() {
        style::print_fail("r_upgrade: missing command");
        return Err(EvalError::abort(1, "r_upgrade: missing command"));
    }

    let run = |err_context: &str, result: io::Result<Outcome>| {
        result.map_err(|e| EvalError::io(err_context.to_string(), e))
    };
    match mode.as_str() {
        "sudo" => run("failed to run sudo", bridge::run_program("sudo", command)),
        "su" => run(
            "failed to run su",
            bridge::run_program("su", ["-c", command.join(" ").as_str()]),
        ),
        other => {
            let detail = format!("r_upgrade: unknown elevation mode '{}'", other);
            style::print_fail(&detail);
            Err(EvalError::abort(1, detail))
        }
    }
}

fn u_confirm(args: &[String], _cx: &mut ExecContext) -> Result<Outcome, EvalError> {
    let message = args.join(" ");
    style::prompt(&message).map_err(|e| EvalError::io("failed to write prompt", e))?;

    let mut answer = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| EvalError::io("failed to read confirmation", e))?;
    if read == 0 {
        // EOF counts as a refusal.
        return Ok(Outcome::from_status(1));
    }

    let answer = answer.trim();
    let yes = answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes");
    Ok(Outcome::from_status(if yes { 0 } else { 1 }))
}

fn info(args: &[String], _cx: &mut ExecContext) -> Result<Outcome, EvalError> {
    style::print_info(&args.join(" "));
    Ok(Outcome::from_status(0))
}

fn warn(args: &[String], _cx: &mut ExecContext) -> Result<Outcome, EvalError> {
    style::print_warn(&args.join(" "));
    Ok(Outcome::from_status(0))
}

fn die(args: &[String], _cx: &mut ExecContext) -> Result<Outcome, EvalError> {
    let message = args.join(" ");
    style::print_fail(&message);
    Err(EvalError::abort(1, format!("die: {}", message)))
}
