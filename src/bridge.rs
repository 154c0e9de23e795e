use std::env;
use std::ffi::OsStr;
use std::io;
use std::process::Command;

/// What came back from one synchronous child process: its exit status and
/// whatever it wrote while we waited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl Outcome {
    pub fn from_status(status: i32) -> Self {
        Outcome {
            status,
            ..Default::default()
        }
    }

    pub fn success(&self) -> bool {
        self.status == 0
    }
}

impl From<std::process::Output> for Outcome {
    fn from(output: std::process::Output) -> Self {
        Outcome {
            status: output.status.code().unwrap_or(1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Resolve the host shell: `CSUI_SHELL` wins, then `bash` if it is on the
/// PATH, then plain `sh`.
pub fn shell_program() -> String {
    if let Ok(shell) = env::var("CSUI_SHELL") {
        if !shell.is_empty() {
            return shell;
        }
    }
    if which::which("bash").is_ok() {
        "bash".to_string()
    } else {
        "sh".to_string()
    }
}

/// Run one command line through the host shell, blocking until it exits.
/// Commands are spawned one at a time; there is no pooling or reuse.
pub fn run_shell(command: &str) -> io::Result<Outcome> {
    let output = Command::new(shell_program())
        .arg("-c")
        .arg(command)
        .output()?;
    Ok(output.into())
}

/// Run a program directly, without shell interpretation of its arguments.
pub fn run_program<I, S>(program: &str, args: I) -> io::Result<Outcome>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = Command::new(program).args(args).output()?;
    Ok(output.into())
}

pub fn run_git(args: &[&str]) -> io::Result<Outcome> {
    run_program("git", args)
}
