use csui::codegen;
use csui::error::EvalError;
use csui::eval::{Evaluator, ExecContext};
use csui::lexer;
use csui::parser;
use csui::registry::{Builtins, Registry};
use csui::span::SourceMap;
use std::fmt;
use std::process;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

struct Config {
    filename: Option<String>,
    debug: bool,
    mode: Mode,
    out_path: Option<String>,
    chmod_x: bool,
}

enum Mode {
    Run,
    EmitSh,
    ListFunctions,
}

struct CliError {
    code: i32,
    msg: String,
    show_usage: bool,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg)
    }
}

impl CliError {
    fn usage(msg: impl Into<String>) -> Self {
        Self {
            code: 1,
            msg: msg.into(),
            show_usage: true,
        }
    }

    fn io(msg: impl Into<String>) -> Self {
        Self {
            code: 1,
            msg: msg.into(),
            show_usage: false,
        }
    }

    fn compile(msg: impl Into<String>) -> Self {
        Self {
            code: 2,
            msg: msg.into(),
            show_usage: false,
        }
    }
}

fn usage_text() -> &'static str {
    "Usage: csui [flags] <script.csui>\n\
     Flags:\n\
     \x20 --debug            Trace each statement to stderr while running\n\
     \x20 --emit-sh          Transpile to a bash script instead of running\n\
     \x20 -o, --out <file>   Write the emitted script to a file (auto-chmod +x)\n\
     \x20 --no-chmod-x       Do not set executable bit on output file\n\
     \x20 --chmod-x          Set executable bit on output file (default)\n\
     \x20 --list-functions   List the built-in operations and exit\n\
     \x20 -h, --help         Print help information"
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let config = match parse_args(args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e.msg);
            if e.show_usage {
                eprintln!("{}", usage_text());
            }
            process::exit(e.code);
        }
    };

    let level = if config.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(config) {
        eprintln!("{}", e.msg);
        if e.show_usage {
            eprintln!("{}", usage_text());
        }
        process::exit(e.code);
    }
}

fn parse_args(args: Vec<String>) -> Result<Config, CliError> {
    let mut filename: Option<String> = None;
    let mut debug = false;
    let mut emit_sh = false;
    let mut list_functions = false;
    let mut out_path: Option<String> = None;
    let mut chmod_x_flag: Option<bool> = None;

    let mut i = 1;
    while i < args.len() {
        let arg = &args[i];
        if arg == "-h" || arg == "--help" {
            println!("{}", usage_text());
            process::exit(0);
        } else if arg == "--debug" {
            debug = true;
            i += 1;
        } else if arg == "--emit-sh" {
            emit_sh = true;
            i += 1;
        } else if arg == "--list-functions" {
            list_functions = true;
            i += 1;
        } else if arg == "-o" || arg == "--out" {
            if i + 1 < args.len() {
                out_path = Some(args[i + 1].clone());
                i += 2;
            } else {
                return Err(CliError::usage(format!("error: {} requires an argument", arg)));
            }
        } else if arg == "--no-chmod-x" {
            if let Some(true) = chmod_x_flag {
                return Err(CliError::usage(
                    "error: --no-chmod-x cannot be used with --chmod-x",
                ));
            }
            chmod_x_flag = Some(false);
            i += 1;
        } else if arg == "--chmod-x" {
            if let Some(false) = chmod_x_flag {
                return Err(CliError::usage(
                    "error: --no-chmod-x cannot be used with --chmod-x",
                ));
            }
            chmod_x_flag = Some(true);
            i += 1;
        } else if arg.starts_with("-") {
            return Err(CliError::usage(format!("error: Unexpected argument: {}", arg)));
        } else {
            if filename.is_some() {
                return Err(CliError::usage(format!(
                    "error: Unexpected argument: {} (script already specified)",
                    arg
                )));
            }
            filename = Some(arg.clone());
            i += 1;
        }
    }

    if emit_sh && list_functions {
        return Err(CliError::usage(
            "error: multiple action flags specified (choose only one of: --emit-sh, --list-functions)",
        ));
    }
    if out_path.is_some() && !emit_sh {
        return Err(CliError::usage("error: --out requires --emit-sh"));
    }
    if chmod_x_flag.is_some() && out_path.is_none() {
        return Err(CliError::usage("error: --no-chmod-x/--chmod-x require --out"));
    }
    if filename.is_none() && !list_functions {
        return Err(CliError::usage("error: missing input file"));
    }

    let mode = if emit_sh {
        Mode::EmitSh
    } else if list_functions {
        Mode::ListFunctions
    } else {
        Mode::Run
    };

    Ok(Config {
        filename,
        debug,
        mode,
        out_path,
        chmod_x: chmod_x_flag.unwrap_or(true),
    })
}

fn run(config: Config) -> Result<(), CliError> {
    let registry = Builtins::standard();

    if let Mode::ListFunctions = config.mode {
        for (name, summary) in registry.entries() {
            println!("{:<12} {}", name, summary);
        }
        return Ok(());
    }

    let filename = match config.filename {
        Some(f) => f,
        None => return Err(CliError::usage("error: missing input file")),
    };

    let src = std::fs::read_to_string(&filename)
        .map_err(|e| CliError::io(format!("failed to read {}: {}", filename, e)))?;
    let sm = SourceMap::new(src);

    let tokens = lexer::lex(&sm).map_err(|e| {
        CliError::compile(sm.format_diagnostic(
            &filename,
            &format!("lex error: {}", e.message),
            e.span,
        ))
    })?;
    let program = parser::parse(&tokens, &sm).map_err(|e| {
        CliError::compile(sm.format_diagnostic(
            &filename,
            &format!("parse error: {}", e.message),
            e.span,
        ))
    })?;

    if let Mode::EmitSh = config.mode {
        let script = codegen::emit(&program).map_err(|e| CliError::compile(e.to_string()))?;

        if let Some(out_path) = config.out_path {
            std::fs::write(&out_path, script)
                .map_err(|e| CliError::io(format!("failed to write to {}: {}", out_path, e)))?;

            #[cfg(unix)]
            {
                if config.chmod_x {
                    if let Ok(metadata) = std::fs::metadata(&out_path) {
                        let mut perms = metadata.permissions();
                        perms.set_mode(perms.mode() | 0o111);
                        let _ = std::fs::set_permissions(&out_path, perms);
                    }
                }
            }
        } else {
            print!("{}", script);
        }
        return Ok(());
    }

    let mut cx = ExecContext::new(config.debug);
    let evaluator = Evaluator::new(&registry);
    evaluator
        .run(&program, &mut cx)
        .map_err(|e| report_eval_error(e, &filename, &sm))
}

fn report_eval_error(err: EvalError, filename: &str, sm: &SourceMap) -> CliError {
    let code = match &err {
        EvalError::UnknownFunction { .. } => 3,
        EvalError::Abort { .. } => 4,
        EvalError::Io { .. } => 1,
    };
    let msg = match err.span() {
        Some(span) => sm.format_diagnostic(filename, &err.to_string(), span),
        None => format!("csui: {}", err),
    };
    CliError {
        code,
        msg,
        show_usage: false,
    }
}
