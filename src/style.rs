use std::io::{self, Write};

const CYAN: &str = "\x1b[36m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const MAGENTA: &str = "\x1b[35m";
const RESET: &str = "\x1b[0m";

pub fn info(msg: &str) -> String {
    format!("{CYAN}[ info ]{RESET} {msg}")
}

pub fn warn(msg: &str) -> String {
    format!("{YELLOW}[ warn ]{RESET} {msg}")
}

pub fn fail(msg: &str) -> String {
    format!("{RED}[ fail ]{RESET} {msg}")
}

pub fn gitop(msg: &str) -> String {
    format!("{MAGENTA}[ gitop ]{RESET} {msg}")
}

pub fn print_info(msg: &str) {
    println!("{}", info(msg));
}

pub fn print_warn(msg: &str) {
    eprintln!("{}", warn(msg));
}

pub fn print_fail(msg: &str) {
    eprintln!("{}", fail(msg));
}

pub fn print_gitop(msg: &str) {
    println!("{}", gitop(msg));
}

/// Confirmation prompt: no trailing newline, flushed so the question is
/// visible before we block on stdin.
pub fn prompt(msg: &str) -> io::Result<()> {
    print!("{} [y/N] ", msg);
    io::stdout().flush()
}
