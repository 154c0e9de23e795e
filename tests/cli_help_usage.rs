use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_prints_usage_and_exits_0() {
    let mut cmd = Command::cargo_bin("csui").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: csui"));
}

#[test]
fn short_help_prints_usage_and_exits_0() {
    let mut cmd = Command::cargo_bin("csui").unwrap();
    cmd.arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: csui"));
}

#[test]
fn missing_input_file_prints_usage_once_exit_1() {
    let mut cmd = Command::cargo_bin("csui").unwrap();
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: missing input file"))
        .stderr(predicate::str::contains("Usage: csui").count(1));
}

#[test]
fn unknown_flag_prints_error_and_usage_exit_1() {
    let mut cmd = Command::cargo_bin("csui").unwrap();
    cmd.arg("--nope")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: Unexpected argument: --nope"))
        .stderr(predicate::str::contains("Usage: csui").count(1));
}

#[test]
fn out_without_emit_sh_is_a_usage_error() {
    let mut cmd = Command::cargo_bin("csui").unwrap();
    cmd.arg("-o")
        .arg("x.sh")
        .arg("script.csui")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--out requires --emit-sh"));
}

#[test]
fn out_missing_value_is_a_usage_error() {
    let mut cmd = Command::cargo_bin("csui").unwrap();
    cmd.arg("script.csui")
        .arg("-o")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("requires an argument"));
}

#[test]
fn conflicting_action_flags_are_rejected() {
    let mut cmd = Command::cargo_bin("csui").unwrap();
    cmd.arg("--emit-sh")
        .arg("--list-functions")
        .arg("script.csui")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("choose only one of"));
}

#[test]
fn chmod_flags_require_out() {
    let mut cmd = Command::cargo_bin("csui").unwrap();
    cmd.arg("--emit-sh")
        .arg("--no-chmod-x")
        .arg("script.csui")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("require --out"));
}

#[test]
fn unreadable_input_file_is_an_io_error_exit_1() {
    let mut cmd = Command::cargo_bin("csui").unwrap();
    cmd.arg("definitely/not/here.csui")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn list_functions_needs_no_input_file() {
    let mut cmd = Command::cargo_bin("csui").unwrap();
    cmd.arg("--list-functions")
        .assert()
        .success()
        .stdout(predicate::str::contains("g_check"))
        .stdout(predicate::str::contains("u_confirm"))
        .stdout(predicate::str::contains("die"));
}
