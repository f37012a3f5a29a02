//! Integration tests for argument parsing and help output.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn charm() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("landscape-client-charm"));
    cmd.env("NO_COLOR", "1").env_remove("JUJU_DISPATCH_PATH");
    cmd
}

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    charm().assert().code(2).stderr(predicate::str::contains(
        "Lifecycle agent that installs, configures and registers Landscape client",
    ));
}

#[test]
fn test_cli_help_lists_triggers() {
    charm()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("config-changed"))
        .stdout(predicate::str::contains("relation-departed"))
        .stdout(predicate::str::contains("upgrade"))
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("dispatch"));
}

#[test]
fn test_cli_version_flag_shows_version() {
    charm()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("landscape-client-charm 0.1.0"));
}

#[test]
fn test_unknown_subcommand_fails() {
    charm()
        .arg("leader-elected")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_dispatch_without_path_fails() {
    charm()
        .arg("dispatch")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--path"));
}

#[test]
fn test_dispatch_unknown_path_reports_error() {
    charm()
        .args(["dispatch", "--path", "hooks/leader-elected"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: unknown dispatch path: hooks/leader-elected",
        ));
}
