//! Behavioural smoke tests for the CLI entrypoint.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn cli_help_lists_subcommands() {
    let mut cmd = cargo_bin_cmd!("vvctl");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("volume"))
        .stdout(predicate::str::contains("rcopy"))
        .stdout(predicate::str::contains("schedule"));
}

#[test]
fn cli_without_arguments_prints_usage() {
    let mut cmd = cargo_bin_cmd!("vvctl");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn cli_reports_missing_configuration() {
    let mut cmd = cargo_bin_cmd!("vvctl");
    cmd.args(["volume", "list"])
        .env_remove("VVCTL_API_URL")
        .env_remove("VVCTL_USERNAME")
        .env_remove("VVCTL_PASSWORD")
        .env("VVCTL_CONFIG_PATH", "/nonexistent/vvctl.toml")
        .assert()
        .code(1)
        .stdout("");
}
