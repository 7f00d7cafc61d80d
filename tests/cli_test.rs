use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_flags() {
    let mut cmd = Command::cargo_bin("docknav").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--log-tail"))
        .stdout(predicate::str::contains("--running"))
        .stdout(predicate::str::contains("DOCKER_HOST"));
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("docknav").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("docknav"));
}

#[test]
fn test_rejects_invalid_log_tail() {
    let mut cmd = Command::cargo_bin("docknav").unwrap();
    cmd.args(["--log-tail", "lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
