use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};

/// A git repository with the given remotes
fn initialize(remotes: &[(&str, &str)]) -> TempDir {
    let temp_dir = tempdir().expect("tempdir failed");

    Command::new("git")
        .args(["init"])
        .current_dir(temp_dir.path())
        .output()
        .expect("git init failed");

    for (name, url) in remotes {
        Command::new("git")
            .args(["remote", "add", name, url])
            .current_dir(temp_dir.path())
            .output()
            .expect("git remote add failed");
    }

    temp_dir
}

fn relstat() -> Command {
    let mut command = Command::cargo_bin(env!("CARGO_PKG_NAME")).expect("binary exists");
    command.env_remove("RUST_LOG");
    command
}

#[test]
fn help() {
    relstat()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--color"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn help_follows_color_mode() {
    relstat()
        .args(["--color=always", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}["));

    relstat()
        .args(["--color=never", "--help"])
        .env("CLICOLOR_FORCE", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn version() {
    relstat()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn invalid_color_mode() {
    relstat()
        .arg("--color=rainbow")
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: "))
        .stderr(predicate::str::contains("rainbow"));
}

#[test]
fn not_a_git_repository() {
    let tmp = tempdir().expect("tempdir failed");

    relstat()
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("Error: "));
}

#[test]
fn no_github_remote() {
    let tmp = initialize(&[("origin", "git@gitlab.com:cassava/repoctl.git")]);

    relstat()
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("Error: could not find a GitHub remote"));
}

#[test]
fn malformed_github_remote_is_reported() {
    let tmp = initialize(&[("origin", "https://github.com/cassava/repoctl")]);

    relstat()
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "could not parse GitHub remote `origin\thttps://github.com/cassava/repoctl (fetch)`",
        ))
        .stderr(predicate::str::contains("Error: could not find a GitHub remote"));
}
