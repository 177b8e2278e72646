//! Binary smoke tests for the sessionless subcommands.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lockbox(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lockbox").unwrap();
    cmd.env("LOCKBOX_DATA_DIR", data_dir.path());
    cmd
}

#[test]
fn help_mentions_the_store() {
    let temp_dir = TempDir::new().unwrap();
    lockbox(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("encrypted credential store"));
}

#[test]
fn list_with_no_databases() {
    let temp_dir = TempDir::new().unwrap();
    lockbox(&temp_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No databases yet"));
}

#[test]
fn current_with_no_selection() {
    let temp_dir = TempDir::new().unwrap();
    lockbox(&temp_dir)
        .arg("current")
        .assert()
        .success()
        .stdout(predicate::str::contains("No database selected"));
}

#[test]
fn switch_to_unknown_database_fails() {
    let temp_dir = TempDir::new().unwrap();
    lockbox(&temp_dir)
        .arg("switch")
        .arg("ghost")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
