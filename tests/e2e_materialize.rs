//! End-to-end `simscale materialize`: artifacts written and left behind.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn simscale() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("simscale"))
}

#[test]
fn e2e_materialize_writes_inspectable_case() {
    let root = TempDir::new().expect("temp dir");

    simscale()
        .args(["materialize", "--entities", "8", "--steps", "10"])
        .arg("--dir")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("simcontrol.toml"))
        .stdout(predicate::str::contains("in_data.csv"))
        .stdout(predicate::str::contains("cl-kernels.toml"));

    let dataset = std::fs::read_to_string(root.path().join("in_data.csv")).expect("dataset");
    let lines: Vec<&str> = dataset.lines().collect();
    assert_eq!(lines[0], "Name,X0,Y0");
    assert_eq!(lines.len(), 9);

    let kernels = std::fs::read_to_string(root.path().join("cl-kernels.toml")).expect("kernels");
    assert!(kernels.contains("[[kernel]]"));
}

#[test]
fn e2e_materialize_rejects_zero_counts() {
    let root = TempDir::new().expect("temp dir");

    simscale()
        .args(["materialize", "--entities", "0", "--steps", "10"])
        .arg("--dir")
        .arg(root.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be positive"));
}
