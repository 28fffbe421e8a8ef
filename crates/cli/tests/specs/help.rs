//! Help and usage specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    relay()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("stress"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn unknown_subcommand_fails() {
    relay()
        .arg("publish")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn zero_publishers_rejected() {
    relay()
        .args(["stress", "--publishers", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--publishers"));
}

#[test]
fn zero_topics_rejected() {
    relay()
        .args(["stress", "--topics", "0"])
        .assert()
        .failure();
}
