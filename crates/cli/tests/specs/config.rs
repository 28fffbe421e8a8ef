//! `relay config` specs

use crate::prelude::*;

#[test]
fn defaults_without_file() {
    relay()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("(defaults)"))
        .stdout(predicate::str::contains("resolved:      3"));
}

#[test]
fn reads_buffer_size_from_file() {
    let file = ConfigFile::with("buffer_size = 12\n");
    let json = json_output(&["config", "--config", &file.arg()]);

    assert_eq!(json["buffer_size"], 12);
    assert_eq!(json["resolved_buffer_size"], 12);
}

#[test]
fn non_positive_buffer_size_resolves_to_default() {
    let file = ConfigFile::with("buffer_size = -4\n");
    let json = json_output(&["config", "--config", &file.arg()]);

    assert_eq!(json["buffer_size"], -4);
    assert_eq!(json["resolved_buffer_size"], 3);
}

#[test]
fn unknown_key_is_an_error() {
    let file = ConfigFile::with("capacity = 12\n");

    relay()
        .args(["config", "--config", &file.arg()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TOML parse error"));
}

#[test]
fn missing_file_is_an_error() {
    relay()
        .args(["config", "--config", "/nonexistent/relay.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
