//! Shared helpers for CLI specs

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

pub use predicates::prelude::*;

/// A `relay` invocation with logging silenced unless a spec asks for it
pub fn relay() -> Command {
    let mut cmd = Command::cargo_bin("relay").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

/// A scratch directory holding a bus config file
pub struct ConfigFile {
    _dir: TempDir,
    pub path: PathBuf,
}

impl ConfigFile {
    pub fn with(content: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("relay.toml");
        std::fs::write(&path, content).unwrap();
        Self { _dir: dir, path }
    }

    pub fn arg(&self) -> String {
        self.path.display().to_string()
    }
}

/// Run `relay` with the given args and parse its JSON stdout
pub fn json_output(args: &[&str]) -> serde_json::Value {
    let output = relay().args(args).args(["--output", "json"]).output().unwrap();
    assert!(
        output.status.success(),
        "relay failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}
