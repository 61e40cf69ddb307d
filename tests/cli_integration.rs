//! Integration tests for the `tydid` binary.
//!
//! The interactive view needs a real terminal, so these only exercise the
//! argument surface that exits before the view starts.

use std::path::PathBuf;
use std::process::Command;

/// Get the path to the built `tydid` binary.
fn tydid_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("tydid");
    path
}

#[test]
fn version_flag() {
    let output = Command::new(tydid_bin()).arg("--version").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!("tydid {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn help_mentions_dir_flag() {
    let output = Command::new(tydid_bin()).arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--dir"));
    assert!(stdout.contains("terminal todo list"));
}

#[test]
fn unknown_arguments_fail_without_touching_storage() {
    let tmp = tempfile::TempDir::new().unwrap();
    let dir = tmp.path().join("store");
    let output = Command::new(tydid_bin())
        .arg("-C")
        .arg(&dir)
        .arg("list")
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(!dir.exists());
}
