//! End-to-end CLI tests using `assert_cmd`
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        clippy::tests_outside_test_module,
        reason = "Test allows"
    )
)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get cargo binary or fail test
fn cargo_bin() -> Command {
    Command::cargo_bin("pinmap").unwrap_or_else(|err| panic!("Binary not found: {err}"))
}

/// Helper to create temp dir or fail test
fn temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|err| panic!("Failed to create temp dir: {err}"))
}

#[test]
fn test_cli_help() {
    cargo_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("--server"))
        .stdout(predicate::str::contains("--print-config"));
}

#[test]
fn test_cli_unknown_flag() {
    cargo_bin().arg("--no-such-flag").assert().failure();
}

#[test]
fn test_print_config_creates_default_file() {
    let temp = temp_dir();

    cargo_bin()
        .env("PINMAP_FOLDER", temp.path())
        .arg("--print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("base_url = \"http://127.0.0.1:5000\""))
        .stdout(predicate::str::contains("24.7954"))
        .stdout(predicate::str::contains("tile.openstreetmap.org"));

    assert!(temp.path().join("config.toml").exists());
}

#[test]
fn test_print_config_with_server_override() {
    let temp = temp_dir();
    let config_path = temp.path().join("custom.toml");

    cargo_bin()
        .env("PINMAP_FOLDER", temp.path())
        .arg("--config")
        .arg(&config_path)
        .args(["--server", "https://pins.example.org"])
        .arg("--print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://pins.example.org"));

    // The override applies to this run only
    let saved = fs::read_to_string(&config_path).unwrap();
    assert!(saved.contains("http://127.0.0.1:5000"));
    assert!(!saved.contains("pins.example.org"));
}

#[test]
fn test_invalid_server_fails() {
    let temp = temp_dir();

    cargo_bin()
        .env("PINMAP_FOLDER", temp.path())
        .args(["--server", "not a url", "--print-config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid server URL"));
}

#[test]
fn test_broken_config_falls_back_to_defaults() {
    let temp = temp_dir();
    let config_path = temp.path().join("config.toml");
    fs::write(&config_path, "this is = = not toml").unwrap();

    cargo_bin()
        .env("PINMAP_FOLDER", temp.path())
        .arg("--print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("zoom = 14"));
}
