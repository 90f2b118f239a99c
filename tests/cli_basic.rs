//! Integration tests for basic CLI behavior.
//!
//! Tests that the binary exists, accepts standard flags, and rejects
//! URLs no provider handles before touching the network.

#![allow(deprecated)] // cargo_bin deprecation — replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: get a Command for the `globeplay` binary.
fn globeplay() -> Command {
    Command::cargo_bin("globeplay").expect("binary 'globeplay' should be built")
}

// ─── Top-level flags ─────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    globeplay()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: globeplay"))
        .stdout(predicate::str::contains("<URL>"))
        .stdout(predicate::str::contains("--dump-json"))
        .stdout(predicate::str::contains("--get-url"))
        .stdout(predicate::str::contains("--list-formats"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn version_flag_shows_semver() {
    globeplay()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^globeplay \d+\.\d+\.\d+\n$").unwrap());
}

#[test]
fn no_args_shows_error_and_usage() {
    globeplay()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: globeplay"))
        .stderr(predicate::str::contains("<URL>"));
}

#[test]
fn conflicting_output_flags_fail() {
    globeplay()
        .args(["--dump-json", "--get-url", "https://player.hader.at/hader/x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

// ─── Argument validation ─────────────────────────────────────────────────────

#[test]
fn unsupported_url_fails_without_network() {
    globeplay()
        .arg("https://example.com/video.mp4")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported URL"));
}

#[test]
fn missing_config_file_fails() {
    globeplay()
        .args([
            "--config",
            "/nonexistent/globeplay/config.toml",
            "https://player.hader.at/hader/hader-indien",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}

#[test]
fn invalid_config_file_fails() {
    let path = std::env::temp_dir().join(format!("globeplay-invalid-{}.toml", std::process::id()));
    std::fs::write(&path, "timeout_secs = \"soon\"\n").unwrap();

    globeplay()
        .args(["--config", path.to_str().unwrap(), "https://player.hader.at/hader/hader-indien"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid TOML"));

    let _ = std::fs::remove_file(&path);
}
