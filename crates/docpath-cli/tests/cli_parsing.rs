//! CLI parsing tests for the docpath command
//!
//! Tests that verify CLI argument parsing works correctly.

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a Command for the docpath binary
#[allow(deprecated)]
fn docpath() -> Command {
    Command::cargo_bin("docpath").expect("Failed to find docpath binary")
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_shows_all_commands() {
    docpath()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("link"))
        .stdout(predicate::str::contains("tree"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_flag() {
    docpath()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("docpath"));
}

#[test]
fn test_no_command_fails() {
    docpath()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// ============================================================================
// Global Options Tests
// ============================================================================

#[test]
fn test_global_options_in_help() {
    docpath()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("--quiet"))
        .stdout(predicate::str::contains("--packages"))
        .stdout(predicate::str::contains("--jobs"))
        .stdout(predicate::str::contains("--log-format"))
        .stdout(predicate::str::contains("--extension"));
}

#[test]
fn test_invalid_log_format_rejected() {
    docpath()
        .args(["--log-format", "yaml", "stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("yaml"));
}

#[test]
fn test_invalid_jobs_rejected() {
    docpath()
        .args(["--jobs", "many", "stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// ============================================================================
// Command Tests
// ============================================================================

#[test]
fn test_resolve_help() {
    docpath()
        .args(["resolve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<SOURCE>"))
        .stdout(predicate::str::contains("<TARGET>"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn test_resolve_requires_two_packages() {
    docpath()
        .args(["resolve", "com.acme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("<TARGET>"));
}

#[test]
fn test_link_help() {
    docpath()
        .args(["link", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--page"))
        .stdout(predicate::str::contains("--strict"));
}

#[test]
fn test_tree_help() {
    docpath()
        .args(["tree", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("dot"));
}

#[test]
fn test_tree_invalid_format() {
    docpath()
        .args(["tree", "--format", "svg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_stats_help() {
    docpath()
        .args(["stats", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn test_config_help() {
    docpath()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_config_init_help() {
    docpath()
        .args(["config", "init", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--global"));
}
