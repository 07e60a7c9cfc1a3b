//! Integration tests for the docpath CLI
//!
//! These tests run full CLI workflows against package lists written to a
//! temporary directory. `HOME` points into the same directory so no user
//! configuration is picked up.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Package list shared by most tests
const PACKAGES: &str = "\
# core modules
com.acme
com.acme.core
com.acme.core.io
com.acme.web

org.other
";

/// Get a Command for the docpath binary, isolated in `dir`
#[allow(deprecated)]
fn docpath(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("docpath").expect("Failed to find docpath binary");
    cmd.current_dir(dir)
        .env("HOME", dir.join("home"))
        .env_remove("DOCPATH_CONFIG")
        .env_remove("DOCPATH_JOBS")
        .env_remove("RUST_LOG");
    cmd
}

/// Create a temporary directory holding `packages.txt`
fn setup() -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let path = temp.path().join("packages.txt");
    std::fs::write(&path, PACKAGES).expect("Failed to write package list");
    (temp, path)
}

// ============================================================================
// Resolve Command
// ============================================================================

#[test]
fn test_resolve_sibling() {
    let (temp, packages) = setup();

    docpath(temp.path())
        .arg("--packages")
        .arg(&packages)
        .args(["resolve", "com.acme.core", "com.acme.web"])
        .assert()
        .success()
        .stdout("ascend  1\ndescend com.acme.web (web)\n");
}

#[test]
fn test_resolve_same_package() {
    let (temp, packages) = setup();

    docpath(temp.path())
        .arg("--packages")
        .arg(&packages)
        .args(["resolve", "com.acme", "com.acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(same package)"));
}

#[test]
fn test_resolve_json() {
    let (temp, packages) = setup();

    let output = docpath(temp.path())
        .arg("--packages")
        .arg(&packages)
        .args(["--quiet", "resolve", "com.acme.core.io", "org.other", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["source"], "com.acme.core.io");
    assert_eq!(value["distance"], serde_json::Value::Null);
    let steps = value["steps"].as_array().unwrap();
    assert_eq!(steps.first().unwrap()["step"], "ascend");
    assert_eq!(steps.last().unwrap()["package"], "org.other");
}

#[test]
fn test_resolve_unknown_package_fails() {
    let (temp, packages) = setup();

    docpath(temp.path())
        .arg("--packages")
        .arg(&packages)
        .args(["resolve", "com.acme", "java.lang"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown package identifier 'java.lang'"));
}

#[test]
fn test_packages_from_stdin() {
    let temp = TempDir::new().unwrap();

    docpath(temp.path())
        .args(["resolve", "x.y", "z.w"])
        .write_stdin("x.y\nz.w\n")
        .assert()
        .success()
        .stdout("ascend  2\ndescend z.w (z/w)\n");
}

#[test]
fn test_multiple_package_files() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("first.txt");
    let second = temp.path().join("second.txt");
    std::fs::write(&first, "net.alpha\nnet.alpha.one\n").unwrap();
    std::fs::write(&second, "net.alpha.two\n").unwrap();

    docpath(temp.path())
        .arg("-p")
        .arg(&first)
        .arg("-p")
        .arg(&second)
        .args(["--jobs", "2", "resolve", "net.alpha.one", "net.alpha.two"])
        .assert()
        .success()
        .stdout("ascend  1\ndescend net.alpha.two (two)\n");
}

#[test]
fn test_missing_package_file_fails() {
    let temp = TempDir::new().unwrap();

    docpath(temp.path())
        .args(["--packages", "missing.txt", "stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read package file"));
}

// ============================================================================
// Link Command
// ============================================================================

#[test]
fn test_link_to_page() {
    let (temp, packages) = setup();

    docpath(temp.path())
        .arg("--packages")
        .arg(&packages)
        .args(["link", "com.acme.core", "com.acme.web", "--page", "Server"])
        .assert()
        .success()
        .stdout("../web/Server.md\n");
}

#[test]
fn test_link_to_package_index() {
    let (temp, packages) = setup();

    docpath(temp.path())
        .arg("--packages")
        .arg(&packages)
        .args(["link", "com.acme.core.io", "org.other"])
        .assert()
        .success()
        .stdout("../../../../org/other/README.md\n");
}

#[test]
fn test_link_unknown_target_is_plain_text() {
    let (temp, packages) = setup();

    docpath(temp.path())
        .arg("--packages")
        .arg(&packages)
        .args(["link", "com.acme", "java.lang", "--page", "String"])
        .assert()
        .success()
        .stdout("java.lang.String\n")
        .stderr(predicate::str::contains("warning"));
}

#[test]
fn test_link_unknown_target_strict() {
    let (temp, packages) = setup();

    docpath(temp.path())
        .arg("--packages")
        .arg(&packages)
        .args(["link", "com.acme", "java.lang", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown package 'java.lang'"));
}

#[test]
fn test_link_to_virtual_package_is_plain_text() {
    let temp = TempDir::new().unwrap();

    docpath(temp.path())
        .args(["link", "a.b.c", "a.b", "--page", "Util"])
        .write_stdin("a.b.c\na.b.d\n")
        .assert()
        .success()
        .stdout("a.b.Util\n")
        .stderr(predicate::str::contains("not documented"));
}

#[test]
fn test_link_to_virtual_package_strict() {
    let temp = TempDir::new().unwrap();

    docpath(temp.path())
        .args(["link", "a.b.c", "a.b", "--strict"])
        .write_stdin("a.b.c\na.b.d\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no pages of its own"));
}

#[test]
fn test_extension_flag_overrides_config() {
    let (temp, packages) = setup();
    let config_dir = temp.path().join(".docpath");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[links]\nextension = \".htm\"\n",
    )
    .unwrap();

    docpath(temp.path())
        .arg("--packages")
        .arg(&packages)
        .args(["--extension", ".html"])
        .args(["link", "com.acme.core", "com.acme.web", "--page", "Server"])
        .assert()
        .success()
        .stdout("../web/Server.html\n");
}

#[test]
fn test_link_uses_local_config() {
    let (temp, packages) = setup();
    let config_dir = temp.path().join(".docpath");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[links]\nextension = \".html\"\npackage_index = \"index.html\"\n",
    )
    .unwrap();

    docpath(temp.path())
        .arg("--packages")
        .arg(&packages)
        .args(["link", "com.acme.web", "com.acme.core.io", "--page", "Reader"])
        .assert()
        .success()
        .stdout("../core/io/Reader.html\n");
}

#[test]
fn test_link_uses_explicit_config() {
    let (temp, packages) = setup();
    let config = temp.path().join("custom.toml");
    std::fs::write(&config, "[links]\npackage_index = \"index.md\"\n").unwrap();

    docpath(temp.path())
        .arg("--packages")
        .arg(&packages)
        .arg("--config")
        .arg(&config)
        .args(["link", "com.acme.web", "com.acme"])
        .assert()
        .success()
        .stdout("../index.md\n");
}

#[test]
fn test_invalid_config_fails() {
    let (temp, packages) = setup();
    let config = temp.path().join("broken.toml");
    std::fs::write(&config, "[links]\nseparator = \"\"\n").unwrap();

    docpath(temp.path())
        .arg("--packages")
        .arg(&packages)
        .arg("--config")
        .arg(&config)
        .args(["link", "com.acme.web", "com.acme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("links.separator"));
}

// ============================================================================
// Tree and Stats Commands
// ============================================================================

#[test]
fn test_tree_text() {
    let temp = TempDir::new().unwrap();

    docpath(temp.path())
        .args(["tree"])
        .write_stdin("a.b.c\na.b.d\na.e\n")
        .assert()
        .success()
        .stdout("(root)\n  a (virtual)\n    a.b (virtual)\n      a.b.c\n      a.b.d\n    a.e\n");
}

#[test]
fn test_tree_json() {
    let (temp, packages) = setup();

    let output = docpath(temp.path())
        .arg("--packages")
        .arg(&packages)
        .args(["tree", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let nodes = value.as_array().unwrap();
    assert_eq!(nodes[0]["kind"], "alpha");
    assert!(nodes
        .iter()
        .any(|node| node["identifier"] == "com.acme.core.io" && node["parent"] == "com.acme.core"));
}

#[test]
fn test_tree_dot() {
    let (temp, packages) = setup();

    docpath(temp.path())
        .arg("--packages")
        .arg(&packages)
        .args(["tree", "--format", "dot"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph {"))
        .stdout(predicate::str::contains("com.acme.core.io"));
}

#[test]
fn test_stats_json() {
    let (temp, packages) = setup();

    let output = docpath(temp.path())
        .arg("--packages")
        .arg(&packages)
        .args(["stats", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["packages"], 5);
    assert_eq!(value["virtual_nodes"], 1);
    assert_eq!(value["repair"]["virtual_nodes"][0], "");
}

#[test]
fn test_stats_text() {
    let (temp, packages) = setup();

    docpath(temp.path())
        .arg("--packages")
        .arg(&packages)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Packages:       5"))
        .stdout(predicate::str::contains("+ (global)"));
}

// ============================================================================
// Config Command
// ============================================================================

#[test]
fn test_config_init_local_then_show() {
    let temp = TempDir::new().unwrap();

    docpath(temp.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".docpath"));
    assert!(temp.path().join(".docpath/config.toml").exists());

    docpath(temp.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[links]"))
        .stdout(predicate::str::contains("README.md"))
        .stdout(predicate::str::contains("found"));
}

#[test]
fn test_config_init_global() {
    let temp = TempDir::new().unwrap();

    docpath(temp.path())
        .args(["config", "init", "--global"])
        .assert()
        .success();
    assert!(temp.path().join("home/.docpath/config.toml").exists());
}

#[test]
fn test_config_show_json_applies_overrides() {
    let temp = TempDir::new().unwrap();

    let output = docpath(temp.path())
        .args(["--jobs", "3", "--quiet", "config", "show", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["config"]["index"]["parallelism"], 3);
    assert_eq!(value["config"]["logging"]["level"], "error");
    assert_eq!(value["sources"]["local_exists"], false);
}
