//! Integration tests for the cmakegen binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A binary invocation isolated from the developer's config and `.env`.
fn cmakegen(dir: &Path) -> Command {
    let config = dir.join("test-config.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    let mut cmd = Command::cargo_bin("cmakegen").unwrap();
    cmd.current_dir(dir)
        .env_remove("GITHUB_TOKEN")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config);
    cmd
}

#[test]
fn test_help_flag() {
    let mut cmd = Command::cargo_bin("cmakegen").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("cmakegen"))
        .stdout(predicate::str::contains("new"));
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("cmakegen").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_new_command_help() {
    let mut cmd = Command::cargo_bin("cmakegen").unwrap();
    cmd.args(["new", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--external"))
        .stdout(predicate::str::contains("--registry"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_completions_bash() {
    let mut cmd = Command::cargo_bin("cmakegen").unwrap();
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cmakegen"));
}

#[test]
fn test_new_project_dry_run() {
    let temp = TempDir::new().unwrap();

    cmakegen(temp.path())
        .args(["new", "Demo", "--test", "--license", "Jane Doe", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("Demo_Test"));

    assert!(!temp.path().join("Demo").exists());
}

#[test]
fn test_new_project_dry_run_json() {
    let temp = TempDir::new().unwrap();

    let assert = cmakegen(temp.path())
        .args([
            "--output-format",
            "json",
            "new",
            "Demo",
            "--dep",
            "fmt",
            "--external",
            "acme/lib",
            "--dry-run",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(summary["project"], "Demo");
    assert_eq!(summary["dependencies"][0], "fmt");
    assert_eq!(summary["external_projects"][0], "acme/lib");
    assert!(!temp.path().join("Demo").exists());
}

#[test]
fn test_declined_confirmation_cancels() {
    let temp = TempDir::new().unwrap();

    cmakegen(temp.path())
        .args(["new", "Demo"])
        .write_stdin("n\n")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cancelled"));

    assert!(!temp.path().join("Demo").exists());
}

#[test]
fn test_unreachable_registry_rolls_back() {
    let temp = TempDir::new().unwrap();

    // Bind then drop to get a local port nothing listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    cmakegen(temp.path())
        .env("CMAKEGEN_GITHUB__API_URL", format!("http://127.0.0.1:{port}"))
        .args(["new", "Demo", "--yes"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Error:"));

    assert!(!temp.path().join("Demo").exists());
}

#[test]
fn test_config_get_reads_file() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("test-config.toml"),
        "[github]\napi_url = \"https://ghe.example.com/api/v3\"\n",
    )
    .unwrap();

    cmakegen(temp.path())
        .args(["config", "get", "github.api_url"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://ghe.example.com/api/v3"));
}

#[test]
fn test_config_get_env_override() {
    let temp = TempDir::new().unwrap();

    cmakegen(temp.path())
        .env("CMAKEGEN_BUILD__TIMEOUT_SECS", "45")
        .args(["config", "get", "build.timeout_secs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("45"));
}

#[test]
fn test_config_list_redacts_token() {
    let temp = TempDir::new().unwrap();

    cmakegen(temp.path())
        .env("GITHUB_TOKEN", "ghp_very_secret")
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api_url"))
        .stdout(predicate::str::contains("ghp_very_secret").not());
}

#[test]
fn test_init_writes_config() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("nested").join("cmakegen.toml");

    let mut cmd = Command::cargo_bin("cmakegen").unwrap();
    cmd.current_dir(temp.path())
        .arg("--config")
        .arg(&target)
        .arg("init")
        .assert()
        .success();

    let content = fs::read_to_string(&target).unwrap();
    assert!(content.contains("[github]"));
    assert!(content.contains("timeout_secs = 20"));
}
