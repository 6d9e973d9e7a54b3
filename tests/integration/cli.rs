use predicates::prelude::*;
use tempfile::TempDir;

use crate::common::cli;

#[test]
fn test_help_describes_tool() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("go_resource"))
        .stdout(predicate::str::contains("--src-root"))
        .stdout(predicate::str::contains("'hg' and 'git' repositories"));
}

#[test]
fn test_version() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_too_many_args_is_usage_error() {
    cli()
        .args(["github.com/a/a", "github.com/b/b"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_debug_and_quiet_conflict() {
    cli().args(["--debug", "--quiet"]).assert().code(2);
}

#[test]
fn test_missing_config_file_is_fatal() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.toml");

    cli()
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(&missing)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_config_from_environment() {
    let temp = TempDir::new().unwrap();

    cli()
        .env("HOMEBREW_GO_RESOURCES_CONFIG", temp.path().join("absent.toml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_malformed_config_is_fatal() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[tools\ngo = ").unwrap();

    cli()
        .arg("--config")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_missing_go_toolchain_is_fatal() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[tools]\ngo = \"definitely-not-a-real-go-4821\"\n").unwrap();

    cli()
        .current_dir(temp.path())
        .arg("--config")
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("'definitely-not-a-real-go-4821' is not installed"));
}
