//! Integration tests for the `devdir` CLI binary.
//!
//! Argument parsing, completions, config handling, and device listing
//! against a mock device API. Never touches the user's real configuration.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `devdir` binary with env isolation.
///
/// Clears all `DEVDIR_*` env vars and points the config file at `config`.
fn devdir_cmd(config: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("devdir");
    cmd.env("DEVDIR_CONFIG", config)
        .env("NO_COLOR", "1")
        .env_remove("DEVDIR_PROFILE")
        .env_remove("DEVDIR_API_URL")
        .env_remove("DEVDIR_OUTPUT")
        .env_remove("DEVDIR_INSECURE")
        .env_remove("DEVDIR_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

async fn api_with(body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    server
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let dir = tempfile::tempdir().unwrap();
    let output = devdir_cmd(&dir.path().join("config.toml"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_flag() {
    let dir = tempfile::tempdir().unwrap();
    devdir_cmd(&dir.path().join("config.toml"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("devices").and(predicate::str::contains("config")));
}

#[test]
fn test_version_flag() {
    let dir = tempfile::tempdir().unwrap();
    devdir_cmd(&dir.path().join("config.toml"))
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("devdir"));
}

#[test]
fn test_completions_bash() {
    let dir = tempfile::tempdir().unwrap();
    devdir_cmd(&dir.path().join("config.toml"))
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_devices_without_config_exits_9() {
    let dir = tempfile::tempdir().unwrap();
    let output = devdir_cmd(&dir.path().join("config.toml"))
        .args(["devices", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(9));
    assert!(combined_output(&output).contains("No device API configured"));
}

#[test]
fn test_config_path_honours_env() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("custom.toml");
    devdir_cmd(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_config_init_writes_profile() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("nested").join("config.toml");

    devdir_cmd(&config)
        .args(["--profile", "lab", "config", "init", "--url", "https://lab.example.com"])
        .arg("--set-default")
        .assert()
        .success();

    let written = std::fs::read_to_string(&config).unwrap();
    assert!(written.contains("[profiles.lab]"));
    assert!(written.contains("https://lab.example.com"));
    assert!(written.contains(r#"default_profile = "lab""#));

    devdir_cmd(&config)
        .args(["config", "show", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lab"));
}

#[test]
fn test_config_init_rejects_bad_url() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let output = devdir_cmd(&config)
        .args(["config", "init", "--url", "ftp://inventory.local"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(!config.exists());
}

#[test]
fn test_unknown_profile_exits_9() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    devdir_cmd(&config)
        .args(["config", "init", "--url", "https://inv.example.com"])
        .assert()
        .success();

    let output = devdir_cmd(&config)
        .args(["--profile", "nope", "devices", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(9));
    assert!(combined_output(&output).contains("nope"));
}

// ── Devices against a mock API ──────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_list_plain_keeps_server_order() {
    let server = api_with(json!({ "data": [{ "id": "b" }, { "id": "a" }] })).await;
    let dir = tempfile::tempdir().unwrap();

    devdir_cmd(&dir.path().join("config.toml"))
        .args(["--api-url", &server.uri(), "devices", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout("b\na\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_list_json_passes_fields_through() {
    let server = api_with(json!([{ "id": "lap-7", "serialNumber": "SN-42", "room": "3.14" }])).await;
    let dir = tempfile::tempdir().unwrap();

    let output = devdir_cmd(&dir.path().join("config.toml"))
        .args(["-u", &server.uri(), "devices", "list", "-o", "json-compact"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        parsed,
        json!([{ "id": "lap-7", "serialNumber": "SN-42", "room": "3.14" }])
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_on_loan_filter() {
    let server = api_with(json!([
        { "id": "shelf" },
        { "id": "out", "loanedTo": "r.okafor" }
    ]))
    .await;
    let dir = tempfile::tempdir().unwrap();

    devdir_cmd(&dir.path().join("config.toml"))
        .args(["-u", &server.uri(), "devices", "list", "--on-loan", "-o", "plain"])
        .assert()
        .success()
        .stdout("out\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_first_named_profile_becomes_default() {
    let server = api_with(json!([{ "id": "lab-1" }])).await;
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    devdir_cmd(&config)
        .args(["-p", "lab", "config", "init", "--url", &server.uri()])
        .assert()
        .success();

    devdir_cmd(&config)
        .args(["devices", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout("lab-1\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_devices_get_missing_exits_4() {
    let server = api_with(json!([{ "id": "a" }])).await;
    let dir = tempfile::tempdir().unwrap();

    let output = devdir_cmd(&dir.path().join("config.toml"))
        .args(["-u", &server.uri(), "devices", "get", "zzz"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_exits_7_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/devices"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let output = devdir_cmd(&dir.path().join("config.toml"))
        .args(["-u", &server.uri(), "devices", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7));
    assert!(
        combined_output(&output).contains("Failed to fetch devices: 500 Internal Server Error")
    );
}
