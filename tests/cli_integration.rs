//! CLI integration tests
//!
//! Runs the `keysword` binary against a mock JSS.

mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::helpers::{PASSWORD, USERNAME, mount_canned_jss};
use predicates::prelude::*;
use std::process::Output;
use tempfile::TempDir;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run the binary off the async runtime so the mock server keeps serving
async fn run_keysword(server_uri: String, args: &[&str]) -> Output {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    let config_home = TempDir::new().unwrap();

    tokio::task::spawn_blocking(move || {
        let mut cmd = cargo_bin_cmd!("keysword");
        cmd.env("XDG_CONFIG_HOME", config_home.path())
            .env("JAMF_HOST", server_uri)
            .env("JAMF_USERNAME", USERNAME)
            .env("JAMF_PASSWORD", PASSWORD)
            .env_remove("RUST_LOG")
            .args(&args);
        cmd.output().unwrap()
    })
    .await
    .unwrap()
}

#[test]
fn test_version_flag() {
    let mut cmd = cargo_bin_cmd!("keysword");
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    let mut cmd = cargo_bin_cmd!("keysword");
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--id"))
        .stdout(predicate::str::contains("--name"))
        .stdout(predicate::str::contains("--no-key-id"));
}

#[tokio::test]
async fn test_neither_target_is_usage_error() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_keysword(server.uri(), &[]).await;

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[tokio::test]
async fn test_both_targets_is_usage_error() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_keysword(server.uri(), &["-id", "42", "-name", "mbp-alice"]).await;

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn test_missing_environment_is_config_error() {
    let config_home = TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("keysword");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("JAMF_HOST")
        .env_remove("JAMF_USERNAME")
        .env_remove("JAMF_PASSWORD")
        .args(["-id", "42"]);

    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("JAMF_HOST"));
}

#[tokio::test]
async fn test_end_to_end_by_name() {
    let server = MockServer::start().await;
    mount_canned_jss(&server).await;

    let output = run_keysword(server.uri(), &["-name", "mbp-alice"]).await;

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "SUPERSECRET\n");
}

#[tokio::test]
async fn test_end_to_end_by_id() {
    let server = MockServer::start().await;
    mount_canned_jss(&server).await;

    let output = run_keysword(server.uri(), &["-id", "42"]).await;

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "SUPERSECRET\n");
}

#[tokio::test]
async fn test_failed_login_exits_non_zero() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/legacy/computers.html"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_keysword(server.uri(), &["-id", "42"]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Authentication failed"));
}

#[tokio::test]
async fn test_config_file_supplies_credentials() {
    let server = MockServer::start().await;
    mount_canned_jss(&server).await;

    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("keysword.toml");
    std::fs::write(
        &config_path,
        format!(
            "[jamf]\nhost = \"{}\"\nusername = \"{}\"\npassword = \"{}\"\n",
            server.uri(),
            USERNAME,
            PASSWORD
        ),
    )
    .unwrap();
    let config_arg = config_path.to_string_lossy().into_owned();

    let output = tokio::task::spawn_blocking(move || {
        let mut cmd = cargo_bin_cmd!("keysword");
        cmd.env("XDG_CONFIG_HOME", dir.path())
            .env_remove("JAMF_HOST")
            .env_remove("JAMF_USERNAME")
            .env_remove("JAMF_PASSWORD")
            .args(["--config", config_arg.as_str(), "-id", "42"]);
        cmd.output().unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "SUPERSECRET\n");
}
