//! Integration tests for the CLI binary
//!
//! These run the built `transit-cli` against local files only; no test
//! here talks to a routing API.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::io::Write;
use std::process::{Command, Output};

const OSHIAGE: &str =
    include_str!("../../integration_transit/tests/fixtures/oshiage_mitsukoshimae.json");

fn cli() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_transit-cli"));
    cmd.env_remove("TRANSIT_API_BASE_URL")
        .env_remove("RUST_LOG")
        .args(["--config", "no-such-config"]);
    cmd
}

fn saved_response(body: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn map_file_prints_route_summary() {
    let file = saved_response(OSHIAGE);
    let output = cli().arg("map-file").arg(file.path()).output().unwrap();

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("20:31 → 20:43"), "unexpected output: {text}");
    assert!(text.contains("¥210"));
}

#[test]
fn map_file_detailed_lists_segments() {
    let file = saved_response(OSHIAGE);
    let output = cli()
        .args(["map-file", "--detailed"])
        .arg(file.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("Option 1:"));
    assert!(text.contains("三越前"));
}

#[test]
fn map_file_json_output() {
    let file = saved_response(OSHIAGE);
    let output = cli()
        .arg("--json")
        .arg("map-file")
        .arg(file.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let routes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(routes.as_array().map(Vec::len), Some(1));
    assert_eq!(routes[0]["from"], "押上[スカイツリー前]");
}

#[test]
fn map_file_empty_items() {
    let file = saved_response(r#"{"items": []}"#);
    let output = cli().arg("map-file").arg(file.path()).output().unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "No routes found");
}

#[test]
fn map_file_rejects_non_json() {
    let file = saved_response("<html>maintenance</html>");
    let output = cli().arg("map-file").arg(file.path()).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn map_file_missing_path_fails() {
    let output = cli()
        .args(["map-file", "/definitely/not/here.json"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn search_without_base_url_fails() {
    let output = cli().args(["search", "押上", "三越前"]).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("TRANSIT_API_BASE_URL"), "unexpected stderr: {stderr}");
}

#[test]
fn verbose_run_logs_loaded_configuration() {
    let file = saved_response(r#"{"items": []}"#);
    let output = cli().arg("-vv").arg("map-file").arg(file.path()).output().unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration loaded"), "unexpected stderr: {stderr}");
    assert_eq!(stdout(&output).trim(), "No routes found");
}
