#![allow(deprecated)] // cargo_bin is deprecated in favour of cargo_bin_cmd!

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "cli-token";

fn synsh(config: &NamedTempFile) -> Command {
    let mut cmd = Command::cargo_bin("synsh").unwrap();
    cmd.env("KAMAKI_CONFIG", config.path())
        .env_remove("SYNSH_CLOUD")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn two_clouds() -> NamedTempFile {
    config_file(
        r#"
[global]
default_cloud = okeanos

[cloud "okeanos"]
url = https://accounts.okeanos.grnet.gr/identity/v2.0
token = aaa

[cloud "demo"]
url = https://accounts.demo.synnefo.org/identity/v2.0
token = bbb
"#,
    )
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin("synsh").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Easy SSH to Synnefo virtual servers"))
        .stdout(predicate::str::contains("connect"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_version_needs_no_config() {
    let mut cmd = Command::cargo_bin("synsh").unwrap();
    cmd.env("KAMAKI_CONFIG", "/nonexistent/kamakirc").arg("version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_config_file() {
    let mut cmd = Command::cargo_bin("synsh").unwrap();
    cmd.env("KAMAKI_CONFIG", "/nonexistent/kamakirc").arg("list");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/kamakirc"));
}

#[test]
fn test_clouds_in_file_order() {
    let config = two_clouds();
    let output = synsh(&config).arg("clouds").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let okeanos = stdout.find("okeanos").unwrap();
    let demo = stdout.find("demo").unwrap();
    assert!(okeanos < demo);
}

#[test]
fn test_clouds_marks_default_cloud() {
    let config = two_clouds();
    let output = synsh(&config).arg("clouds").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].starts_with("* okeanos"));
    assert!(lines[1].starts_with("  demo"));
}

#[test]
fn test_multiline_token_is_accepted() {
    let config = config_file(
        "[cloud \"lab\"]\nurl = https://lab.example.org/identity/v2.0\ntoken = abc\n    def\n",
    );
    synsh(&config)
        .arg("clouds")
        .assert()
        .success()
        .stdout(predicate::str::contains("lab"));
}

#[test]
fn test_clouds_filtered_by_flag() {
    let config = two_clouds();
    synsh(&config)
        .args(["--cloud", "demo", "clouds"])
        .assert()
        .success()
        .stdout(predicate::str::contains("demo"))
        .stdout(predicate::str::contains("okeanos").not());
}

#[test]
fn test_empty_config_has_no_clouds() {
    let config = config_file("# nothing here\n");
    synsh(&config)
        .args(["connect", "web1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No available clouds"));
}

#[test]
fn test_unknown_cloud_hint() {
    let config = two_clouds();
    synsh(&config)
        .args(["connect", "web1.ghost", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown cloud 'ghost'"));
}

#[test]
fn test_unknown_cloud_flag_from_env() {
    let config = two_clouds();
    synsh(&config)
        .env("SYNSH_CLOUD", "ghost")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown cloud 'ghost'"));
}

#[test]
fn test_ip_family_flags_conflict() {
    let config = two_clouds();
    synsh(&config)
        .args(["connect", "web1", "-4", "-6"])
        .assert()
        .failure();
}

async fn mock_synnefo() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/identity/v2.0/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": {
                "token": {"id": TOKEN},
                "serviceCatalog": [
                    {"type": "compute", "name": "cyclades_compute",
                     "endpoints": [{"publicURL": format!("{}/compute/v2.0", server.uri())}]},
                    {"type": "network", "name": "cyclades_network",
                     "endpoints": [{"publicURL": format!("{}/network/v2.0", server.uri())}]}
                ]
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/compute/v2.0/servers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "servers": [{"id": 7, "name": "web1"}, {"id": 8, "name": "bare"}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/compute/v2.0/servers/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "server": {
                "id": 7,
                "name": "web1",
                "status": "ACTIVE",
                "metadata": {"users": "user"},
                "attachments": [
                    {"network_id": "5", "ipv4": "10.0.0.2"},
                    {"network_id": "1", "ipv4": "83.212.1.7"}
                ],
                "SNF:fqdn": "snf-7.vm.okeanos.grnet.gr"
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/compute/v2.0/servers/8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "server": {"id": 8, "name": "bare", "status": "ACTIVE",
                       "metadata": {}, "attachments": []}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/network/v2.0/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "networks": [{"id": "1", "public": true}, {"id": "5", "public": false}]
        })))
        .mount(&server)
        .await;

    server
}

fn mock_config(server: &MockServer) -> NamedTempFile {
    config_file(&format!(
        "[cloud \"okeanos\"]\nurl = {}/identity/v2.0\ntoken = {}\n",
        server.uri(),
        TOKEN
    ))
}

async fn run(config: NamedTempFile, args: &'static [&'static str]) -> std::process::Output {
    tokio::task::spawn_blocking(move || synsh(&config).args(args).output().unwrap())
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_connect_dry_run_prints_ssh_command() {
    let server = mock_synnefo().await;
    let output = run(mock_config(&server), &["connect", "web1", "--dry-run"]).await;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim(), "ssh -l user 83.212.1.7");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_connect_dry_run_with_login_and_ssh_args() {
    let server = mock_synnefo().await;
    let output = run(
        mock_config(&server),
        &["connect", "root@web1.okeanos", "--dry-run", "--", "uptime"],
    )
    .await;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim(), "ssh -l root 83.212.1.7 uptime");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_json() {
    let server = mock_synnefo().await;
    let output = run(mock_config(&server), &["show", "web1", "--json"]).await;

    assert!(output.status.success());
    let info: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(info["server_name"], "web1");
    assert_eq!(info["cloud_name"], "okeanos");
    assert_eq!(info["ipv4"], "83.212.1.7");
    assert_eq!(info["fqdn"], "snf-7.vm.okeanos.grnet.gr");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_without_interfaces() {
    let server = mock_synnefo().await;
    let output = run(mock_config(&server), &["connect", "bare", "--dry-run"]).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("has no network interfaces"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_not_found() {
    let server = mock_synnefo().await;
    let output = run(mock_config(&server), &["connect", "ghost-vm", "--dry-run"]).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Server 'ghost-vm' not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_and_services() {
    let server = mock_synnefo().await;

    let output = run(mock_config(&server), &["list"]).await;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("web1"));
    assert!(stdout.contains("bare"));

    let output = run(mock_config(&server), &["clouds", "--services"]).await;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("cyclades_compute"));
    assert!(stdout.contains("/network/v2.0"));
}
