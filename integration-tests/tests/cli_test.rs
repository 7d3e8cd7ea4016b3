use std::path::Path;

use assert_cmd::Command;
use escargot::CargoRun;
use once_cell::sync::Lazy;
use serde_json::Value;
use tempfile::TempDir;

static SDCTL: Lazy<CargoRun> = Lazy::new(|| {
    escargot::CargoBuild::new()
        .package("sdctl")
        .bin("sdctl")
        .run()
        .expect("could not build sdctl")
});

const CONFIG: &str = r#"
[[consul]]
enabled = true
name = "primary"
address = "10.0.0.1:8500"
token = "consul-acl-token"
password = "hunter2"
tag-separator = ""
services = ["web"]
ssl-ca = "/etc/consul/ca.pem"

[[static]]
id = "node-exporters"
targets = ["10.0.0.5:9100"]
"#;

fn write_config(dir: &Path, contents: &str) -> String {
    let path = dir.join("sdctl.toml");
    std::fs::write(&path, contents).unwrap();
    path.display().to_string()
}

fn sdctl(config_path: &str) -> Command {
    let mut cmd = Command::from_std(SDCTL.command());
    cmd.env_remove("RUST_LOG").arg("--config").arg(config_path);
    cmd
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).unwrap()
}

#[test]
fn test_help() {
    Command::from_std(SDCTL.command())
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn test_check() {
    let tmpdir = TempDir::new().unwrap();
    let path = write_config(tmpdir.path(), CONFIG);

    sdctl(&path)
        .arg("check")
        .assert()
        .success()
        .stdout("2 discovery sources ok, 1 enabled\n");
}

#[test]
fn test_check_rejects_missing_name() {
    let tmpdir = TempDir::new().unwrap();
    let path = write_config(tmpdir.path(), "[[consul]]\naddress = \"10.0.0.1:8500\"\n");

    let assert = sdctl(&path).arg("check").assert().failure();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("consul discovery must be given a name"));
}

#[test]
fn test_show_redacts_secrets() {
    let tmpdir = TempDir::new().unwrap();
    let path = write_config(tmpdir.path(), CONFIG);

    let assert = sdctl(&path).arg("show").arg("consul").assert().success();
    let output = assert.get_output();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("consul-acl-token"));
    assert!(!stdout.contains("hunter2"));

    let json = stdout_json(&output.stdout);
    let element = &json["consul"][0];
    assert_eq!(element["id"], "primary");
    assert_eq!(element["options"]["token"], true);
    assert_eq!(element["options"]["tag-separator"], ",");
    assert_eq!(element["redacted"], serde_json::json!(["password", "token"]));
    assert!(json.get("static").is_none());
}

#[test]
fn test_scrape() {
    let tmpdir = TempDir::new().unwrap();
    let path = write_config(tmpdir.path(), CONFIG);

    let assert = sdctl(&path)
        .arg("scrape")
        .arg("consul")
        .arg("primary")
        .assert()
        .success();
    let json = stdout_json(&assert.get_output().stdout);

    assert_eq!(json["job_name"], "consul-primary");
    let block = &json["consul_sd_configs"][0];
    assert_eq!(block["server"], "10.0.0.1:8500");
    assert_eq!(block["token"], "<secret>");
    assert_eq!(block["tag_separator"], ",");
    assert_eq!(block["services"], serde_json::json!(["web"]));
    assert_eq!(block["password"], "<secret>");
    assert_eq!(block["tls_config"]["ca_file"], "/etc/consul/ca.pem");

    sdctl(&path)
        .arg("scrape")
        .arg("consul")
        .arg("missing")
        .assert()
        .failure();
}

#[test]
fn test_scrape_reveal_secrets() {
    let tmpdir = TempDir::new().unwrap();
    let path = write_config(tmpdir.path(), CONFIG);

    let assert = sdctl(&path)
        .arg("scrape")
        .arg("consul")
        .arg("primary")
        .arg("--reveal-secrets")
        .assert()
        .success();
    let json = stdout_json(&assert.get_output().stdout);

    let block = &json["consul_sd_configs"][0];
    assert_eq!(block["token"], "consul-acl-token");
    assert_eq!(block["password"], "hunter2");
}

#[test]
fn test_unprefixed_env_is_ignored() {
    let tmpdir = TempDir::new().unwrap();
    let path = write_config(tmpdir.path(), CONFIG);

    sdctl(&path)
        .env("LOG", "plaintext")
        .env("CONSUL", "unrelated")
        .env("STATIC", "unrelated")
        .arg("check")
        .assert()
        .success()
        .stdout("2 discovery sources ok, 1 enabled\n");
}

#[test]
fn test_prefixed_env_overrides_log_format() {
    let tmpdir = TempDir::new().unwrap();
    let path = write_config(tmpdir.path(), CONFIG);

    let assert = sdctl(&path)
        .env("SDCTL_LOG__FORMAT", "json")
        .arg("check")
        .assert()
        .success();
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert!(stderr.contains("\"level\":\"INFO\""));
}

#[test]
fn test_set() {
    let tmpdir = TempDir::new().unwrap();
    let path = write_config(tmpdir.path(), CONFIG);

    let assert = sdctl(&path)
        .arg("set")
        .arg("consul")
        .arg("primary")
        .arg(r#"{"scheme": "https", "token": "rotated"}"#)
        .assert()
        .success();
    let output = assert.get_output();
    assert!(!String::from_utf8_lossy(&output.stdout).contains("rotated"));
    assert_eq!(stdout_json(&output.stdout)["options"]["scheme"], "https");

    sdctl(&path)
        .arg("set")
        .arg("consul")
        .arg("primary")
        .arg(r#"{"datacentre": "dc1"}"#)
        .assert()
        .failure();
}
