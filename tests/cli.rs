//! End-to-end tests for the `fluxdb` binary.
//!
//! stdout is not a terminal under test, so every command answers in JSON.

use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

fn fluxdb(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fluxdb").unwrap();
    cmd.env_remove("FLUXDB_ADDONS")
        .env_remove("FLUXDB_TEST_DB")
        .env_remove("RUST_LOG")
        .arg("--db")
        .arg(db);
    cmd
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_init_then_status() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("data").join("wp-fluxc.db");

    let init = json_stdout(fluxdb(&db).args(["--addon", "WC", "init"]));
    assert_eq!(init["version"], 88);
    assert_eq!(init["addons"], serde_json::json!(["WC"]));

    let status = json_stdout(fluxdb(&db).arg("status"));
    assert_eq!(status["version"], 88);
    assert_eq!(status["pending_versions"], 0);
    assert_eq!(status["fingerprint"].as_str().unwrap().len(), 64);
}

#[test]
fn test_init_twice_fails() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("wp-fluxc.db");

    fluxdb(&db).arg("init").assert().success();
    fluxdb(&db).arg("init").assert().failure().code(2);
    fluxdb(&db).args(["init", "--force"]).assert().success();
}

#[test]
fn test_status_without_database() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("missing.db");

    let output = fluxdb(&db).arg("status").output().unwrap();
    assert_eq!(output.status.code(), Some(2));

    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"]["code"], "NOT_INITIALIZED");
}

#[test]
fn test_reset_requires_force() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("wp-fluxc.db");
    fluxdb(&db).arg("init").assert().success();

    fluxdb(&db).arg("reset").assert().failure().code(4);

    let preview = json_stdout(fluxdb(&db).args(["reset", "--dry-run"]));
    assert_eq!(preview["dry_run"], true);

    let reset = json_stdout(fluxdb(&db).args(["reset", "--force"]));
    assert_eq!(reset["dry_run"], false);
    assert!(!reset["tables"].as_array().unwrap().is_empty());
}

#[test]
fn test_migrate_current_database() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("wp-fluxc.db");
    fluxdb(&db).arg("init").assert().success();

    let migrate = json_stdout(fluxdb(&db).arg("migrate"));
    assert_eq!(migrate["outcome"]["action"], "current");
}

#[test]
fn test_unknown_addon_is_rejected() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("wp-fluxc.db");

    let output = fluxdb(&db).args(["--addon", "shop", "init"]).output().unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(!db.exists());
}

#[test]
fn test_orders_need_woocommerce() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("wp-fluxc.db");
    fluxdb(&db).arg("init").assert().success();

    let output = fluxdb(&db).args(["orders", "--site", "1"]).output().unwrap();
    assert_eq!(output.status.code(), Some(4));

    let err: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(err["error"]["code"], "ADDON_REQUIRED");
}

#[test]
fn test_steps_csv() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("wp-fluxc.db");

    let output = fluxdb(&db)
        .args(["steps", "--from", "87", "--format", "csv"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("version,target,addon,kind,statements,active"));
    assert_eq!(lines.next(), Some("87,88,WC,sql,2,false"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    let version = json_stdout(fluxdb(&dir.path().join("unused.db")).arg("version"));
    assert_eq!(version["schema_version"], 88);
}
