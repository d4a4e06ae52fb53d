//! Integration tests for CLI functionality

use assert_cmd::Command;
use predicates::prelude::*;

fn ogoctl() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ogoctl"));
    cmd.env_clear();
    cmd
}

#[test]
fn test_help_flag() {
    ogoctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manage Ogo Shield"));
}

#[test]
fn test_version_flag() {
    ogoctl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ogoctl"));
}

#[test]
fn test_invalid_output_format() {
    ogoctl()
        .args(["get", "sites", "-o", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xml"));
}

#[test]
fn test_schema_needs_no_credentials() {
    ogoctl()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("ogo_shield_site"))
        .stdout(predicate::str::contains("data_source_schemas"));
}

#[test]
fn test_schema_single_type_yaml() {
    ogoctl()
        .args(["schema", "ogo_shield_clusters", "-o", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("data_source_schema"));
}

#[test]
fn test_schema_unknown_type() {
    ogoctl()
        .args(["schema", "ogo_shield_nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Unknown resource or data source type 'ogo_shield_nope'",
        ));
}

#[test]
fn test_missing_credentials_are_reported() {
    ogoctl()
        .args(["get", "clusters"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing User email address"))
        .stderr(predicate::str::contains("Missing Ogo API apikey"))
        .stderr(predicate::str::contains("Missing Ogo API organization"));
}

#[test]
fn test_credentials_from_env() {
    ogoctl()
        .env("OGO_EMAIL", "ops@example.com")
        .env("OGO_APIKEY", "secret")
        .args(["delete", "site", "www.example.com", "--batch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing Ogo API organization"))
        .stderr(predicate::str::contains("Missing User email address").not());
}

#[test]
fn test_delete_in_batch_mode_requires_yes() {
    ogoctl()
        .args([
            "delete",
            "site",
            "www.example.com",
            "--batch",
            "--endpoint",
            "http://127.0.0.1:9",
            "--email",
            "ops@example.com",
            "--apikey",
            "secret",
            "--organization",
            "acme",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn test_create_with_invalid_config_fails_before_any_request() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tls.json");
    std::fs::write(&path, r#"{"name": "strict", "min_tls_version": "TLS_0.9"}"#).unwrap();

    ogoctl()
        .args([
            "create",
            "tlsoptions",
            "-f",
            path.to_str().unwrap(),
            "--endpoint",
            "http://127.0.0.1:9",
            "--email",
            "ops@example.com",
            "--apikey",
            "secret",
            "--organization",
            "acme",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("min_tls_version"));
}
