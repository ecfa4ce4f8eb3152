use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const EXAMPLE_REQUEST: &str = r#"{
    "contract_version": 3,
    "subject_id": "w1",
    "action": "SEND",
    "nonce": "n1",
    "ttl_seconds": 60,
    "payload": {}
}"#;

fn shield() -> Command {
    let mut cmd = Command::cargo_bin("shield").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn evaluate_file_prints_deny_by_policy() {
    let dir = TempDir::new().unwrap();
    let request = write(&dir, "request.json", EXAMPLE_REQUEST);

    let output = shield()
        .args(["evaluate", "--request"])
        .arg(&request)
        .assert()
        .success()
        .get_output()
        .clone();

    let response = stdout_json(&output);
    assert_eq!(response["contract_version"], 3);
    assert_eq!(response["outcome"], "DENY");
    assert_eq!(response["reason_ids"], serde_json::json!(["DENY_BY_POLICY"]));
    assert_eq!(response["trace"].as_array().unwrap().len(), 8);
    assert_eq!(response["context_hash"].as_str().unwrap().len(), 64);
}

#[test]
fn evaluate_reads_stdin_and_denies_old_versions() {
    let request = EXAMPLE_REQUEST.replace("\"contract_version\": 3", "\"contract_version\": 2");
    shield()
        .arg("evaluate")
        .write_stdin(request)
        .assert()
        .success()
        .stdout(predicate::str::contains("INVALID_CONTRACT_VERSION"))
        .stdout(predicate::str::contains("\"contract_version\": 3"));
}

#[test]
fn legacy_wallet_id_field_is_accepted() {
    let request = EXAMPLE_REQUEST.replace("subject_id", "wallet_id");
    shield()
        .arg("evaluate")
        .write_stdin(request)
        .assert()
        .success()
        .stdout(predicate::str::contains("DENY_BY_POLICY"));
}

#[test]
fn malformed_input_is_a_transport_failure() {
    shield()
        .arg("evaluate")
        .write_stdin("{ not json")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("malformed JSON input"));
}

#[test]
fn mistyped_request_fields_fail_closed() {
    let request = EXAMPLE_REQUEST.replace("\"ttl_seconds\": 60", "\"ttl_seconds\": 1.5");
    let output = shield()
        .arg("evaluate")
        .write_stdin(request)
        .assert()
        .success()
        .get_output()
        .clone();

    let response = stdout_json(&output);
    assert_eq!(response["outcome"], "DENY");
    assert_eq!(response["reason_ids"], serde_json::json!(["INVALID_REQUEST"]));
    assert_eq!(response["trace"][0]["stage"], "fail_closed");
}

#[test]
fn non_numeric_risk_fields_do_not_change_the_decision() {
    let request = EXAMPLE_REQUEST.replace(
        "\"payload\": {}",
        "\"payload\": {\"sentinel_risk\": \"high\", \"amount_dgb\": null}",
    );
    let output = shield()
        .arg("evaluate")
        .write_stdin(request)
        .assert()
        .success()
        .get_output()
        .clone();

    let response = stdout_json(&output);
    assert_eq!(response["reason_ids"], serde_json::json!(["DENY_BY_POLICY"]));
    assert_eq!(response["trace"].as_array().unwrap().len(), 8);
}

#[test]
fn missing_request_file_fails() {
    shield()
        .args(["evaluate", "--request", "/definitely/not/here.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn disabled_bridge_from_env_is_missing() {
    shield()
        .arg("evaluate")
        .env("SHIELD_BRIDGES__ENABLE_ADN", "false")
        .write_stdin(EXAMPLE_REQUEST)
        .assert()
        .success()
        .stdout(predicate::str::contains("COMPONENT_MISSING"));
}

#[test]
fn config_file_can_disable_the_sink_and_emit_material() {
    let dir = TempDir::new().unwrap();
    let config = write(
        &dir,
        "shield.toml",
        "[bridges]\nenable_adaptive_core = false\n\n[audit]\nemit_material = true\n",
    );

    let output = shield()
        .arg("--config")
        .arg(&config)
        .arg("evaluate")
        .write_stdin(EXAMPLE_REQUEST)
        .assert()
        .success()
        .stderr(predicate::str::contains(r#"{"outcome":"DENY""#))
        .get_output()
        .clone();

    let response = stdout_json(&output);
    let trace = response["trace"].as_array().unwrap();
    assert_eq!(trace.len(), 7);
    assert_eq!(trace[6]["stage"], "final_synthesis");
}

#[test]
fn hash_prints_canonical_form_and_digest() {
    let output = shield()
        .arg("hash")
        .write_stdin(r#"{ "b": 1, "a": [true, null] }"#)
        .assert()
        .success()
        .get_output()
        .clone();
    let record = stdout_json(&output);
    assert_eq!(record["canonical_material"], r#"{"a":[true,null],"b":1}"#);
    assert_eq!(record["context_hash"].as_str().unwrap().len(), 64);
}

#[test]
fn hash_of_empty_object_is_known() {
    shield()
        .arg("hash")
        .write_stdin("{}")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a",
        ));
}

#[test]
fn config_command_shows_effective_settings() {
    shield()
        .arg("config")
        .env("SHIELD_LOGGING__LEVEL", "debug")
        .assert()
        .success()
        .stdout(predicate::str::contains("DigiByte Quantum Immune Shield v3"))
        .stdout(predicate::str::contains("level = \"debug\""))
        .stdout(predicate::str::contains("enable_qwg = true"));
}
