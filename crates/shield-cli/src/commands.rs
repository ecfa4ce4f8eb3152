//! Command implementations.
//!
//! Each command writes its result to stdout. Logs go to stderr.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde_json::Value;
use shield_audit::AuditRecord;
use shield_orchestrator::{boundary, validate, Orchestrator};
use shield_types::{Payload, ReasonId, Request, Response};
use tracing::{debug, warn};

use crate::config::ShieldConfig;
use crate::error::{CliError, CliResult};

/// Read a file, or stdin when the path is `-`.
fn read_input(path: &Path) -> CliResult<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(CliError::Stdin)?;
        return Ok(buf);
    }

    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Evaluate a JSON request and print the JSON response.
///
/// Text that is not JSON is a transport error. A JSON object whose fields
/// have the wrong types still gets a fail-closed DENY.
pub fn evaluate(config: &ShieldConfig, input: &Path) -> CliResult<()> {
    let document: Value = serde_json::from_str(&read_input(input)?)?;

    let (response, record) = match serde_json::from_value::<Request>(document.clone()) {
        Ok(request) => {
            debug!(subject_id = %request.subject_id, "Request parsed");
            let orchestrator = Orchestrator::new(config.orchestrator_config());
            orchestrator.evaluate_with_material(&request)
        }
        Err(err) if document.is_object() => {
            warn!(error = %err, "Request fields have the wrong types; failing closed");
            reject_mistyped(&document)
        }
        Err(err) => return Err(err.into()),
    };

    if config.audit.emit_material {
        eprintln!("{}", record.canonical_material);
    }

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// DENY for a JSON object that does not type-check as a request.
///
/// Fields that do hold the right type are kept so the audit material names
/// the request; every other field takes an empty value. The reason is the
/// one validation gives the salvaged request, so a wrong `contract_version`
/// still reads as a version failure.
fn reject_mistyped(document: &Value) -> (Response, AuditRecord) {
    let text = |key: &str| document.get(key).and_then(Value::as_str).unwrap_or_default();
    let int = |key: &str| document.get(key).and_then(Value::as_i64).unwrap_or_default();
    let subject_id = document
        .get("subject_id")
        .or_else(|| document.get("wallet_id"))
        .and_then(Value::as_str)
        .unwrap_or_default();

    let request = Request::new(subject_id, text("action"), text("nonce"), int("ttl_seconds"))
        .with_contract_version(int("contract_version"))
        .with_payload(
            document
                .get("payload")
                .cloned()
                .map(Payload::from)
                .unwrap_or_default(),
        );

    let reason_id = validate(&request)
        .err()
        .map(|err| err.reason_id())
        .unwrap_or(ReasonId::InvalidRequest);
    boundary::fail_closed(&request, reason_id)
}

/// Print the canonical form of any JSON document together with its hash.
pub fn hash(input: &Path) -> CliResult<()> {
    let document: Value = serde_json::from_str(&read_input(input)?)?;
    let record = AuditRecord::seal(&document);
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Print the effective configuration as TOML.
pub fn show_config(config: &ShieldConfig) -> CliResult<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shield_types::{stage, Outcome, CONTRACT_VERSION};

    use super::*;

    #[test]
    fn mistyped_fields_fail_closed_as_invalid_request() {
        let cases = [
            json!({"contract_version": 3, "subject_id": "w1", "action": "SEND", "nonce": "n1", "ttl_seconds": 1.5}),
            json!({"contract_version": 3, "subject_id": 5, "action": "SEND", "nonce": "n1", "ttl_seconds": 60}),
            json!({"contract_version": 3, "subject_id": "w1", "nonce": "n1", "ttl_seconds": 60}),
        ];
        for document in cases {
            assert!(serde_json::from_value::<Request>(document.clone()).is_err());
            let (resp, record) = reject_mistyped(&document);
            assert_eq!(resp.contract_version(), CONTRACT_VERSION);
            assert_eq!(resp.outcome(), Outcome::Deny);
            assert_eq!(resp.reason_ids(), &[ReasonId::InvalidRequest]);
            assert_eq!(resp.trace().len(), 1);
            assert_eq!(resp.trace()[0].stage, stage::FAIL_CLOSED);
            assert!(record.verify());
        }
    }

    #[test]
    fn mistyped_version_is_a_version_failure() {
        let document = json!({"contract_version": "3", "subject_id": "w1", "action": "SEND", "nonce": "n1", "ttl_seconds": 60});
        let (resp, _) = reject_mistyped(&document);
        assert_eq!(resp.reason_ids(), &[ReasonId::InvalidContractVersion]);
    }

    #[test]
    fn salvaged_fields_reach_the_audit_material() {
        let document = json!({"contract_version": 3, "subject_id": "w1", "action": "SEND", "nonce": "n1", "ttl_seconds": "soon"});
        let (_, record) = reject_mistyped(&document);
        assert!(record.canonical_material.contains("\"subject_id\":\"w1\""));
        assert!(record.canonical_material.contains("\"payload\":null"));
    }
}
