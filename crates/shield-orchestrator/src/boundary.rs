//! Fail-Closed Error Boundary responses.
//!
//! Both builders hash only redacted request material (payload = null) and
//! the boundary's own closed vocabulary, so neither can fail.

use shield_audit::{decision_material, redacted_request_material, AuditRecord};
use shield_types::{stage, Outcome, ReasonId, Request, Response, TraceEntry, TraceStatus, ORCHESTRATOR};

/// Notes attached to a fail-closed entry.
pub const FAIL_CLOSED_NOTES: &str = "tva_error";

/// DENY for a recognized failure.
pub fn fail_closed(request: &Request, reason_id: ReasonId) -> (Response, AuditRecord) {
    let entry = TraceEntry::new(stage::FAIL_CLOSED, ORCHESTRATOR, TraceStatus::Deny)
        .with_reason(reason_id)
        .with_notes(FAIL_CLOSED_NOTES);
    seal_denial(request, reason_id, entry)
}

/// DENY for an unrecognized failure. Nothing about the fault is carried.
pub fn internal_error(request: &Request) -> (Response, AuditRecord) {
    let entry = TraceEntry::new(stage::INTERNAL_ERROR, ORCHESTRATOR, TraceStatus::Deny)
        .with_reason(ReasonId::InternalError);
    seal_denial(request, ReasonId::InternalError, entry)
}

fn seal_denial(request: &Request, reason_id: ReasonId, entry: TraceEntry) -> (Response, AuditRecord) {
    let reason_ids = vec![reason_id];
    let trace = vec![entry];
    let record = AuditRecord::seal(&decision_material(
        redacted_request_material(request),
        Outcome::Deny,
        &reason_ids,
        &trace,
    ));
    let response = Response::deny(record.context_hash, reason_ids, trace);
    (response, record)
}

#[cfg(test)]
mod tests {
    use shield_types::{Payload, CONTRACT_VERSION};

    use super::*;

    #[test]
    fn fail_closed_shape() {
        let req = Request::new("w1", "SEND", "n1", 60);
        let (resp, record) = fail_closed(&req, ReasonId::HashingFailed);

        assert_eq!(resp.contract_version(), CONTRACT_VERSION);
        assert_eq!(resp.outcome(), Outcome::Deny);
        assert_eq!(resp.reason_ids(), &[ReasonId::HashingFailed]);
        assert_eq!(resp.trace().len(), 1);
        let entry = &resp.trace()[0];
        assert_eq!(entry.stage, "fail_closed");
        assert_eq!(entry.component, "orchestrator");
        assert_eq!(entry.notes.as_deref(), Some("tva_error"));
        assert_eq!(resp.context_hash(), &record.context_hash);
        assert!(record.verify());
    }

    #[test]
    fn unserializable_payload_is_never_touched() {
        let req = Request::new("w1", "SEND", "n1", 60).with_payload(Payload::Float(f64::NAN));
        let (_, record) = fail_closed(&req, ReasonId::HashingFailed);
        assert!(record.canonical_material.contains("\"payload\":null"));
    }

    #[test]
    fn payload_does_not_influence_failure_hash() {
        let plain = Request::new("w1", "SEND", "n1", 60);
        let loaded = plain
            .clone()
            .with_payload([("amount_dgb", Payload::Integer(1))].into_iter().collect());
        assert_eq!(
            fail_closed(&plain, ReasonId::ComponentError).0,
            fail_closed(&loaded, ReasonId::ComponentError).0
        );
    }

    #[test]
    fn internal_error_shape() {
        let req = Request::new("w1", "SEND", "n1", 60);
        let (resp, _) = internal_error(&req);
        assert_eq!(resp.reason_ids(), &[ReasonId::InternalError]);
        let entry = &resp.trace()[0];
        assert_eq!(entry.stage, "internal_error");
        assert_eq!(entry.status, TraceStatus::Deny);
        assert_eq!(entry.notes, None);
    }
}
