use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shield_types::{ContextHash, Outcome, ReasonId, Request, TraceEntry};

use crate::canonical::{encode_value, to_canonical_value};
use crate::error::CanonicalError;
use crate::hasher::AuditHasher;

/// Request material including the payload.
///
/// Fails if the payload is not canonically serializable.
pub fn request_material(request: &Request) -> Result<Value, CanonicalError> {
    let payload = to_canonical_value(&request.payload)?;
    Ok(request.audit_value(payload))
}

/// Request material with the payload replaced by `null`. Never fails.
pub fn redacted_request_material(request: &Request) -> Value {
    request.audit_value(Value::Null)
}

/// Material a bridge hashes into its `component_context_hash`.
pub fn component_material(component: &str, request: Value) -> Value {
    json!({
        "component": component,
        "request": request,
    })
}

/// The decision material hashed into a response's `context_hash`.
pub fn decision_material(
    request: Value,
    outcome: Outcome,
    reason_ids: &[ReasonId],
    trace: &[TraceEntry],
) -> Value {
    json!({
        "request": request,
        "outcome": outcome.as_str(),
        "reason_ids": reason_ids.iter().map(|r| r.as_str()).collect::<Vec<_>>(),
        "trace": trace.iter().map(TraceEntry::to_audit_value).collect::<Vec<_>>(),
    })
}

/// A persisted audit artifact: the canonical material text and its hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub canonical_material: String,
    pub context_hash: ContextHash,
}

impl AuditRecord {
    /// Canonicalize and hash `material`.
    pub fn seal(material: &Value) -> Self {
        let canonical_material = encode_value(material);
        let context_hash = AuditHasher::hash_canonical(&canonical_material);
        Self {
            canonical_material,
            context_hash,
        }
    }

    /// Does the stored hash still match the stored material?
    pub fn verify(&self) -> bool {
        AuditHasher::hash_canonical(&self.canonical_material) == self.context_hash
    }
}
