pub mod adaptive_core;
pub mod adn;
pub mod dqsn;
pub mod guardian_wallet;
pub mod qwg;
pub mod sentinel;

use std::sync::Arc;

use shield_audit::{component_material, request_material, AuditHasher};
use shield_types::{ComponentId, ContextHash, Payload, Request, TraceEntry};
use tracing::debug;

use crate::error::BridgeError;
use crate::traits::RiskBridge;

pub use adaptive_core::AdaptiveCoreSink;
pub use adn::AdnBridge;
pub use dqsn::DqsnBridge;
pub use guardian_wallet::GuardianWalletBridge;
pub use qwg::QwgBridge;
pub use sentinel::SentinelBridge;

/// The stock bridge for a protocol slot.
pub fn default_bridge(id: ComponentId) -> Arc<dyn RiskBridge> {
    match id {
        ComponentId::Sentinel => Arc::new(SentinelBridge::new()),
        ComponentId::Dqsn => Arc::new(DqsnBridge::new()),
        ComponentId::Adn => Arc::new(AdnBridge::new()),
        ComponentId::GuardianWallet => Arc::new(GuardianWalletBridge::new()),
        ComponentId::Qwg => Arc::new(QwgBridge::new()),
    }
}

/// Per-component context hash over `{component, request}`, payload included.
///
/// This is where an unserializable payload first surfaces.
pub(crate) fn component_context_hash(
    component: &str,
    request: &Request,
) -> Result<ContextHash, BridgeError> {
    let material = request_material(request).map_err(|e| BridgeError::hashing(component, e))?;
    Ok(AuditHasher::hash_value(&component_material(component, material)))
}

/// Read a numeric risk field from the payload.
///
/// The payload is untrusted input, so anything that is not a finite number
/// (absent, null, text, nested) takes `default`. Only hashing may fail a
/// stock bridge.
pub(crate) fn risk_field(payload: &Payload, key: &str, default: f64) -> f64 {
    payload
        .get(key)
        .and_then(|value| value.as_f64())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

pub(crate) fn clamp_unit(score: f64) -> f64 {
    score.clamp(0.0, 1.0)
}

/// OK entry carrying the component hash and an informational score.
pub(crate) fn scored_entry(
    id: ComponentId,
    hash: ContextHash,
    score: f64,
) -> TraceEntry {
    debug!(component = id.name(), score, "Bridge scored request");
    TraceEntry::ok(id.name(), id.name())
        .with_component_hash(hash)
        .with_notes(format!("risk_score={:.3}", score))
}

#[cfg(test)]
pub(crate) mod test_support {
    use shield_types::{Payload, Request};

    pub fn request_with(fields: &[(&str, Payload)]) -> Request {
        Request::new("w1", "SEND", "n1", 60)
            .with_payload(fields.iter().cloned().collect())
    }
}
