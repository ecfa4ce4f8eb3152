use serde_json::json;
use shield_audit::{request_material, AuditHasher};
use shield_types::{Outcome, ReasonId, Request, TraceEntry, ADAPTIVE_CORE};
use tracing::debug;

use super::clamp_unit;
use crate::error::BridgeError;
use crate::traits::AuditSink;

/// Adaptive Core: the read-only learning sink.
///
/// Observes every `*_risk` field in the payload together with the resolved
/// decision and reports an immune-response score. It is shown the decision,
/// never asked for one.
pub struct AdaptiveCoreSink;

impl AdaptiveCoreSink {
    const DEFAULT_IMMUNE_RISK: f64 = 0.35;
    const MULTI_LAYER_BOOST: f64 = 0.10;

    pub fn new() -> Self {
        Self
    }
}

impl Default for AdaptiveCoreSink {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditSink for AdaptiveCoreSink {
    fn report(
        &self,
        request: &Request,
        outcome: Outcome,
        reason_ids: &[ReasonId],
    ) -> Result<TraceEntry, BridgeError> {
        let material = request_material(request).map_err(|e| BridgeError::hashing(ADAPTIVE_CORE, e))?;
        let hash = AuditHasher::hash_value(&json!({
            "component": ADAPTIVE_CORE,
            "request": material,
            "outcome": outcome.as_str(),
            "reason_ids": reason_ids.iter().map(|r| r.as_str()).collect::<Vec<_>>(),
        }));

        let observed: Vec<f64> = request
            .payload
            .entries()
            .filter(|(key, _)| key.ends_with("_risk"))
            .filter_map(|(_, value)| value.as_f64())
            .filter(|v| v.is_finite())
            .collect();

        let score = if observed.is_empty() {
            request
                .payload
                .get("immune_risk")
                .and_then(|v| v.as_f64())
                .filter(|v| v.is_finite())
                .unwrap_or(Self::DEFAULT_IMMUNE_RISK)
        } else {
            let avg = observed.iter().sum::<f64>() / observed.len() as f64;
            avg + Self::MULTI_LAYER_BOOST
        };
        let score = clamp_unit(score);

        debug!(
            observed_layers = observed.len(),
            score,
            outcome = %outcome,
            "Adaptive core observed decision"
        );

        Ok(TraceEntry::ok(ADAPTIVE_CORE, ADAPTIVE_CORE)
            .with_component_hash(hash)
            .with_notes(format!(
                "observed_layers={} risk_score={:.3}",
                observed.len(),
                score
            )))
    }
}

#[cfg(test)]
mod tests {
    use shield_types::{Payload, TraceStatus};

    use super::*;
    use crate::bridges::test_support::request_with;

    #[test]
    fn averages_observed_layers() {
        let req = request_with(&[
            ("wallet_risk", Payload::Float(0.4)),
            ("node_risk", Payload::Float(0.6)),
            ("amount_dgb", Payload::Integer(10)),
        ]);
        let entry = AdaptiveCoreSink::new()
            .report(&req, Outcome::Deny, &[ReasonId::DenyByPolicy])
            .unwrap();
        assert_eq!(entry.stage, ADAPTIVE_CORE);
        assert_eq!(entry.status, TraceStatus::Ok);
        assert_eq!(
            entry.notes.as_deref(),
            Some("observed_layers=2 risk_score=0.600")
        );
    }

    #[test]
    fn falls_back_to_immune_risk() {
        let entry = AdaptiveCoreSink::new()
            .report(&request_with(&[]), Outcome::Deny, &[ReasonId::DenyByPolicy])
            .unwrap();
        assert_eq!(
            entry.notes.as_deref(),
            Some("observed_layers=0 risk_score=0.350")
        );
    }

    #[test]
    fn hash_covers_the_observed_decision() {
        let req = request_with(&[]);
        let sink = AdaptiveCoreSink::new();
        let deny = sink.report(&req, Outcome::Deny, &[ReasonId::DenyByPolicy]).unwrap();
        let allow = sink.report(&req, Outcome::Allow, &[]).unwrap();
        assert_ne!(deny.component_context_hash, allow.component_context_hash);
    }
}
