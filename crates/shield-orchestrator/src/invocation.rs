//! Component Invocation Stage.
//!
//! Every protocol slot is consulted in [`ComponentId::PROTOCOL_ORDER`]. The
//! first slot that fails stops the stage; nothing after it is called.

use std::sync::Arc;

use shield_bridges::RiskBridge;
use shield_types::{ComponentId, ReasonId, Request, TraceEntry, TraceStatus};
use tracing::{debug, warn};

use crate::config::BridgeRegistry;
use crate::error::OrchestrationError;

/// Result of consulting one protocol slot.
#[derive(Clone, Debug, PartialEq)]
pub enum BridgeOutcome {
    /// The bridge answered within its contract.
    Recorded(TraceEntry),
    /// The slot failed. `entry` is the synthetic ERROR entry describing it.
    ///
    /// The entry is for callers of [`consult`] that keep a per-slot record.
    /// [`invoke_bridges`] only logs it: a failed stage ends in the single
    /// fail-closed entry, never in a partial trace.
    Failed {
        entry: TraceEntry,
        error: OrchestrationError,
    },
}

impl BridgeOutcome {
    fn failed(id: ComponentId, error: OrchestrationError) -> Self {
        let entry = TraceEntry::new(id.name(), id.name(), TraceStatus::Error)
            .with_reason(error.reason_id);
        BridgeOutcome::Failed { entry, error }
    }

    pub fn into_result(self) -> Result<TraceEntry, OrchestrationError> {
        match self {
            BridgeOutcome::Recorded(entry) => Ok(entry),
            BridgeOutcome::Failed { error, .. } => Err(error),
        }
    }
}

/// Consult a single slot.
pub fn consult(id: ComponentId, bridge: Option<&dyn RiskBridge>, request: &Request) -> BridgeOutcome {
    let Some(bridge) = bridge else {
        return BridgeOutcome::failed(
            id,
            OrchestrationError::new(ReasonId::ComponentMissing, format!("{} is not wired", id)),
        );
    };

    match bridge.evaluate(request) {
        Ok(entry) => match check_entry(id, &entry) {
            Ok(()) => BridgeOutcome::Recorded(entry),
            Err(error) => BridgeOutcome::failed(id, error),
        },
        Err(err) => BridgeOutcome::failed(id, err.into()),
    }
}

/// Enforce the bridge response contract on an entry.
pub fn check_entry(id: ComponentId, entry: &TraceEntry) -> Result<(), OrchestrationError> {
    let name = id.name();
    if entry.stage != name || entry.component != name {
        return Err(OrchestrationError::new(
            ReasonId::ComponentInvalidResponse,
            format!(
                "{} answered as stage={} component={}",
                name, entry.stage, entry.component
            ),
        ));
    }

    match entry.status {
        TraceStatus::Ok if !entry.reason_ids.is_empty() => Err(OrchestrationError::new(
            ReasonId::ComponentInvalidResponse,
            format!("{} reported OK with reason ids", name),
        )),
        TraceStatus::Error => Err(OrchestrationError::new(
            ReasonId::ComponentError,
            format!("{} reported ERROR", name),
        )),
        TraceStatus::Ok | TraceStatus::Deny | TraceStatus::Skipped => Ok(()),
    }
}

/// Run every protocol bridge, fail-fast.
pub fn invoke_bridges(
    registry: &BridgeRegistry,
    request: &Request,
) -> Result<Vec<TraceEntry>, OrchestrationError> {
    let mut entries = Vec::with_capacity(ComponentId::PROTOCOL_ORDER.len());

    for (id, bridge) in registry.iter() {
        debug!(component = id.name(), "Consulting bridge");

        match consult(id, bridge.map(Arc::as_ref), request) {
            BridgeOutcome::Recorded(entry) => {
                debug!(
                    component = id.name(),
                    status = %entry.status,
                    "Bridge recorded"
                );
                entries.push(entry);
            }
            BridgeOutcome::Failed { entry, error } => {
                warn!(
                    component = id.name(),
                    reason_id = %error.reason_id,
                    message = %error.message,
                    entry = ?entry,
                    "Bridge failed; aborting remaining bridges"
                );
                return Err(error);
            }
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use shield_bridges::{FailingBridge, MisreportingBridge, StaticBridge};

    use super::*;

    fn request() -> Request {
        Request::new("w1", "SEND", "n1", 60)
    }

    fn all_static() -> BridgeRegistry {
        let mut registry = BridgeRegistry::empty();
        for id in ComponentId::PROTOCOL_ORDER {
            registry.wire(Arc::new(StaticBridge::ok(id)));
        }
        registry
    }

    #[test]
    fn missing_slot_yields_synthetic_error_entry() {
        match consult(ComponentId::Adn, None, &request()) {
            BridgeOutcome::Failed { entry, error } => {
                assert_eq!(entry.stage, "adn");
                assert_eq!(entry.status, TraceStatus::Error);
                assert_eq!(entry.reason_ids, vec![ReasonId::ComponentMissing]);
                assert_eq!(error.reason_id, ReasonId::ComponentMissing);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn error_status_becomes_a_synthetic_entry() {
        let bridge = StaticBridge::with_status(ComponentId::Dqsn, TraceStatus::Error);
        match consult(ComponentId::Dqsn, Some(&bridge), &request()) {
            BridgeOutcome::Failed { entry, error } => {
                assert_eq!(
                    entry,
                    TraceEntry::new("dqsn", "dqsn", TraceStatus::Error)
                        .with_reason(ReasonId::ComponentError)
                );
                assert_eq!(error.reason_id, ReasonId::ComponentError);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn entry_contract() {
        let id = ComponentId::Qwg;
        assert!(check_entry(id, &TraceEntry::ok("qwg", "qwg")).is_ok());
        assert!(check_entry(
            id,
            &TraceEntry::new("qwg", "qwg", TraceStatus::Deny).with_reason(ReasonId::DenyByPolicy)
        )
        .is_ok());
        assert!(check_entry(id, &TraceEntry::new("qwg", "qwg", TraceStatus::Skipped)).is_ok());

        let wrong_stage = check_entry(id, &TraceEntry::ok("adn", "qwg")).unwrap_err();
        assert_eq!(wrong_stage.reason_id, ReasonId::ComponentInvalidResponse);

        let wrong_component = check_entry(id, &TraceEntry::ok("qwg", "orchestrator")).unwrap_err();
        assert_eq!(wrong_component.reason_id, ReasonId::ComponentInvalidResponse);

        let ok_with_reasons = check_entry(
            id,
            &TraceEntry::ok("qwg", "qwg").with_reason(ReasonId::ComponentError),
        )
        .unwrap_err();
        assert_eq!(ok_with_reasons.reason_id, ReasonId::ComponentInvalidResponse);

        let error_status =
            check_entry(id, &TraceEntry::new("qwg", "qwg", TraceStatus::Error)).unwrap_err();
        assert_eq!(error_status.reason_id, ReasonId::ComponentError);
    }

    #[test]
    fn healthy_bridges_run_in_protocol_order() {
        let entries = invoke_bridges(&all_static(), &request()).unwrap();
        let stages: Vec<_> = entries.iter().map(|e| e.stage.as_str()).collect();
        assert_eq!(
            stages,
            vec!["sentinel_ai", "dqsn", "adn", "guardian_wallet", "qwg"]
        );
    }

    #[test]
    fn first_failure_stops_the_stage() {
        let failing = Arc::new(FailingBridge::hashing(ComponentId::Dqsn));
        let later = Arc::new(StaticBridge::ok(ComponentId::Qwg));
        let registry = all_static()
            .with_bridge(failing.clone())
            .with_bridge(later.clone());

        let err = invoke_bridges(&registry, &request()).unwrap_err();
        assert_eq!(err.reason_id, ReasonId::HashingFailed);
        assert_eq!(failing.calls(), 1);
        assert_eq!(later.calls(), 0);
    }

    #[test]
    fn earliest_slot_wins_when_several_fail() {
        let registry = all_static()
            .with_bridge(Arc::new(MisreportingBridge::new(ComponentId::Qwg, "adn")))
            .without(ComponentId::Adn);
        let err = invoke_bridges(&registry, &request()).unwrap_err();
        assert_eq!(err.reason_id, ReasonId::ComponentMissing);
    }

    #[test]
    fn deny_findings_do_not_abort() {
        let registry = all_static().with_bridge(Arc::new(StaticBridge::with_entry(
            ComponentId::Sentinel,
            TraceEntry::new("sentinel_ai", "sentinel_ai", TraceStatus::Deny)
                .with_reason(ReasonId::DenyByPolicy),
        )));
        let entries = invoke_bridges(&registry, &request()).unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].status, TraceStatus::Deny);
    }
}
