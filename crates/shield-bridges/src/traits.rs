use shield_types::{ComponentId, Outcome, ReasonId, Request, TraceEntry, ADAPTIVE_CORE};

use crate::error::BridgeError;

/// One risk-assessment component of the protocol.
///
/// `evaluate` must be a pure function of the request and must not fail for
/// a well-formed request. A bridge that performs I/O applies its own
/// timeout and reports it as [`BridgeError::Timeout`].
pub trait RiskBridge: Send + Sync {
    /// Which protocol slot this bridge fills.
    fn component(&self) -> ComponentId;

    /// Assess the request and describe the result as a trace entry whose
    /// stage and component are both `self.component().name()`.
    fn evaluate(&self, request: &Request) -> Result<TraceEntry, BridgeError>;
}

/// Read-only sink that observes a resolved decision.
///
/// The sink only returns a trace entry; it has no way to alter the outcome
/// or reason ids it is shown.
pub trait AuditSink: Send + Sync {
    /// Stage and component name of the entries this sink produces.
    fn name(&self) -> &str {
        ADAPTIVE_CORE
    }

    fn report(
        &self,
        request: &Request,
        outcome: Outcome,
        reason_ids: &[ReasonId],
    ) -> Result<TraceEntry, BridgeError>;
}
