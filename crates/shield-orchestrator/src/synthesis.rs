//! Outcome Synthesizer.

use shield_types::{stage, Outcome, ReasonId, TraceEntry, TraceStatus, ORCHESTRATOR};

/// The synthesized decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Synthesis {
    pub outcome: Outcome,
    pub reason_ids: Vec<ReasonId>,
}

impl Synthesis {
    pub fn new(outcome: Outcome, reason_ids: Vec<ReasonId>) -> Self {
        Self {
            outcome,
            reason_ids,
        }
    }

    /// Trace entry recording this decision.
    pub fn trace_entry(&self) -> TraceEntry {
        let status = match self.outcome {
            Outcome::Deny => TraceStatus::Deny,
            Outcome::Allow | Outcome::Escalate => TraceStatus::Ok,
        };
        TraceEntry::new(stage::FINAL_SYNTHESIS, ORCHESTRATOR, status)
            .with_reasons(self.reason_ids.iter().copied())
    }
}

/// Pluggable decision function over the bridge trace.
///
/// Called only after every protocol bridge produced an accepted entry. The
/// trace it sees starts with the input validation entry.
pub trait DecisionPolicy: Send + Sync {
    /// Policy name, for logs.
    fn name(&self) -> &str;

    fn synthesize(&self, trace: &[TraceEntry]) -> Synthesis;
}

/// Provisional policy: every request is denied with `DENY_BY_POLICY`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DenyByDefault;

impl DecisionPolicy for DenyByDefault {
    fn name(&self) -> &str {
        "deny_by_default"
    }

    fn synthesize(&self, _trace: &[TraceEntry]) -> Synthesis {
        Synthesis::new(Outcome::Deny, vec![ReasonId::DenyByPolicy])
    }
}
