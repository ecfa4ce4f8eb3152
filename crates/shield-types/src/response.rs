use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hash::ContextHash;
use crate::reason::ReasonId;
use crate::trace::TraceEntry;
use crate::CONTRACT_VERSION;

/// Final decision for a gated action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Allow,
    Escalate,
    Deny,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Allow => "ALLOW",
            Outcome::Escalate => "ESCALATE",
            Outcome::Deny => "DENY",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A serialized response carried a contract version other than
/// [`CONTRACT_VERSION`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("response contract version {found} is not {expected}")]
pub struct ContractVersionMismatch {
    pub expected: i64,
    pub found: i64,
}

/// The versioned response envelope; the sole externally observable result
/// of an evaluation.
///
/// Deserialization goes through the version check, so a `Response` value is
/// always pinned to [`CONTRACT_VERSION`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ResponseWire")]
pub struct Response {
    contract_version: i64,
    context_hash: ContextHash,
    outcome: Outcome,
    reason_ids: Vec<ReasonId>,
    trace: Vec<TraceEntry>,
}

impl Response {
    /// Build a response pinned to [`CONTRACT_VERSION`].
    pub fn new(
        context_hash: ContextHash,
        outcome: Outcome,
        reason_ids: Vec<ReasonId>,
        trace: Vec<TraceEntry>,
    ) -> Self {
        Self {
            contract_version: CONTRACT_VERSION,
            context_hash,
            outcome,
            reason_ids,
            trace,
        }
    }

    /// Shorthand for a DENY response.
    pub fn deny(context_hash: ContextHash, reason_ids: Vec<ReasonId>, trace: Vec<TraceEntry>) -> Self {
        Self::new(context_hash, Outcome::Deny, reason_ids, trace)
    }

    pub fn contract_version(&self) -> i64 {
        self.contract_version
    }

    pub fn context_hash(&self) -> &ContextHash {
        &self.context_hash
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn reason_ids(&self) -> &[ReasonId] {
        &self.reason_ids
    }

    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    pub fn is_deny(&self) -> bool {
        self.outcome == Outcome::Deny
    }

    /// Does any reason id in the response equal `reason`?
    pub fn has_reason(&self, reason: ReasonId) -> bool {
        self.reason_ids.contains(&reason)
    }
}

#[derive(Deserialize)]
struct ResponseWire {
    contract_version: i64,
    context_hash: ContextHash,
    outcome: Outcome,
    reason_ids: Vec<ReasonId>,
    trace: Vec<TraceEntry>,
}

impl TryFrom<ResponseWire> for Response {
    type Error = ContractVersionMismatch;

    fn try_from(wire: ResponseWire) -> Result<Self, Self::Error> {
        if wire.contract_version != CONTRACT_VERSION {
            return Err(ContractVersionMismatch {
                expected: CONTRACT_VERSION,
                found: wire.contract_version,
            });
        }
        Ok(Self::new(wire.context_hash, wire.outcome, wire.reason_ids, wire.trace))
    }
}
