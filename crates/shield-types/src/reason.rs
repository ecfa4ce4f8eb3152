use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Orchestrator v3 reason identifiers.
///
/// This is the entire vocabulary available for explaining an outcome.
/// Within a response, reason ids keep insertion order; they are never sorted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonId {
    InvalidContractVersion,
    InvalidRequest,
    HashingFailed,

    ComponentError,
    ComponentInvalidResponse,
    ComponentMissing,

    DenyByPolicy,
    InternalError,
}

/// Coarse grouping of reason ids by where the fault originates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReasonCategory {
    /// Malformed or incompatible request, detected before any component runs
    Input,
    /// Material could not be canonically serialized
    Hashing,
    /// Fault local to a single bridge
    Component,
    /// Decision rule outcome; not an error
    Policy,
    /// Anything unanticipated
    Internal,
}

impl ReasonId {
    /// Every registered reason id, in registry order.
    pub const ALL: [ReasonId; 8] = [
        ReasonId::InvalidContractVersion,
        ReasonId::InvalidRequest,
        ReasonId::HashingFailed,
        ReasonId::ComponentError,
        ReasonId::ComponentInvalidResponse,
        ReasonId::ComponentMissing,
        ReasonId::DenyByPolicy,
        ReasonId::InternalError,
    ];

    /// Wire token for this reason id.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonId::InvalidContractVersion => "INVALID_CONTRACT_VERSION",
            ReasonId::InvalidRequest => "INVALID_REQUEST",
            ReasonId::HashingFailed => "HASHING_FAILED",
            ReasonId::ComponentError => "COMPONENT_ERROR",
            ReasonId::ComponentInvalidResponse => "COMPONENT_INVALID_RESPONSE",
            ReasonId::ComponentMissing => "COMPONENT_MISSING",
            ReasonId::DenyByPolicy => "DENY_BY_POLICY",
            ReasonId::InternalError => "INTERNAL_ERROR",
        }
    }

    pub fn category(&self) -> ReasonCategory {
        match self {
            ReasonId::InvalidContractVersion | ReasonId::InvalidRequest => ReasonCategory::Input,
            ReasonId::HashingFailed => ReasonCategory::Hashing,
            ReasonId::ComponentError
            | ReasonId::ComponentInvalidResponse
            | ReasonId::ComponentMissing => ReasonCategory::Component,
            ReasonId::DenyByPolicy => ReasonCategory::Policy,
            ReasonId::InternalError => ReasonCategory::Internal,
        }
    }

    /// Is this reason id an error (as opposed to a policy decision)?
    pub fn is_error(&self) -> bool {
        self.category() != ReasonCategory::Policy
    }
}

impl fmt::Display for ReasonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token outside the reason id registry.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown reason id: {0}")]
pub struct UnknownReasonId(pub String);

impl FromStr for ReasonId {
    type Err = UnknownReasonId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReasonId::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownReasonId(s.to_string()))
    }
}
