use shield_audit::CanonicalError;
use shield_bridges::BridgeError;
use shield_types::ReasonId;
use thiserror::Error;

/// Request validation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("contract_version must be {expected}, got {found}")]
    UnsupportedContractVersion { expected: i64, found: i64 },

    #[error("{0} must be a non-empty string")]
    EmptyField(&'static str),

    #[error("ttl_seconds must be a positive integer, got {0}")]
    NonPositiveTtl(i64),
}

impl ValidationError {
    pub fn reason_id(&self) -> ReasonId {
        match self {
            ValidationError::UnsupportedContractVersion { .. } => ReasonId::InvalidContractVersion,
            ValidationError::EmptyField(_) | ValidationError::NonPositiveTtl(_) => {
                ReasonId::InvalidRequest
            }
        }
    }
}

/// A recognized pipeline failure, carried to the fail-closed boundary.
///
/// Only `reason_id` ever reaches a response. `message` is for operator logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason_id}: {message}")]
pub struct OrchestrationError {
    pub reason_id: ReasonId,
    pub message: String,
}

impl OrchestrationError {
    pub fn new(reason_id: ReasonId, message: impl Into<String>) -> Self {
        Self {
            reason_id,
            message: message.into(),
        }
    }
}

impl From<ValidationError> for OrchestrationError {
    fn from(err: ValidationError) -> Self {
        Self::new(err.reason_id(), err.to_string())
    }
}

impl From<BridgeError> for OrchestrationError {
    fn from(err: BridgeError) -> Self {
        Self::new(err.reason_id(), err.to_string())
    }
}

impl From<CanonicalError> for OrchestrationError {
    fn from(err: CanonicalError) -> Self {
        Self::new(ReasonId::HashingFailed, err.to_string())
    }
}
