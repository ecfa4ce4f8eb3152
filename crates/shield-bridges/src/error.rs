use shield_audit::CanonicalError;
use shield_types::ReasonId;
use thiserror::Error;

/// Errors raised by a bridge or sink.
///
/// Messages are for operators only; the orchestrator reduces every variant
/// to a [`ReasonId`] before anything reaches a response.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("{component}: hashing failed: {source}")]
    Hashing {
        component: String,
        #[source]
        source: CanonicalError,
    },

    #[error("{component}: invalid response: {reason}")]
    InvalidResponse { component: String, reason: String },

    #[error("{component}: unavailable: {reason}")]
    Unavailable { component: String, reason: String },

    #[error("{component}: timed out after {timeout_ms}ms")]
    Timeout { component: String, timeout_ms: u64 },

    #[error("{component}: {reason}")]
    Failed { component: String, reason: String },
}

impl BridgeError {
    pub fn hashing(component: impl Into<String>, source: CanonicalError) -> Self {
        BridgeError::Hashing {
            component: component.into(),
            source,
        }
    }

    pub fn failed(component: impl Into<String>, reason: impl Into<String>) -> Self {
        BridgeError::Failed {
            component: component.into(),
            reason: reason.into(),
        }
    }

    /// The reason id this failure maps to.
    pub fn reason_id(&self) -> ReasonId {
        match self {
            BridgeError::Hashing { .. } => ReasonId::HashingFailed,
            BridgeError::InvalidResponse { .. } => ReasonId::ComponentInvalidResponse,
            BridgeError::Unavailable { .. }
            | BridgeError::Timeout { .. }
            | BridgeError::Failed { .. } => ReasonId::ComponentError,
        }
    }

    /// Name of the component that failed.
    pub fn component(&self) -> &str {
        match self {
            BridgeError::Hashing { component, .. }
            | BridgeError::InvalidResponse { component, .. }
            | BridgeError::Unavailable { component, .. }
            | BridgeError::Timeout { component, .. }
            | BridgeError::Failed { component, .. } => component,
        }
    }
}
