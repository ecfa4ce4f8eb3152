//! Risk-assessment bridges for the v3 orchestrator.
//!
//! A bridge is a single, independent risk component. The orchestrator calls
//! every protocol bridge in [`ComponentId::PROTOCOL_ORDER`] and records one
//! trace entry per bridge. After synthesis, the read-only [`AuditSink`]
//! receives the decision for reporting; it has no channel back into the
//! outcome.
//!
//! Bridges never see each other and only ever borrow the request.
//!
//! [`ComponentId::PROTOCOL_ORDER`]: shield_types::ComponentId::PROTOCOL_ORDER

pub mod bridges;
pub mod error;
pub mod mocks;
pub mod traits;

pub use bridges::{
    default_bridge, AdaptiveCoreSink, AdnBridge, DqsnBridge, GuardianWalletBridge, QwgBridge,
    SentinelBridge,
};
pub use error::BridgeError;
pub use mocks::{
    FailingBridge, FailingSink, MisreportingBridge, PanickingBridge, PanickingSink, RecordingSink,
    StaticBridge,
};
pub use traits::{AuditSink, RiskBridge};
